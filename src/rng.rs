//! A thin wrapper over `rand::rngs::SmallRng` with the few conveniences the
//! [`check`][crate::check] harness needs to build random trees.

use rand::{rngs::SmallRng, Rng as _, SeedableRng};
use serde_json::{Map, Number, Value};

pub(crate) const DEFAULT_SEED: u64 = 0x12345678_12345678;

const KEY_HEAD: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const KEY_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_-";

/// A pseudorandom number generator.
///
/// Not cryptographically secure. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct Rng {
    inner: SmallRng,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

macro_rules! gen_methods {
    ( $( $name:ident -> $ty:ty ; )* ) => {
        $(
            /// Generate a random
            #[doc = concat!("`", stringify!($ty), "`")]
            /// value.
            pub fn $name(&mut self) -> $ty {
                self.inner.gen()
            }
        )*
    };
}

impl Rng {
    /// Create a new `Rng` from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a random `usize` in the range `0..len`.
    ///
    /// If `len` is `0`, then `None` is returned.
    #[inline]
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.gen_range(0..len))
    }

    gen_methods! {
        gen_bool -> bool;
        gen_i64 -> i64;
        gen_f64 -> f64;
    }

    /// Generate an object key that is safe to use in a flat path: it starts
    /// with a letter and never contains a dot.
    pub fn gen_key(&mut self) -> String {
        let len = 1 + self.gen_index(8).unwrap_or(0);
        let mut key = String::with_capacity(len);
        key.push(char::from(KEY_HEAD[self.inner.gen_range(0..KEY_HEAD.len())]));
        for _ in 1..len {
            key.push(char::from(KEY_TAIL[self.inner.gen_range(0..KEY_TAIL.len())]));
        }
        key
    }

    /// Generate a short string of printable characters, including quotes,
    /// escapes and non-ASCII text.
    pub fn gen_string(&mut self) -> String {
        const EXTRA: [char; 8] = ['"', '\\', '\n', ' ', '.', 'é', '字', '\u{1F600}'];
        let len = self.gen_index(12).unwrap_or(0);
        (0..len)
            .map(|_| {
                if self.gen_index(4) == Some(0) {
                    EXTRA[self.inner.gen_range(0..EXTRA.len())]
                } else {
                    char::from(self.inner.gen_range(b' '..=b'~'))
                }
            })
            .collect()
    }

    /// Generate a random JSON number: an integer or a finite float.
    pub fn gen_number(&mut self) -> Number {
        if self.gen_bool() {
            Number::from(self.gen_i64() >> self.inner.gen_range(0u32..63))
        } else {
            let float = (self.gen_f64() - 0.5) * 10f64.powi(self.inner.gen_range(-3..12));
            Number::from_f64(float).unwrap_or_else(|| Number::from(0))
        }
    }

    /// Generate a random tree nested at most `max_depth` containers deep.
    pub fn gen_value(&mut self, max_depth: usize) -> Value {
        let kinds = if max_depth == 0 { 4 } else { 6 };
        match self.gen_index(kinds) {
            Some(0) => Value::Null,
            Some(1) => Value::Bool(self.gen_bool()),
            Some(2) => Value::Number(self.gen_number()),
            Some(3) => Value::String(self.gen_string()),
            Some(4) => {
                let len = self.gen_index(4).unwrap_or(0);
                Value::Array((0..len).map(|_| self.gen_value(max_depth - 1)).collect())
            }
            _ => Value::Object(self.gen_object(max_depth - 1)),
        }
    }

    /// Generate a random object whose members are nested at most
    /// `max_depth` containers deep.
    pub fn gen_object(&mut self, max_depth: usize) -> Map<String, Value> {
        let len = self.gen_index(5).unwrap_or(0);
        (0..len)
            .map(|_| (self.gen_key(), self.gen_value(max_depth)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let a = Rng::new(7).gen_value(3);
        let b = Rng::new(7).gen_value(3);
        assert_eq!(a, b);
    }

    #[test]
    fn keys_are_path_safe() {
        let mut rng = Rng::default();
        for _ in 0..1000 {
            let key = rng.gen_key();
            assert!(key.starts_with(|c: char| c.is_ascii_alphabetic()));
            assert!(!key.contains('.'));
        }
    }

    #[test]
    fn depth_is_bounded() {
        fn depth(value: &Value) -> usize {
            match value {
                Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
                Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
                _ => 0,
            }
        }

        let mut rng = Rng::default();
        for _ in 0..200 {
            assert!(depth(&rng.gen_value(2)) <= 2);
        }
    }
}
