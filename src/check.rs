//! A small framework for property-based testing over random JSON trees.
//!
//! The primary entry point for this framework is the [`Check`] type.
//!
//! This framework is designed for smoke tests inside `#[test]` functions. It
//! runs quickly and deterministically, and is therefore suitable for `cargo
//! test` runs and CI. For in-depth fuzzing, use the `cargo fuzz` targets under
//! `fuzz/` instead.
//!
//! # Example
//!
//! ```
//! use badbatch::{check::Check, codec};
//!
//! let result = Check::new()
//!     .iters(200)
//!     .run(|value| -> Result<(), String> {
//!         let text = codec::serialize(value).map_err(|e| e.to_string())?;
//!         let parsed = codec::deserialize(&text).map_err(|e| e.to_string())?;
//!         if parsed == *value {
//!             Ok(())
//!         } else {
//!             Err(format!("round trip changed the tree into {parsed}"))
//!         }
//!     });
//! assert!(result.is_ok());
//! ```

use crate::rng::{Rng, DEFAULT_SEED};
use serde_json::Value;
use std::panic;

/// The result of running a check.
///
/// If the check passes, this is `Ok(())`. If it fails, this is a
/// [`CheckFailure`] with the smallest failing tree found.
pub type CheckResult = std::result::Result<(), CheckFailure>;

/// A failing test case found while running a check.
///
/// # Example
///
/// ```
/// use badbatch::check::Check;
///
/// let failure = Check::new()
///     .run(|value| {
///         if value.as_object().map_or(true, |members| members.len() < 2) {
///             Ok(())
///         } else {
///             Err("too many members")
///         }
///     })
///     .unwrap_err();
///
/// // Shrinking removed every member it could and nulled the rest.
/// let members = failure.value.as_object().unwrap();
/// assert_eq!(members.len(), 2);
/// assert!(members.values().all(|v| v.is_null()));
/// assert_eq!(failure.message, "too many members");
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct CheckFailure {
    /// The input tree that triggered the failure.
    pub value: Value,

    /// The failure message.
    pub message: String,
}

/// A check that can be run to test a property of random object trees.
///
/// Every generated tree has an object root. Keys start with a letter and
/// contain no dots, so they are always valid flat path segments.
#[derive(Debug)]
pub struct Check {
    iters: usize,
    shrink_iters: usize,
    seed: u64,
    max_depth: usize,
}

impl Default for Check {
    fn default() -> Check {
        Check::new()
    }
}

impl Check {
    /// Create a new `Check`.
    pub fn new() -> Check {
        Check {
            iters: 1000,
            shrink_iters: 1000,
            seed: DEFAULT_SEED,
            max_depth: 4,
        }
    }

    /// Configure the number of test iterations to run.
    pub fn iters(&mut self, iters: usize) -> &mut Check {
        self.iters = iters;
        self
    }

    /// Configure the number of candidates tried while shrinking a failing
    /// input before reporting the failure.
    pub fn shrink_iters(&mut self, shrink_iters: usize) -> &mut Check {
        self.shrink_iters = shrink_iters;
        self
    }

    /// Configure the seed of the random tree generator.
    pub fn seed(&mut self, seed: u64) -> &mut Check {
        self.seed = seed;
        self
    }

    /// Configure how deeply containers may nest below the root.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Check {
        self.max_depth = max_depth;
        self
    }

    /// Run this configured `Check`, checking that the given `property`
    /// returns `Ok(_)` for every generated tree.
    pub fn run<S>(&self, mut property: impl FnMut(&Value) -> std::result::Result<(), S>) -> CheckResult
    where
        S: ToString,
    {
        let mut rng = Rng::new(self.seed);

        for _ in 0..self.iters {
            let value = Value::Object(rng.gen_object(self.max_depth));
            if let Err(message) = test(&mut property, &value) {
                return self.shrink(value, property, message);
            }
        }
        Ok(())
    }

    fn shrink<S>(
        &self,
        mut value: Value,
        mut property: impl FnMut(&Value) -> std::result::Result<(), S>,
        mut message: String,
    ) -> CheckResult
    where
        S: ToString,
    {
        eprintln!("failed on input {value}: {message}");
        if self.shrink_iters == 0 {
            return Err(CheckFailure { value, message });
        }

        eprintln!("shrinking for {} iters...", self.shrink_iters);

        let mut budget = self.shrink_iters;
        'shrinking: while budget > 0 {
            for candidate in smaller(&value) {
                if budget == 0 {
                    break 'shrinking;
                }
                budget -= 1;

                if let Err(msg) = test(&mut property, &candidate) {
                    message = msg;
                    eprintln!("got failure for shrunken input {candidate}: {message}");
                    value = candidate;
                    continue 'shrinking;
                }
            }
            // No smaller candidate fails.
            break;
        }

        eprintln!("shrunk failing input down to {value}");
        Err(CheckFailure { value, message })
    }
}

fn test<S>(
    property: &mut impl FnMut(&Value) -> std::result::Result<(), S>,
    value: &Value,
) -> std::result::Result<(), String>
where
    S: ToString,
{
    match panic::catch_unwind(panic::AssertUnwindSafe(|| property(value))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(message)) => Err(message.to_string()),
        Err(_) => Err("<panicked>".to_string()),
    }
}

/// Every tree one step smaller than `value`, most aggressive first: dropped
/// members and elements, then children replaced by `null`, then children
/// shrunk in place.
fn smaller(value: &Value) -> Vec<Value> {
    let mut candidates = vec![];
    match value {
        Value::Object(members) => {
            for key in members.keys() {
                let mut fewer = members.clone();
                fewer.shift_remove(key);
                candidates.push(Value::Object(fewer));
            }
            for (key, child) in members {
                for replacement in nulled(child).into_iter().chain(smaller(child)) {
                    let mut shrunk = members.clone();
                    shrunk.insert(key.clone(), replacement);
                    candidates.push(Value::Object(shrunk));
                }
            }
        }
        Value::Array(items) => {
            for i in 0..items.len() {
                let mut fewer = items.clone();
                fewer.remove(i);
                candidates.push(Value::Array(fewer));
            }
            for (i, child) in items.iter().enumerate() {
                for replacement in nulled(child).into_iter().chain(smaller(child)) {
                    let mut shrunk = items.clone();
                    shrunk[i] = replacement;
                    candidates.push(Value::Array(shrunk));
                }
            }
        }
        Value::String(s) if !s.is_empty() => {
            candidates.push(Value::String(String::new()));
        }
        Value::Number(n) if n.as_i64() != Some(0) => {
            candidates.push(Value::from(0));
        }
        Value::Bool(true) => candidates.push(Value::Bool(false)),
        _ => {}
    }
    candidates
}

fn nulled(value: &Value) -> Option<Value> {
    (!value.is_null()).then_some(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passing_properties_pass() {
        assert!(Check::new().iters(50).run(|_| Ok::<_, String>(())).is_ok());
    }

    #[test]
    fn panics_are_failures() {
        let failure = Check::new()
            .shrink_iters(0)
            .run(|value| -> std::result::Result<(), String> {
                if value.as_object().is_some_and(|m| !m.is_empty()) {
                    panic!("boom");
                }
                Ok(())
            })
            .unwrap_err();
        assert_eq!(failure.message, "<panicked>");
    }

    #[test]
    fn smaller_trees_drop_members_first() {
        let candidates = smaller(&json!({"a": [1], "b": "x"}));
        assert_eq!(candidates[0], json!({"b": "x"}));
        assert_eq!(candidates[1], json!({"a": [1]}));
        assert_eq!(candidates[2], json!({"a": null, "b": "x"}));
        assert!(candidates.contains(&json!({"a": [], "b": "x"})));
        assert!(candidates.contains(&json!({"a": [1], "b": ""})));
    }
}
