//! Combinatorial, format-preserving corruption of flat entries.
//!
//! A [`Corruption`] takes an ordered set of corruptable flat entries, picks
//! combinations of them, and rewrites each picked entry *in the serialized
//! text* of the whole set. Working on the text rather than on the tree keeps
//! every untouched byte identical to the baseline.
//!
//! # Example
//!
//! ```
//! use badbatch::{corrupt::{Corruption, Target}, flatten};
//! use serde_json::json;
//!
//! let entries = flatten(&json!({"name": "value1", "count": 2}));
//! let variants = Corruption::new().corrupt(&entries)?;
//!
//! let values: Vec<_> = variants
//!     .iter()
//!     .map(|v| serde_json::Value::Object(v.entries.clone()))
//!     .collect();
//! assert_eq!(
//!     values,
//!     [
//!         json!({"name": "aaaaa0", "count": 2}),
//!         json!({"name": "value1", "count": 0}),
//!         json!({"name": "aaaaa0", "count": 0}),
//!     ]
//! );
//! assert!(variants.iter().all(|v| v.target == Target::Values));
//! # Ok::<(), badbatch::Error>(())
//! ```

use crate::{codec, log, Error, FlatMap, Result};
use serde_json::Value;

/// The replacement text for each class of character.
///
/// Every ASCII letter of a corrupted value is replaced by `alpha` and every
/// ASCII digit by `digit`. With one-character substitutes a corrupted value
/// keeps its length and shape: `"test@example.com"` becomes
/// `"aaaa@aaaaaaa.aaa"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitutions {
    alpha: String,
    digit: String,
}

impl Default for Substitutions {
    fn default() -> Self {
        Self::new("a", "0")
    }
}

impl Substitutions {
    /// Create substitutions from an explicit letter and digit replacement.
    pub fn new(alpha: impl Into<String>, digit: impl Into<String>) -> Self {
        Self {
            alpha: alpha.into(),
            digit: digit.into(),
        }
    }

    /// The substitutions used for values that are well-formed but invalid:
    /// every letter becomes `aaa` and every digit `999`.
    pub fn invalid() -> Self {
        Self::new("aaa", "999")
    }

    /// The letter replacement.
    pub fn alpha(&self) -> &str {
        &self.alpha
    }

    /// The digit replacement.
    pub fn digit(&self) -> &str {
        &self.digit
    }

    /// Apply the letter substitution, then the digit substitution, to `text`.
    ///
    /// ```
    /// use badbatch::corrupt::Substitutions;
    ///
    /// assert_eq!(Substitutions::default().apply("1b-C3"), "0a-a0");
    /// assert_eq!(Substitutions::invalid().apply("v1"), "aaa999");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        let letters = replace_class(text, |c| c.is_ascii_alphabetic(), &self.alpha);
        self.apply_digits(&letters)
    }

    /// Apply only the digit substitution to `text`.
    pub fn apply_digits(&self, text: &str) -> String {
        replace_class(text, |c| c.is_ascii_digit(), &self.digit)
    }
}

fn replace_class(text: &str, class: impl Fn(char) -> bool, with: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if class(c) {
            out.push_str(with);
        } else {
            out.push(c);
        }
    }
    out
}

/// Which part of the picked entries a variant corrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The values were corrupted; keys are unchanged.
    Values,
    /// The keys were letter-corrupted; values are unchanged.
    Keys,
}

/// One corrupted copy of the corruptable entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    /// What was corrupted.
    pub target: Target,
    /// The re-parsed entries, in baseline order.
    pub entries: FlatMap,
}

/// The combinatorial corruption engine and its configuration.
///
/// # Example
///
/// ```
/// use badbatch::corrupt::{Corruption, Substitutions};
///
/// let corruption = Corruption::new()
///     // Corrupt a third of the entries at a time instead of one by one.
///     .minimal(false)
///     // Also emit variants with corrupted keys.
///     .corrupt_keys(true)
///     .substitutions(Substitutions::new("b", "9"));
///
/// assert_eq!(corruption.combination_size(7), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Corruption {
    substitutions: Substitutions,
    minimal: bool,
    corrupt_keys: bool,
}

impl Default for Corruption {
    fn default() -> Self {
        Self::new()
    }
}

impl Corruption {
    /// Create a new `Corruption` with default substitutions, in minimal mode,
    /// without key corruption.
    pub fn new() -> Self {
        Self {
            substitutions: Substitutions::default(),
            minimal: true,
            corrupt_keys: false,
        }
    }

    /// Set the substitutions applied to corrupted values.
    pub fn substitutions(mut self, substitutions: Substitutions) -> Self {
        self.substitutions = substitutions;
        self
    }

    /// Set whether entries are corrupted one at a time (`true`, the default)
    /// or a third of them at a time.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    /// Set whether key-corrupted variants are emitted alongside
    /// value-corrupted ones. Defaults to `false`.
    pub fn corrupt_keys(mut self, corrupt_keys: bool) -> Self {
        self.corrupt_keys = corrupt_keys;
        self
    }

    /// The size of each enumerated combination, given `count` corruptable
    /// entries.
    pub fn combination_size(&self, count: usize) -> usize {
        if self.minimal {
            1
        } else {
            count.div_ceil(3)
        }
    }

    /// Corrupt `corruptables`, using its canonical serialization as the
    /// baseline text.
    pub fn corrupt(&self, corruptables: &FlatMap) -> Result<Vec<Variant>> {
        let baseline = codec::serialize(&Value::Object(corruptables.clone()))?;
        self.corrupt_serialized(&baseline, corruptables)
    }

    /// Corrupt `corruptables` inside the given serialized `baseline`.
    ///
    /// Every size-k combination of the entries is enumerated in lexicographic
    /// order, followed by one combination holding every entry. Each
    /// combination yields a value-corrupted variant and, when key corruption
    /// is on and the combination is a strict subset, a key-corrupted variant
    /// right after it. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// * [`Incorruptible`][crate::ErrorKind::Incorruptible] if an entry is not
    ///   a bool, number or string.
    /// * [`MissingToken`][crate::ErrorKind::MissingToken] if an entry's
    ///   `"path": value` token does not occur in `baseline`.
    /// * [`Serialization`][crate::ErrorKind::Serialization] if a mutated copy
    ///   does not parse.
    pub fn corrupt_serialized(&self, baseline: &str, corruptables: &FlatMap) -> Result<Vec<Variant>> {
        let count = corruptables.len();
        if count == 0 {
            log::debug!("nothing to corrupt");
            return Ok(vec![]);
        }

        let tokens = corruptables
            .iter()
            .map(|(path, value)| Token::new(path, value, &self.substitutions))
            .collect::<Result<Vec<_>>>()?;

        let k = self.combination_size(count);
        log::trace!("corrupting {count} entries in combinations of {k}");

        let mut variants = vec![];
        for combination in Combinations::new(count, k).chain(Some((0..count).collect())) {
            let mut valued = baseline.to_owned();
            let mut keyed = baseline.to_owned();
            let corrupt_keys = self.corrupt_keys && combination.len() < count;

            for &i in &combination {
                let token = &tokens[i];
                replace_token(&mut valued, &token.original(), &token.value_corrupted())?;
                if corrupt_keys {
                    replace_token(&mut keyed, &token.original(), &token.key_corrupted())?;
                }
            }

            variants.push(Variant {
                target: Target::Values,
                entries: reparse(&valued)?,
            });
            if corrupt_keys {
                variants.push(Variant {
                    target: Target::Keys,
                    entries: reparse(&keyed)?,
                });
            }
        }

        log::debug!("produced {} corrupted variants", variants.len());
        Ok(variants)
    }
}

/// Corrupt the digits of a number literal's mantissa.
///
/// Signs, the decimal point and the exponent are kept so the literal stays
/// numeric. If the longer mantissa overflows `f64`, the exponent is lowered
/// until the number is finite again.
fn corrupt_number(literal: &str, substitutions: &Substitutions) -> String {
    let (mantissa, exponent) = match literal.find(['e', 'E']) {
        Some(at) => (&literal[..at], &literal[at + 1..]),
        None => return substitutions.apply_digits(literal),
    };
    let mantissa = substitutions.apply_digits(mantissa);
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return format!("{mantissa}e{exponent}");
    };
    while format!("{mantissa}e{exponent}")
        .parse::<f64>()
        .is_ok_and(f64::is_infinite)
    {
        exponent -= 1;
    }
    format!("{mantissa}e{exponent}")
}

/// The serialized pieces of one `"path": value` entry.
struct Token {
    key: String,
    value: String,
    corrupted_key: String,
    corrupted_value: String,
}

impl Token {
    fn new(path: &str, value: &Value, substitutions: &Substitutions) -> Result<Self> {
        let corrupted_value = match value {
            Value::String(s) => serde_json::to_string(&substitutions.apply(s))?,
            Value::Number(n) => corrupt_number(&n.to_string(), substitutions),
            Value::Bool(b) => serde_json::to_string(&substitutions.apply(&b.to_string()))?,
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(Error::incorruptible(path));
            }
        };

        let corrupted_key = replace_class(path, |c| c.is_ascii_alphabetic(), "a");

        Ok(Self {
            key: serde_json::to_string(path)?,
            value: serde_json::to_string(value)?,
            corrupted_key: serde_json::to_string(&corrupted_key)?,
            corrupted_value,
        })
    }

    fn original(&self) -> String {
        format!("{}: {}", self.key, self.value)
    }

    fn value_corrupted(&self) -> String {
        format!("{}: {}", self.key, self.corrupted_value)
    }

    fn key_corrupted(&self) -> String {
        format!("{}: {}", self.corrupted_key, self.value)
    }
}

/// Replace the entry `token` in the pretty-printed object `text`.
///
/// The token only matches at an entry boundary: at the start of an indented
/// line and followed by `,` or the end of the line.
fn replace_token(text: &mut String, token: &str, replacement: &str) -> Result<()> {
    let needle = format!("\n  {token}");
    let mut from = 0;
    while let Some(found) = text[from..].find(&needle) {
        let start = from + found + 3;
        let end = start + token.len();
        if matches!(text.as_bytes().get(end), Some(b',') | Some(b'\n')) {
            text.replace_range(start..end, replacement);
            return Ok(());
        }
        from = from + found + 1;
    }

    log::error!("token `{token}` missing from serialized baseline");
    Err(Error::missing_token(token))
}

fn reparse(text: &str) -> Result<FlatMap> {
    match codec::deserialize(text)? {
        Value::Object(entries) => Ok(entries),
        // The baseline is always a serialized object and replacements only
        // touch single entries.
        other => unreachable!("corrupted object re-parsed as {other}"),
    }
}

/// Lexicographic `k`-combinations of the indices `0..n`.
#[derive(Clone, Debug)]
pub(crate) struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}
