//! Structural comparison of two JSON values.
//!
//! Both values are [flattened][crate::flatten] and compared path by path. The
//! result is a [`MismatchReport`] that is empty when the values match.
//!
//! # Example
//!
//! ```
//! use badbatch::{compare_dictionaries, CompareOptions};
//! use serde_json::json;
//!
//! let expected = json!({"id": 1, "user": {"name": "Bob", "seen": "2024-01-01"}});
//! let actual = json!({"id": 1.0, "user": {"name": "bob", "seen": "2024-06-30"}});
//!
//! let options = CompareOptions::new().skipped_keys(["seen"]).normalize(true);
//! let report = compare_dictionaries(&expected, &actual, &options);
//!
//! assert!(report.is_match());
//! assert_eq!(serde_json::to_value(&report).unwrap(), json!({}));
//! ```

use crate::{flatten, log};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for [`compare_dictionaries`].
#[derive(Clone, Debug, Default)]
pub struct CompareOptions {
    skipped_keys: Vec<String>,
    exclusive_keys: Vec<String>,
    normalize: bool,
}

impl CompareOptions {
    /// Create new, default options that compare every path exactly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every path containing one of `patterns`.
    pub fn skipped_keys<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.skipped_keys = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Skip every path that contains none of `patterns`.
    ///
    /// An empty set of patterns restricts nothing.
    pub fn exclusive_keys<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.exclusive_keys = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether string values are lowercased before being compared.
    ///
    /// Defaults to `false`.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn skips(&self, path: &str) -> bool {
        self.skipped_keys.iter().any(|p| path.contains(p.as_str()))
            || (!self.exclusive_keys.is_empty()
                && !self.exclusive_keys.iter().any(|p| path.contains(p.as_str())))
    }
}

/// Paths present on only one side of a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMismatch {
    /// Paths of the first value missing from the second.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub f1_not_in_f2: Vec<String>,
    /// Paths of the second value missing from the first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub f2_not_in_f1: Vec<String>,
}

/// A path present on both sides with different values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueMismatch {
    /// The flat path.
    pub key: String,
    /// The value in the first input.
    pub d1: Value,
    /// The value in the second input.
    pub d2: Value,
}

/// The differences found by [`compare_dictionaries`].
///
/// Every field is omitted from the serialized form when empty, so a full
/// match serializes to `{}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MismatchReport {
    /// Paths present on one side only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<KeyMismatch>,
    /// Paths whose values differ, in the first input's order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueMismatch>,
    /// Paths left out of the comparison. Only reported along with a mismatch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_keys: Vec<String>,
}

impl MismatchReport {
    /// Whether the compared values matched.
    pub fn is_match(&self) -> bool {
        self.keys.is_none() && self.values.is_empty()
    }

    /// Whether the report holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.is_match() && self.skipped_keys.is_empty()
    }
}

/// Compare `d1` and `d2` path by path.
///
/// Numbers compare by value, so `1` matches `1.0`. Reported values are the
/// compared ones, i.e. lowercased when [normalizing][CompareOptions::normalize].
///
/// ```
/// use badbatch::{compare_dictionaries, CompareOptions};
/// use serde_json::json;
///
/// let report = compare_dictionaries(&json!({"a": 1}), &json!({"a": 2}), &CompareOptions::new());
/// assert_eq!(
///     serde_json::to_value(&report).unwrap(),
///     json!({"values": [{"key": "a", "d1": 1, "d2": 2}]})
/// );
///
/// let options = CompareOptions::new().skipped_keys(["a"]);
/// assert!(compare_dictionaries(&json!({"a": 1}), &json!({"a": 2}), &options).is_empty());
/// ```
pub fn compare_dictionaries(d1: &Value, d2: &Value, options: &CompareOptions) -> MismatchReport {
    let flat1 = flatten(d1);
    let flat2 = flatten(d2);

    let skipped: IndexSet<&str> = flat1
        .keys()
        .chain(flat2.keys())
        .map(String::as_str)
        .filter(|path| options.skips(path))
        .collect();

    let only_in = |a: &serde_json::Map<String, Value>, b: &serde_json::Map<String, Value>| {
        a.keys()
            .filter(|path| !skipped.contains(path.as_str()) && !b.contains_key(*path))
            .cloned()
            .collect::<Vec<_>>()
    };
    let keys = KeyMismatch {
        f1_not_in_f2: only_in(&flat1, &flat2),
        f2_not_in_f1: only_in(&flat2, &flat1),
    };

    let mut values = vec![];
    for (path, v1) in &flat1 {
        if skipped.contains(path.as_str()) {
            continue;
        }
        let Some(v2) = flat2.get(path) else {
            continue;
        };
        let (v1, v2) = if options.normalize {
            (lowercase(v1), lowercase(v2))
        } else {
            (v1.clone(), v2.clone())
        };
        if !same(&v1, &v2) {
            values.push(ValueMismatch {
                key: path.clone(),
                d1: v1,
                d2: v2,
            });
        }
    }

    let mut report = MismatchReport {
        keys: (!keys.f1_not_in_f2.is_empty() || !keys.f2_not_in_f1.is_empty()).then_some(keys),
        values,
        skipped_keys: vec![],
    };
    if !report.is_match() {
        report.skipped_keys = skipped.into_iter().map(str::to_owned).collect();
        log::debug!(
            "{} mismatched values, {} skipped paths",
            report.values.len(),
            report.skipped_keys.len()
        );
    }
    report
}

fn lowercase(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other.clone(),
    }
}

fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_by_value() {
        assert!(same(&json!(1), &json!(1.0)));
        assert!(same(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!same(&json!(-1), &json!(1)));
        assert!(!same(&json!(1), &json!("1")));
    }

    #[test]
    fn exclusive_patterns_skip_everything_else() {
        let options = CompareOptions::new().exclusive_keys(["id"]);
        assert!(!options.skips("user.id"));
        assert!(options.skips("user.name"));
        assert!(!CompareOptions::new().exclusive_keys(Vec::<String>::new()).skips("x"));
    }
}
