use super::*;
use crate::corrupt::{Corruption, Substitutions, Target};
use crate::{log, FlatMap, Result, ResultExt};
use indexmap::IndexMap;
use serde_json::Value;

/// A generator of corrupted request bodies.
///
/// Bodies whose keys would not survive flattening, such as keys made only of
/// digits or keys containing dots, are rejected with an
/// [`AmbiguousPath`][crate::ErrorKind::AmbiguousPath] error.
///
/// Every scalar leaf of the body whose path does not mention `file` is a
/// corruption target. Other leaves (nulls, empty containers, file fields) are
/// copied unchanged into every variant, at their original position.
///
/// See the [`bad_bodies()`] function to create new instances and for example
/// usage.
#[derive(Clone, Debug, Default)]
pub struct BadBodies {
    corruption: Corruption,
}

/// Create a new bad body generator with default substitutions, in minimal
/// mode, without key corruption.
///
/// # Example
///
/// ```
/// use badbatch::{mutators as m, Corrupt};
/// use serde_json::json;
///
/// let bodies = m::bad_bodies().corrupt(&json!({"str_one": "value1", "int_one": 2}))?;
///
/// assert_eq!(
///     bodies,
///     [
///         json!({"str_one": "aaaaa0", "int_one": 2}),
///         json!({"str_one": "value1", "int_one": 0}),
///         json!({"str_one": "aaaaa0", "int_one": 0}),
///     ]
/// );
/// # Ok::<(), badbatch::Error>(())
/// ```
pub fn bad_bodies() -> BadBodies {
    BadBodies {
        corruption: Corruption::new(),
    }
}

impl BadBodies {
    /// Set the substitutions applied to corrupted values.
    pub fn substitutions(mut self, substitutions: Substitutions) -> Self {
        self.corruption = self.corruption.substitutions(substitutions);
        self
    }

    /// Set whether fields are corrupted one at a time (the default) or a
    /// third of them at a time.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.corruption = self.corruption.minimal(minimal);
        self
    }

    /// Set whether variants with letter-corrupted keys are also produced.
    pub fn corrupt_keys(mut self, corrupt_keys: bool) -> Self {
        self.corruption = self.corruption.corrupt_keys(corrupt_keys);
        self
    }
}

impl Corrupt<Value> for BadBodies {
    type Variant = Value;

    fn corrupt(&self, body: &Value) -> Result<Vec<Value>> {
        let flat = crate::flatten(body);
        crate::flat::ensure_round_trip(body, &flat)?;
        let corruptables: FlatMap = flat
            .iter()
            .filter(|(path, value)| is_corruptable(path, value))
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect();

        let mut unique = IndexMap::new();
        for variant in self.corruption.corrupt(&corruptables)? {
            if variant.entries.len() < corruptables.len() {
                log::debug!("dropping key-corrupted body with colliding keys");
                continue;
            }

            let merged = merge(&flat, variant.entries);
            let tree = match variant.target {
                Target::Values => crate::unflatten(&merged)?,
                // Renamed keys may collide with the shape of their neighbours.
                Target::Keys => match crate::unflatten(&merged).ignore_ambiguous()? {
                    Some(tree) => tree,
                    None => {
                        log::debug!("dropping key-corrupted body with ambiguous paths");
                        continue;
                    }
                },
            };

            let identity = serde_json::to_string(&tree)?;
            unique.entry(identity).or_insert(tree);
        }

        log::debug!("generated {} distinct bad bodies", unique.len());
        Ok(unique.into_values().collect())
    }
}

fn is_corruptable(path: &str, value: &Value) -> bool {
    !is_file_path(path) && matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Put corrupted entries back in the slots of the corruptable entries of
/// `flat`, keeping everything else where it was.
fn merge(flat: &FlatMap, corrupted: FlatMap) -> FlatMap {
    let mut corrupted = corrupted.into_iter();
    let mut merged = FlatMap::with_capacity(flat.len());
    for (path, value) in flat {
        if is_corruptable(path, value) {
            if let Some((path, value)) = corrupted.next() {
                merged.insert(path, value);
            }
        } else {
            merged.insert(path.clone(), value.clone());
        }
    }
    merged
}
