//! Converting between nested value trees and flat, path-keyed maps.
//!
//! A flat path is the dot-joined sequence of object keys and array indices
//! leading to a leaf. Leaves are scalars and *empty* containers. A root that is
//! itself a leaf is stored under the empty path.
//!
//! # Example
//!
//! ```
//! use badbatch::{flatten, unflatten};
//! use serde_json::json;
//!
//! let tree = json!({"a": [1, {"b": 2}]});
//! let flat = flatten(&tree);
//! assert_eq!(serde_json::Value::Object(flat.clone()), json!({"a.0": 1, "a.1.b": 2}));
//! assert_eq!(unflatten(&flat)?, tree);
//! # Ok::<(), badbatch::Error>(())
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// An ordered map from flat paths to leaf values.
pub type FlatMap = Map<String, Value>;

/// Flatten a tree into its leaves, keyed by flat path, in depth-first order.
pub fn flatten(value: &Value) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(value, "", &mut flat);
    flat
}

fn flatten_into(value: &Value, path: &str, flat: &mut FlatMap) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(child, &join(path, key), flat);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, &join(path, &index.to_string()), flat);
            }
        }
        leaf => {
            flat.insert(path.to_owned(), leaf.clone());
        }
    }
}

fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_owned()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Rebuild a tree from a flat map.
///
/// A map holding a single entry under the empty path is a leaf root and its
/// value is returned as is. An empty map rebuilds into an empty object.
///
/// Every inner node becomes an array when all of its child segments are
/// decimal indices, and an object when none of them are. Arrays are padded
/// with `null` up to their highest index. Object keys keep the order in which
/// they were first seen.
///
/// # Errors
///
/// Returns an [`AmbiguousPath`][crate::ErrorKind::AmbiguousPath] error when
/// a node mixes index and key children, when a path is both a leaf and the
/// prefix of another path, or when two segments name the same array index.
pub fn unflatten(flat: &FlatMap) -> Result<Value> {
    if flat.len() == 1 {
        if let Some(value) = flat.get("") {
            return Ok(value.clone());
        }
    }

    let mut root = Node::Branch(IndexMap::new());
    for (path, value) in flat {
        root.insert(path, value)?;
    }
    root.build("")
}

/// Check that `value` keeps its shape through [`flatten`] and [`unflatten`].
///
/// Object keys made only of digits, or containing dots, flatten into paths
/// that rebuild as arrays or as deeper objects. Such trees are rejected with
/// an [`AmbiguousPath`][crate::ErrorKind::AmbiguousPath] error naming the
/// first offending key.
pub(crate) fn ensure_round_trip(value: &Value, flat: &FlatMap) -> Result<()> {
    if unflatten(flat)? == *value {
        return Ok(());
    }
    Err(Error::ambiguous_path(
        misleading_key(value, "").unwrap_or_default(),
    ))
}

fn misleading_key(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, child)| {
            let child_path = join(path, key);
            if key.is_empty() || key.contains('.') || array_index(key).is_some() {
                Some(child_path)
            } else {
                misleading_key(child, &child_path)
            }
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(index, child)| misleading_key(child, &join(path, &index.to_string()))),
        _ => None,
    }
}

/// A path trie, built in the first pass of [`unflatten`].
enum Node<'a> {
    Leaf(&'a Value),
    Branch(IndexMap<&'a str, Node<'a>>),
}

impl<'a> Node<'a> {
    fn insert(&mut self, path: &'a str, value: &'a Value) -> Result<()> {
        let mut node = self;
        let mut segments = path.split('.').peekable();
        let mut start = 0usize;

        while let Some(segment) = segments.next() {
            let children = match node {
                Node::Branch(children) => children,
                Node::Leaf(_) => {
                    return Err(Error::ambiguous_path(&path[..start.saturating_sub(1)]))
                }
            };

            if segments.peek().is_none() {
                if children.contains_key(segment) {
                    return Err(Error::ambiguous_path(path));
                }
                children.insert(segment, Node::Leaf(value));
                return Ok(());
            }

            node = children
                .entry(segment)
                .or_insert_with(|| Node::Branch(IndexMap::new()));
            start += segment.len() + 1;
        }

        Ok(())
    }

    fn build(self, path: &str) -> Result<Value> {
        let children = match self {
            Node::Leaf(value) => return Ok(value.clone()),
            Node::Branch(children) => children,
        };

        let indices = children
            .keys()
            .filter(|segment| array_index(segment).is_some())
            .count();

        if indices > 0 && indices < children.len() {
            return Err(Error::ambiguous_path(path));
        }

        if children.is_empty() || indices == 0 {
            let mut map = Map::with_capacity(children.len());
            for (segment, child) in children {
                let value = child.build(&join(path, segment))?;
                map.insert(segment.to_owned(), value);
            }
            return Ok(Value::Object(map));
        }

        let len = children
            .keys()
            .filter_map(|segment| array_index(segment))
            .max()
            .map_or(0, |max| max + 1);
        let mut slots: Vec<Option<Value>> = vec![None; len];
        for (segment, child) in children {
            let child_path = join(path, segment);
            let index = array_index(segment).ok_or_else(|| Error::ambiguous_path(&child_path))?;
            if slots[index].is_some() {
                return Err(Error::ambiguous_path(child_path));
            }
            slots[index] = Some(child.build(&child_path)?);
        }
        Ok(Value::Array(
            slots.into_iter().map(|slot| slot.unwrap_or(Value::Null)).collect(),
        ))
    }
}

/// The array index named by `segment`, if it is made of decimal digits only.
fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(value: Value) -> FlatMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn sparse_indices_are_padded_with_null() {
        let tree = unflatten(&flat(json!({"a.2": "c", "a.0": "a"}))).unwrap();
        assert_eq!(tree, json!({"a": ["a", null, "c"]}));
    }

    #[test]
    fn mixed_children_are_ambiguous() {
        let err = unflatten(&flat(json!({"a.0": 1, "a.b": 2}))).unwrap_err();
        match err.kind() {
            crate::ErrorKind::AmbiguousPath { path } => assert_eq!(path, "a"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn leaf_used_as_prefix_is_ambiguous() {
        let err = unflatten(&flat(json!({"a": 1, "a.b": 2}))).unwrap_err();
        assert!(err.is_ambiguous_path());

        let err = unflatten(&flat(json!({"a.b": 2, "a": 1}))).unwrap_err();
        assert!(err.is_ambiguous_path());
    }

    #[test]
    fn aliased_indices_are_ambiguous() {
        let err = unflatten(&flat(json!({"a.1": 1, "a.01": 2}))).unwrap_err();
        assert!(err.is_ambiguous_path());
    }

    #[test]
    fn integer_keys_do_not_round_trip() {
        let value = json!({"1": "x", "2": "y"});
        let err = ensure_round_trip(&value, &flatten(&value)).unwrap_err();
        match err.kind() {
            crate::ErrorKind::AmbiguousPath { path } => assert_eq!(path, "1"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn dotted_keys_do_not_round_trip() {
        let value = json!({"id": 1, "meta": {"user.name": "bob"}});
        let err = ensure_round_trip(&value, &flatten(&value)).unwrap_err();
        match err.kind() {
            crate::ErrorKind::AmbiguousPath { path } => assert_eq!(path, "meta.user.name"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn plain_trees_round_trip() {
        let value = json!({"a": [1, {"b": []}], "c": {}, "d": null});
        assert!(ensure_round_trip(&value, &flatten(&value)).is_ok());
    }

    #[test]
    fn empty_map_is_an_empty_object() {
        assert_eq!(unflatten(&FlatMap::new()).unwrap(), json!({}));
    }
}
