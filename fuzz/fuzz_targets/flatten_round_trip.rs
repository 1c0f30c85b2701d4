#![no_main]
use badbatch::{codec, flatten, unflatten, ResultExt};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Whether every key can be a flat path segment without being mistaken for
/// an index or splitting in two.
fn path_safe(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().all(|(key, child)| {
            !key.is_empty()
                && !key.contains('.')
                && !key.bytes().all(|b| b.is_ascii_digit())
                && path_safe(child)
        }),
        Value::Array(items) => items.iter().all(path_safe),
        _ => true,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tree) = codec::deserialize(text) else {
        return;
    };

    // The canonical text always parses back to the same tree.
    let pretty = codec::serialize(&tree).unwrap();
    assert_eq!(codec::deserialize(&pretty).unwrap(), tree);

    // Arbitrary keys may collide once flattened, but never panic.
    let flat = flatten(&tree);
    let back = unflatten(&flat).ignore_ambiguous().unwrap();

    if path_safe(&tree) {
        assert_eq!(back, Some(tree));
    }
});
