use badbatch::{corrupt::Substitutions, mutators as m, Corrupt};
use serde_json::{json, Value};

fn body() -> Value {
    json!({
        "str_one": "value1",
        "int_one": 2,
        "list_one": ["item1", "item2"],
        "list_two": [0, 1],
        "dict_one": {"str_two": "value2", "str_three": 3},
    })
}

/// `body()` with the given top-level members replaced.
fn with(changes: Value) -> Value {
    let mut value = body();
    for (key, change) in changes.as_object().unwrap() {
        value[key] = change.clone();
    }
    value
}

#[test]
fn default_substitutions() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let bodies = m::bad_bodies().corrupt(&body())?;

    assert_eq!(
        bodies,
        [
            with(json!({"str_one": "aaaaa0"})),
            with(json!({"int_one": 0})),
            with(json!({"list_one": ["aaaa0", "item2"]})),
            with(json!({"list_one": ["item1", "aaaa0"]})),
            // `0` corrupts to itself.
            body(),
            with(json!({"list_two": [0, 0]})),
            with(json!({"dict_one": {"str_two": "aaaaa0", "str_three": 3}})),
            with(json!({"dict_one": {"str_two": "value2", "str_three": 0}})),
            json!({
                "str_one": "aaaaa0",
                "int_one": 0,
                "list_one": ["aaaa0", "aaaa0"],
                "list_two": [0, 0],
                "dict_one": {"str_two": "aaaaa0", "str_three": 0},
            }),
        ]
    );
    Ok(())
}

#[test]
fn outer_list() -> anyhow::Result<()> {
    let record = |value: &str, classifier: &str, format: &str, storage: &str| {
        json!({
            "data": [{
                "value": value,
                "classifiers": [classifier],
                "format": format,
                "storage": storage,
            }]
        })
    };

    let bodies =
        m::bad_bodies().corrupt(&record("test@example.com", "email_address", "UUID", "VOLATILE"))?;

    assert_eq!(
        bodies,
        [
            record("aaaa@aaaaaaa.aaa", "email_address", "UUID", "VOLATILE"),
            record("test@example.com", "aaaaa_aaaaaaa", "UUID", "VOLATILE"),
            record("test@example.com", "email_address", "aaaa", "VOLATILE"),
            record("test@example.com", "email_address", "UUID", "aaaaaaaa"),
            record("aaaa@aaaaaaa.aaa", "aaaaa_aaaaaaa", "aaaa", "aaaaaaaa"),
        ]
    );
    Ok(())
}

#[test]
fn custom_substitutions() -> anyhow::Result<()> {
    let bodies = m::bad_bodies()
        .substitutions(Substitutions::new("b", "9"))
        .corrupt(&body())?;

    assert_eq!(
        bodies,
        [
            with(json!({"str_one": "bbbbb9"})),
            with(json!({"int_one": 9})),
            with(json!({"list_one": ["bbbb9", "item2"]})),
            with(json!({"list_one": ["item1", "bbbb9"]})),
            with(json!({"list_two": [9, 1]})),
            with(json!({"list_two": [0, 9]})),
            with(json!({"dict_one": {"str_two": "bbbbb9", "str_three": 3}})),
            with(json!({"dict_one": {"str_two": "value2", "str_three": 9}})),
            json!({
                "str_one": "bbbbb9",
                "int_one": 9,
                "list_one": ["bbbb9", "bbbb9"],
                "list_two": [9, 9],
                "dict_one": {"str_two": "bbbbb9", "str_three": 9},
            }),
        ]
    );
    Ok(())
}

#[test]
fn file_fields_and_empty_leaves_are_kept() -> anyhow::Result<()> {
    let body = json!({"name": "x", "avatar_file": "me.png", "tags": [], "note": null});

    let bodies = m::bad_bodies().corrupt(&body)?;

    assert_eq!(
        bodies,
        [json!({"name": "a", "avatar_file": "me.png", "tags": [], "note": null})]
    );
    Ok(())
}

#[test]
fn nothing_to_corrupt() -> anyhow::Result<()> {
    assert!(m::bad_bodies().corrupt(&json!({}))?.is_empty());
    assert!(m::bad_bodies().corrupt(&json!({"upload_file": "a", "x": null}))?.is_empty());
    Ok(())
}

#[test]
fn thirds_when_not_minimal() -> anyhow::Result<()> {
    let body = json!({"a": "x", "b": "y", "c": "z", "d": "w"});

    let bodies = m::bad_bodies().minimal(false).corrupt(&body)?;

    // Every pair of the four fields, then all of them.
    assert_eq!(bodies.len(), 7);
    assert_eq!(bodies[0], json!({"a": "a", "b": "a", "c": "z", "d": "w"}));
    assert_eq!(bodies[6], json!({"a": "a", "b": "a", "c": "a", "d": "a"}));
    Ok(())
}

#[test]
fn corrupted_keys() -> anyhow::Result<()> {
    let body = json!({"id": 7, "name": "bob"});

    let bodies = m::bad_bodies().corrupt_keys(true).corrupt(&body)?;

    assert_eq!(
        bodies,
        [
            json!({"id": 0, "name": "bob"}),
            json!({"aa": 7, "name": "bob"}),
            json!({"id": 7, "name": "aaa"}),
            json!({"id": 7, "aaaa": "bob"}),
            json!({"id": 0, "name": "aaa"}),
        ]
    );
    Ok(())
}

#[test]
fn ambiguous_key_variants_are_dropped() -> anyhow::Result<()> {
    // Renaming `ab` to `aa` turns a leaf into the parent of `aa.x`.
    let body = json!({"ab": 1, "aa": {"x": 2}});

    let bodies = m::bad_bodies().corrupt_keys(true).corrupt(&body)?;

    assert_eq!(
        bodies,
        [
            json!({"ab": 0, "aa": {"x": 2}}),
            json!({"ab": 1, "aa": {"x": 0}}),
            json!({"ab": 1, "aa": {"a": 2}}),
            json!({"ab": 0, "aa": {"x": 0}}),
        ]
    );
    Ok(())
}

#[test]
fn colliding_key_variants_are_dropped() -> anyhow::Result<()> {
    // Renaming `ab` to `aa` would overwrite the existing `aa`.
    let body = json!({"ab": 1, "aa": 2});

    let bodies = m::bad_bodies().corrupt_keys(true).corrupt(&body)?;

    assert_eq!(
        bodies,
        [
            json!({"ab": 0, "aa": 2}),
            json!({"ab": 1, "aa": 0}),
            // `aa` renames to itself.
            json!({"ab": 1, "aa": 2}),
            json!({"ab": 0, "aa": 0}),
        ]
    );
    Ok(())
}

#[test]
fn variants_are_distinct() -> anyhow::Result<()> {
    let bodies = m::bad_bodies().corrupt(&json!({"a": "x", "b": "x"}))?;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            assert_ne!(a, b);
        }
    }
    Ok(())
}

#[test]
fn untouched_floats_are_bit_identical() -> anyhow::Result<()> {
    let float = -0.47043492166433787_f64;
    let bodies = m::bad_bodies().corrupt(&json!({"name": "x", "f": float}))?;

    assert_eq!(bodies[0]["name"], "a");
    assert_eq!(bodies[0]["f"].as_f64().map(f64::to_bits), Some(float.to_bits()));
    Ok(())
}

#[test]
fn keys_that_change_shape_are_rejected() -> anyhow::Result<()> {
    let err = m::bad_bodies()
        .corrupt(&json!({"1": "x", "2": "y"}))
        .unwrap_err();
    assert!(err.is_ambiguous_path(), "{err}");

    let err = m::bad_bodies()
        .corrupt(&json!({"user.name": "bob", "id": 1}))
        .unwrap_err();
    assert!(err.is_ambiguous_path(), "{err}");
    Ok(())
}
