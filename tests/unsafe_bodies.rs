use badbatch::{
    mutators::{self as m, GermFamily, GERMS},
    Corrupt,
};
use serde_json::json;

#[test]
fn single_field_gets_every_germ() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let bodies = m::unsafe_bodies().corrupt(&json!({"name": "bob", "age": 30}))?;

    let expected: Vec<_> = GERMS
        .iter()
        .map(|germ| json!({"name": format!("bob {}", germ.payload), "age": 30}))
        .collect();
    assert_eq!(bodies, expected);
    Ok(())
}

#[test]
fn every_target_gets_the_same_germ() -> anyhow::Result<()> {
    let body = json!({"user": "bob", "pass": "hunter2", "avatar_file": "me.png"});

    let bodies = m::unsafe_bodies().corrupt(&body)?;

    // 14 usable pairs of germs, two bodies each.
    assert_eq!(bodies.len(), 28);
    assert_eq!(
        bodies[0],
        json!({"user": "bob  '--", "pass": "hunter2  '--", "avatar_file": "me.png"})
    );
    assert_eq!(
        bodies[1],
        json!({"user": "bob '+OR+1=1--", "pass": "hunter2 '+OR+1=1--", "avatar_file": "me.png"})
    );
    assert!(bodies.iter().all(|b| b["avatar_file"] == "me.png"));
    Ok(())
}

#[test]
fn nothing_to_infect() -> anyhow::Result<()> {
    assert!(m::unsafe_bodies().corrupt(&json!({"n": 1, "ok": true}))?.is_empty());
    assert!(m::unsafe_bodies().corrupt(&json!(["a", "b"]))?.is_empty());
    assert!(m::unsafe_bodies().corrupt(&json!("a"))?.is_empty());
    Ok(())
}

#[test]
fn catalog_families() {
    let families: Vec<_> = GERMS.iter().map(|g| g.family).collect();
    assert_eq!(
        families,
        [
            GermFamily::Condition,
            GermFamily::Condition,
            GermFamily::Condition,
            GermFamily::Query,
            GermFamily::Query,
            GermFamily::Query,
        ]
    );
}

#[test]
fn too_many_fields_for_the_catalog() -> anyhow::Result<()> {
    let body = json!({"a": "1", "b": "2", "c": "3", "d": "4", "e": "5", "f": "6"});
    assert!(m::unsafe_bodies().corrupt(&body)?.is_empty());
    Ok(())
}
