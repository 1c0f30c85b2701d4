use badbatch::{corrupt::Substitutions, mutators as m, Corrupt};

#[test]
fn marked_url() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let urls = m::bad_urls().corrupt("https://httpbin.org;/houseId/1b/2c?param=value1&another_param=2")?;

    assert_eq!(
        urls,
        [
            "https://httpbin.org/aaaaaaa/1b/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/0a/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/0a?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/2c?param=aaaaa0&another_param=2",
            "https://httpbin.org/houseId/1b/2c?param=value1&another_param=0",
            "https://httpbin.org/aaaaaaa/0a/0a?param=aaaaa0&another_param=0",
        ]
    );
    Ok(())
}

#[test]
fn marked_url_with_numeric_segment() -> anyhow::Result<()> {
    let urls = m::bad_urls().corrupt("https://httpbin.org;/houseId/1b/2?param=value1&another_param=2")?;

    assert_eq!(
        urls,
        [
            "https://httpbin.org/aaaaaaa/1b/2?param=value1&another_param=2",
            "https://httpbin.org/houseId/0a/2?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/0?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/2?param=aaaaa0&another_param=2",
            "https://httpbin.org/houseId/1b/2?param=value1&another_param=0",
            "https://httpbin.org/aaaaaaa/0a/0?param=aaaaa0&another_param=0",
        ]
    );
    Ok(())
}

#[test]
fn unmarked_url() -> anyhow::Result<()> {
    let urls = m::bad_urls().corrupt("https://httpbin.org/houseId/1b/2c?param=value1&another_param=2")?;

    assert_eq!(
        urls,
        [
            "https://httpbin.org/aaaaaaa/1b/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/0a/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/0a?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/2c?param=aaaaa0&another_param=2",
            "https://httpbin.org/houseId/1b/2c?param=value1&another_param=0",
            "https://httpbin.org/aaaaaaa/0a/0a?param=aaaaa0&another_param=0",
        ]
    );
    Ok(())
}

#[test]
fn unmarked_url_with_numeric_segment() -> anyhow::Result<()> {
    let urls = m::bad_urls().corrupt("https://httpbin.org/houseId/1b/2?param=value1&another_param=2")?;

    assert_eq!(
        urls,
        [
            "https://httpbin.org/aaaaaaa/1b/2?param=value1&another_param=2",
            "https://httpbin.org/houseId/0a/2?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/0?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/2?param=aaaaa0&another_param=2",
            "https://httpbin.org/houseId/1b/2?param=value1&another_param=0",
            "https://httpbin.org/aaaaaaa/0a/0?param=aaaaa0&another_param=0",
        ]
    );
    Ok(())
}

#[test]
fn query_params_left_alone() -> anyhow::Result<()> {
    let urls = m::bad_urls()
        .corrupt_query_params(false)
        .corrupt("https://httpbin.org/houseId/1b/2c?param=value1&another_param=2")?;

    assert_eq!(
        urls,
        [
            "https://httpbin.org/aaaaaaa/1b/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/0a/2c?param=value1&another_param=2",
            "https://httpbin.org/houseId/1b/0a?param=value1&another_param=2",
            "https://httpbin.org/aaaaaaa/0a/0a?param=value1&another_param=2",
        ]
    );
    Ok(())
}

#[test]
fn no_query() -> anyhow::Result<()> {
    let expected = [
        "https://httpbin.org/aaaaaaa/1b/2c",
        "https://httpbin.org/houseId/0a/2c",
        "https://httpbin.org/houseId/1b/0a",
        "https://httpbin.org/aaaaaaa/0a/0a",
    ];

    assert_eq!(m::bad_urls().corrupt("https://httpbin.org;/houseId/1b/2c")?, expected);
    assert_eq!(m::bad_urls().corrupt("https://httpbin.org/houseId/1b/2c")?, expected);
    Ok(())
}

#[test]
fn invalid_substitutions() -> anyhow::Result<()> {
    let urls = m::bad_urls()
        .substitutions(Substitutions::invalid())
        .corrupt("https://h.org;/v1/items?page=2")?;

    assert_eq!(
        urls,
        [
            "https://h.org/aaa999/items?page=2",
            "https://h.org/v1/aaaaaaaaaaaaaaa?page=2",
            "https://h.org/v1/items?page=999",
            "https://h.org/aaa999/aaaaaaaaaaaaaaa?page=999",
        ]
    );
    Ok(())
}

#[test]
fn repeated_params_are_corrupted_independently() -> anyhow::Result<()> {
    let urls = m::bad_urls().corrupt("https://h.org;/s?tag=a1&q=x&tag=b2")?;

    assert_eq!(
        urls,
        [
            "https://h.org/a?tag=a1&tag=b2&q=x",
            "https://h.org/s?tag=a0&tag=b2&q=x",
            "https://h.org/s?tag=a1&tag=a0&q=x",
            "https://h.org/s?tag=a1&tag=b2&q=a",
            "https://h.org/a?tag=a0&tag=a0&q=a",
        ]
    );
    Ok(())
}

#[test]
fn never_the_clean_url() -> anyhow::Result<()> {
    // Nothing here changes under the default substitutions.
    assert!(m::bad_urls().corrupt("https://h.org;/0/_?n=0")?.is_empty());
    assert!(m::bad_urls().corrupt("https://h.org/")?.is_empty());
    Ok(())
}

#[test]
fn relative_urls_need_a_marker() {
    let err = m::bad_urls().corrupt("/houses/1").unwrap_err();
    assert!(err.is_invalid_url());
}
