#![no_main]
use badbatch::{mutators as m, Corrupt};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(url) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(urls) = m::bad_urls().corrupt(url) else {
        return;
    };

    let clean = url.replace(';', "");
    let mut seen = std::collections::HashSet::new();
    for bad in &urls {
        assert_ne!(*bad, clean);
        assert!(seen.insert(bad), "duplicate bad url {bad}");
    }
});
