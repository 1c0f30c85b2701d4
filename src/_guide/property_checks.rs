/*!

# Property Checks and Fuzzing

## The `check` Harness

[`check::Check`][crate::check::Check] runs a property against random object
trees and, on failure, shrinks the failing tree by dropping members and
elements and replacing values with simpler ones. It is deterministic for a
given seed, so it suits `#[test]` functions:

```
use badbatch::{check::Check, flatten, unflatten};

#[test]
fn flatten_round_trips() {
    let result = Check::new().iters(500).max_depth(3).run(|tree| {
        match unflatten(&flatten(tree)) {
            Ok(back) if back == *tree => Ok(()),
            Ok(back) => Err(format!("rebuilt as {back}")),
            Err(e) => Err(e.to_string()),
        }
    });
    assert!(result.is_ok());
}
```

Generated keys start with a letter and never contain a dot, so every
generated tree is one that flattening can represent.

## Fuzzing

For longer runs, the `fuzz/` directory holds `cargo fuzz` targets built on
[`libfuzzer-sys`](https://docs.rs/libfuzzer-sys). They feed arbitrary bytes to
the codec, flattening and URL generator and assert the same properties:

```text
$ cargo +nightly fuzz run flatten_round_trip
$ cargo +nightly fuzz run bad_urls
```

 */
