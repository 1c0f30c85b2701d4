// XXX: Keep this documented MSRV in sync with the `rust-version` in
// `Cargo.toml`.

/*!

# Minimum Supported Rust Version

`badbatch` builds on Rust **1.80.0** and newer.

The MSRV tracks what `url` and `indexmap` require. It is only raised in a
minor release, never in a patch release, and the `fuzz/` crate is exempt
because `cargo fuzz` needs a nightly toolchain anyway.

 */
