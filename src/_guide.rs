/*!

Tutorials, overviews, and etc... for the `badbatch` crate.

All the documentation that isn't API reference.

# Table of Contents

* [How Values Are Corrupted][corruption]
* [Marking the Addressable Part of a URL][url_markers]
* [Property Checks and Fuzzing][property_checks]
* [Cargo Features][cargo_features]
* [Minimum Supported Rust Version][msrv]

 */

pub mod cargo_features;
pub mod corruption;
pub mod msrv;
pub mod property_checks;
pub mod url_markers;
