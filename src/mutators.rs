//! The provided set of [`Corrupt`] implementations and combinators.
//!
//! It is idiomatic to import this module with the alias `m`:
//!
//! ```rust
//! use badbatch::mutators as m;
//! ```

use super::*;

mod bodies;
mod combinators;
mod unsafe_bodies;
mod urls;

pub use bodies::*;
pub use combinators::*;
pub use unsafe_bodies::*;
pub use urls::*;

/// Whether a flat path names a file field.
///
/// File fields are never corrupted and never receive injection payloads.
pub(crate) fn is_file_path(path: &str) -> bool {
    path.contains("file")
}
