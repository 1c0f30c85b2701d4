#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod _guide;
pub mod batch;
pub mod check;
pub mod codec;
pub mod corrupt;
pub mod diff;
pub mod error;
mod flat;
mod log;
pub mod mutators;
mod rng;

pub use batch::{generate_batch, BatchOptions, RequestBody, RequestDescriptor};
pub use diff::{compare_dictionaries, CompareOptions, MismatchReport};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use flat::{flatten, unflatten, FlatMap};
pub use rng::Rng;

/// A generator of corrupted variants of a baseline value.
///
/// Implementations are deterministic: the same generator applied to the same
/// baseline always returns the same variants in the same order. Generators are
/// configured up front with builder methods and then applied to any number of
/// baselines.
///
/// # Example
///
/// ```
/// use badbatch::{corrupt::Substitutions, mutators as m, Corrupt};
/// use serde_json::json;
///
/// let generator = m::bad_bodies().substitutions(Substitutions::invalid());
///
/// for body in [json!({"id": 7}), json!({"name": "x1"})] {
///     for bad in generator.corrupt(&body)? {
///         println!("{bad}");
///     }
/// }
///
/// // Output:
/// //
/// //     {"id":999}
/// //     {"name":"aaa999"}
/// # Ok::<(), badbatch::Error>(())
/// ```
pub trait Corrupt<T>
where
    T: ?Sized,
{
    /// The type of the produced variants.
    type Variant;

    // Required methods.

    /// Produce every corrupted variant of `baseline`, in a stable order.
    ///
    /// Returns an empty list when `baseline` has nothing to corrupt.
    fn corrupt(&self, baseline: &T) -> Result<Vec<Self::Variant>>;

    // Provided methods.

    /// Keep only the first `n` variants produced by this generator.
    ///
    /// # Example
    ///
    /// ```
    /// use badbatch::{mutators as m, Corrupt};
    /// use serde_json::json;
    ///
    /// let headers = json!({"Authorization": "Bearer abc123", "X-Trace": "7"});
    /// let bad = m::bad_bodies().take(1).corrupt(&headers)?;
    ///
    /// assert_eq!(bad, [json!({"Authorization": "aaaaaa aaa000", "X-Trace": "7"})]);
    /// # Ok::<(), badbatch::Error>(())
    /// ```
    #[inline]
    #[must_use = "generator combinators do nothing until you call their `corrupt` method"]
    fn take(self, n: usize) -> mutators::Take<Self>
    where
        Self: Sized,
    {
        mutators::Take { inner: self, n }
    }

    /// Borrows a generator, rather than consuming it.
    ///
    /// This is useful to apply combinators while still retaining ownership of
    /// the original generator.
    #[inline]
    fn by_ref(&self) -> &Self
    where
        Self: Sized,
    {
        self
    }
}

fn _static_assert_object_safety(_: &dyn Corrupt<serde_json::Value, Variant = serde_json::Value>) {}

impl<C, T> Corrupt<T> for &C
where
    C: Corrupt<T>,
    T: ?Sized,
{
    type Variant = C::Variant;

    fn corrupt(&self, baseline: &T) -> Result<Vec<Self::Variant>> {
        (**self).corrupt(baseline)
    }
}
