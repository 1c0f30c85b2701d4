use super::*;
use crate::Result;

/// A combinator that keeps only the first `n` variants of another generator.
///
/// See the [`take`][Corrupt::take] method on the [`Corrupt`] trait for details
/// and example usage.
#[derive(Clone, Debug)]
pub struct Take<C> {
    pub(crate) inner: C,
    pub(crate) n: usize,
}

impl<C, T> Corrupt<T> for Take<C>
where
    C: Corrupt<T>,
    T: ?Sized,
{
    type Variant = C::Variant;

    fn corrupt(&self, baseline: &T) -> Result<Vec<Self::Variant>> {
        let mut variants = self.inner.corrupt(baseline)?;
        variants.truncate(self.n);
        Ok(variants)
    }
}
