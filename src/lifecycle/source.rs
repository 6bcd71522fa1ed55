//! Constructors handed to the replacement algorithms.
//!
//! A [`Source`] yields the new alternative value. Its `MAY_FAIL` flag picks the
//! converting-assignment path: a source that can fail (or run arbitrary code
//! that may panic) is built into a scratch value before the old alternative is
//! destroyed; a ready value is moved straight into the slot.

use core::convert::Infallible;

pub(crate) trait Source<T> {
    /// Error reported when construction fails without panicking.
    type Error;

    /// Whether `build` can fail, by error or by panic.
    const MAY_FAIL: bool;

    fn build(self) -> Result<T, Self::Error>;
}

/// An already constructed value.
pub(crate) struct Ready<T>(pub(crate) T);

impl<T> Source<T> for Ready<T> {
    type Error = Infallible;

    const MAY_FAIL: bool = false;

    #[inline]
    fn build(self) -> Result<T, Infallible> {
        Ok(self.0)
    }
}

/// A constructor closure that always produces a value, unless it panics.
pub(crate) struct Lazy<F>(pub(crate) F);

impl<T, F: FnOnce() -> T> Source<T> for Lazy<F> {
    type Error = Infallible;

    const MAY_FAIL: bool = true;

    #[inline]
    fn build(self) -> Result<T, Infallible> {
        Ok((self.0)())
    }
}

/// A constructor closure that reports failure through `Result`.
pub(crate) struct Fallible<F>(pub(crate) F);

impl<T, E, F: FnOnce() -> Result<T, E>> Source<T> for Fallible<F> {
    type Error = E;

    const MAY_FAIL: bool = true;

    #[inline]
    fn build(self) -> Result<T, E> {
        (self.0)()
    }
}

/// Unwraps a result whose error type is uninhabited.
#[inline(always)]
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_fail<T, S: Source<T>>(_: &S) -> bool {
        S::MAY_FAIL
    }

    #[test]
    fn only_ready_values_skip_the_scratch_path() {
        assert!(!may_fail::<u8, _>(&Ready(1_u8)));
        assert!(may_fail::<u8, _>(&Lazy(|| 1_u8)));
        assert!(may_fail::<u8, _>(&Fallible(|| Ok::<u8, ()>(1))));
    }

    #[test]
    fn fallible_passes_the_error_through() {
        let result: Result<u8, &str> = Fallible(|| Err("nope")).build();
        assert_eq!(result, Err("nope"));
        assert_eq!(infallible(Lazy(|| 7_u8).build()), 7);
    }
}
