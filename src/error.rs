//! Error types for checked access and fallible construction.

use core::fmt;

/// A checked access named an alternative that is not live.
///
/// Raised by index- and type-based accessors when the requested alternative is
/// not the held one, and by visitation when an operand is valueless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadAccess {
    requested: Option<usize>,
    held: Option<usize>,
}

impl BadAccess {
    pub(crate) const fn mismatch(requested: usize, held: Option<usize>) -> Self {
        Self {
            requested: Some(requested),
            held,
        }
    }

    pub(crate) const fn valueless() -> Self {
        Self {
            requested: None,
            held: None,
        }
    }

    /// The alternative index that was asked for, if the access named one.
    pub const fn requested(&self) -> Option<usize> {
        self.requested
    }

    /// The alternative index that was live, or `None` if the variant was valueless.
    pub const fn held(&self) -> Option<usize> {
        self.held
    }

    /// Whether the access failed because the variant was valueless.
    pub const fn is_valueless(&self) -> bool {
        self.held.is_none()
    }
}

impl fmt::Display for BadAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.requested, self.held) {
            (Some(requested), Some(held)) => write!(
                f,
                "bad variant access: requested alternative {requested}, variant holds alternative {held}"
            ),
            (Some(requested), None) => write!(
                f,
                "bad variant access: requested alternative {requested}, variant is valueless"
            ),
            (None, _) => f.write_str("bad variant access: variant is valueless"),
        }
    }
}

impl std::error::Error for BadAccess {}

/// Checked access to an empty [`Optional`](crate::Optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BadOptionalAccess;

impl fmt::Display for BadOptionalAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad optional access")
    }
}

impl std::error::Error for BadOptionalAccess {}

/// A fallible constructor failed while replacing an alternative.
///
/// Carries the target alternative index and the constructor's own error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionFailure<E> {
    index: usize,
    error: E,
}

impl<E> ConstructionFailure<E> {
    pub(crate) const fn new(index: usize, error: E) -> Self {
        Self { index, error }
    }

    /// Index of the alternative that failed to construct.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The constructor's error.
    pub const fn error(&self) -> &E {
        &self.error
    }

    /// Unwraps the constructor's error.
    pub fn into_error(self) -> E {
        self.error
    }
}

impl<E: fmt::Display> fmt::Display for ConstructionFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alternative {} failed to construct: {}", self.index, self.error)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ConstructionFailure<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn bad_access_messages() {
        assert_eq!(
            BadAccess::mismatch(1, Some(0)).to_string(),
            "bad variant access: requested alternative 1, variant holds alternative 0"
        );
        assert_eq!(
            BadAccess::mismatch(2, None).to_string(),
            "bad variant access: requested alternative 2, variant is valueless"
        );
        assert_eq!(BadAccess::valueless().to_string(), "bad variant access: variant is valueless");
        assert!(BadAccess::mismatch(2, None).is_valueless());
        assert!(!BadAccess::mismatch(2, Some(1)).is_valueless());
    }

    #[test]
    fn bad_optional_access_message() {
        assert_eq!(BadOptionalAccess.to_string(), "bad optional access");
    }

    #[test]
    fn construction_failure_exposes_source() {
        let failure = ConstructionFailure::new(1, BadOptionalAccess);
        assert_eq!(failure.index(), 1);
        assert_eq!(failure.to_string(), "alternative 1 failed to construct: bad optional access");
        let source = failure.source().expect("source");
        assert_eq!(source.to_string(), "bad optional access");
    }
}
