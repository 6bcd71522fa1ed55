//! An optional value built on a two-alternative variant.
//!
//! `Optional<T>` wraps `Variant![Monostate, T]`: alternative 0 is the empty
//! state, alternative 1 holds the value. Every operation that can destroy or
//! construct a `T` runs under a reset guard, so a failing or panicking
//! constructor leaves the optional empty. It is never observably valueless.

mod guard;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use self::guard::{ResetGuard, Slot};
use crate::error::{BadOptionalAccess, ConstructionFailure};
use crate::monostate::Monostate;

/// An optional value: empty, or holding one `T`.
///
/// ```rust
/// use variant::Optional;
///
/// let mut o: Optional<i32> = Optional::new();
/// assert!(o.value().is_err());
/// assert_eq!(o.value_or(7), 7);
///
/// o.emplace(5);
/// assert_eq!(o.value(), Ok(&5));
/// ```
pub struct Optional<T> {
    inner: Slot<T>,
}

impl<T> Optional<T> {
    /// An empty optional.
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Slot::in_place::<0>(Monostate),
        }
    }

    /// An optional holding `value`.
    #[inline]
    pub fn some(value: T) -> Self {
        Self {
            inner: Slot::in_place::<1>(value),
        }
    }

    /// An optional holding the result of `make`.
    #[inline]
    pub fn some_with<F: FnOnce() -> T>(make: F) -> Self {
        Self::some(make())
    }

    /// Whether a value is present.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.inner.holds::<1>()
    }

    /// Whether the optional is empty.
    #[inline]
    pub fn is_none(&self) -> bool {
        !self.has_value()
    }

    /// Checked reference to the value.
    ///
    /// # Errors
    /// [`BadOptionalAccess`] if the optional is empty.
    #[inline]
    pub fn value(&self) -> Result<&T, BadOptionalAccess> {
        self.inner.get_if::<1>().ok_or(BadOptionalAccess)
    }

    /// Checked mutable reference to the value.
    ///
    /// # Errors
    /// [`BadOptionalAccess`] if the optional is empty.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
        self.inner.get_if_mut::<1>().ok_or(BadOptionalAccess)
    }

    /// Moves the value out.
    ///
    /// # Errors
    /// [`BadOptionalAccess`] if the optional is empty.
    #[inline]
    pub fn into_value(self) -> Result<T, BadOptionalAccess> {
        self.inner.into_inner::<1>().map_err(|_| BadOptionalAccess)
    }

    /// A copy of the value, or `default` if empty.
    #[inline]
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        self.as_ref().map_or(default, T::clone)
    }

    /// A copy of the value, or the result of `default` if empty.
    #[inline]
    pub fn value_or_else<F: FnOnce() -> T>(&self, default: F) -> T
    where
        T: Clone,
    {
        self.as_ref().map_or_else(default, T::clone)
    }

    /// The value, or `default` if empty.
    #[inline]
    pub fn into_value_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    /// The value by reference, as a standard [`Option`].
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        self.inner.get_if::<1>()
    }

    /// The value by mutable reference, as a standard [`Option`].
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.inner.get_if_mut::<1>()
    }

    /// Converts into a standard [`Option`].
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.inner.into_inner::<1>().ok()
    }

    /// Reference to the value without checking for presence.
    ///
    /// # Safety
    /// A value must be present.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &T {
        // SAFETY: forwarded contract.
        unsafe { self.inner.get_unchecked::<1>() }
    }

    /// Mutable reference to the value without checking for presence.
    ///
    /// # Safety
    /// A value must be present.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        // SAFETY: forwarded contract.
        unsafe { self.inner.get_unchecked_mut::<1>() }
    }

    /// Destroys any current value and stores `value`.
    #[inline]
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(|| value)
    }

    /// Destroys any current value and stores the result of `make`.
    ///
    /// If `make` panics, the optional is left empty.
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        let mut guard = ResetGuard::arm(&mut self.inner);
        guard.slot().emplace_with::<1, _>(make);
        guard.disarm();
        // SAFETY: the emplace above completed, so the value is present.
        unsafe { self.get_unchecked_mut() }
    }

    /// Destroys any current value and stores the result of a fallible
    /// constructor.
    ///
    /// # Errors
    /// If `make` fails, the optional is left empty and its error returned.
    pub fn try_emplace_with<E, F>(&mut self, make: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut guard = ResetGuard::arm(&mut self.inner);
        guard
            .slot()
            .try_emplace_with::<1, _, _>(make)
            .map_err(ConstructionFailure::into_error)?;
        guard.disarm();
        // SAFETY: the emplace above succeeded, so the value is present.
        Ok(unsafe { self.get_unchecked_mut() })
    }

    /// Assigns `value`, in place if a value is already present.
    pub fn set(&mut self, value: T) -> &mut T {
        let mut guard = ResetGuard::arm(&mut self.inner);
        guard.slot().set::<1>(value);
        guard.disarm();
        // SAFETY: the assignment above completed, so the value is present.
        unsafe { self.get_unchecked_mut() }
    }

    /// Returns the value, inserting the result of `make` first if empty.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        if self.has_value() {
            // SAFETY: just checked.
            unsafe { self.get_unchecked_mut() }
        } else {
            self.emplace_with(make)
        }
    }

    /// Destroys any value, leaving the optional empty.
    pub fn reset(&mut self) {
        let mut guard = ResetGuard::arm(&mut self.inner);
        guard.slot().emplace::<0>(Monostate);
        guard.disarm();
    }

    /// Moves the value out, leaving the optional empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        mem::take(self).into_option()
    }

    /// Stores `value`, returning the previous value if there was one.
    #[inline]
    pub fn replace(&mut self, value: T) -> Option<T> {
        mem::replace(self, Self::some(value)).into_option()
    }

    /// Exchanges the contents of two optionals.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.inner.swap(&mut other.inner);
    }
}

/// Builds an optional holding `value`.
#[inline]
pub fn make_optional<T>(value: T) -> Optional<T> {
    Optional::some(value)
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::some(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::new, Self::some)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut guard = ResetGuard::arm(&mut self.inner);
        guard.slot().clone_from(&source.inner);
        guard.disarm();
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq> Eq for Optional<T> {}

impl<T: PartialOrd> PartialOrd for Optional<T> {
    /// An empty optional orders before any value.
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.inner.partial_cmp(&other.inner)
    }
}

impl<T: Ord> Ord for Optional<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl<T: Hash> Hash for Optional<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("Some").field(value).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_ref().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn panicking_emplace_leaves_empty() {
        let mut o = Optional::some(String::from("old"));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            o.emplace_with(|| panic!("constructor failed"));
        }));
        assert!(result.is_err());
        assert!(o.is_none());
        assert!(!o.inner.is_valueless());
    }

    #[test]
    fn failed_emplace_leaves_empty() {
        let mut o = Optional::some(1_u8);
        assert_eq!(o.try_emplace_with(|| Err::<u8, _>("no")), Err("no"));
        assert!(o.is_none());
        assert!(!o.inner.is_valueless());
    }

    #[test]
    fn get_or_insert_runs_once() {
        let mut o = Optional::new();
        *o.get_or_insert_with(|| 1) += 1;
        *o.get_or_insert_with(|| 100) += 1;
        assert_eq!(o.value(), Ok(&3));
    }
}
