//! A memoization slot that never propagates its contents.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::optional::Optional;

/// An [`Optional`] whose value belongs to its owner alone.
///
/// Cloning yields an empty cache, and clone-assigning empties the target, so
/// a cached result computed for one object never leaks into a copy of it.
/// Everything else behaves like the wrapped optional.
pub struct NonPropagatingCache<T> {
    slot: Optional<T>,
}

impl<T> NonPropagatingCache<T> {
    /// An empty cache.
    #[inline]
    pub fn new() -> Self {
        Self { slot: Optional::new() }
    }

    /// The cached value, computing it with `make` on first use.
    #[inline]
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        self.slot.get_or_insert_with(make)
    }

    /// Forgets the cached value.
    #[inline]
    pub fn invalidate(&mut self) {
        self.slot.reset();
    }
}

impl<T> Default for NonPropagatingCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NonPropagatingCache<T> {
    fn clone(&self) -> Self {
        Self::new()
    }

    fn clone_from(&mut self, _source: &Self) {
        self.invalidate();
    }
}

impl<T> Deref for NonPropagatingCache<T> {
    type Target = Optional<T>;

    fn deref(&self) -> &Optional<T> {
        &self.slot
    }
}

impl<T> DerefMut for NonPropagatingCache<T> {
    fn deref_mut(&mut self) -> &mut Optional<T> {
        &mut self.slot
    }
}

impl<T: fmt::Debug> fmt::Debug for NonPropagatingCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NonPropagatingCache").field(&self.slot).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_starts_empty() {
        let mut cache = NonPropagatingCache::new();
        cache.get_or_insert_with(|| vec![1, 2, 3]);
        assert!(cache.has_value());

        let copy = cache.clone();
        assert!(copy.is_none());
        assert_eq!(cache.value().map(Vec::len), Ok(3));
    }

    #[test]
    fn clone_from_empties_the_target() {
        let mut source = NonPropagatingCache::new();
        source.get_or_insert_with(|| 1);
        let mut target = NonPropagatingCache::new();
        target.get_or_insert_with(|| 2);

        target.clone_from(&source);
        assert!(target.is_none());
        assert_eq!(source.value(), Ok(&1));
    }

    #[test]
    fn computes_once_until_invalidated() {
        let mut calls = 0;
        let mut cache = NonPropagatingCache::new();
        for _ in 0..3 {
            cache.get_or_insert_with(|| {
                calls += 1;
                "cached"
            });
        }
        assert_eq!(calls, 1);
        cache.invalidate();
        cache.get_or_insert_with(|| {
            calls += 1;
            "again"
        });
        assert_eq!(calls, 2);
        assert_eq!(cache.value(), Ok(&"again"));
    }
}
