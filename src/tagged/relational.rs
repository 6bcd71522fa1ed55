//! Equality, ordering, hashing and formatting.
//!
//! Two variants compare first by state, then by index, then by the live
//! alternatives:
//! - a valueless variant equals another valueless variant and orders before
//!   every variant holding a value;
//! - different indices compare by index;
//! - equal indices compare the alternatives with their own operator.
//!
//! Each property is provided for a list exactly when every alternative has it.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use super::Variant;
use crate::list::{Alternatives, Cons, Nil};

/// Per-alternative `==`, available when every alternative is [`PartialEq`].
pub trait PartialEqAlternatives: Alternatives {
    /// Compares cell `index` of two storages.
    ///
    /// # Safety
    /// Cell `index` must be live in both.
    unsafe fn eq_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> bool;
}

/// Marker for lists whose every alternative is [`Eq`].
pub trait EqAlternatives: PartialEqAlternatives {}

/// Per-alternative partial ordering.
pub trait PartialOrdAlternatives: PartialEqAlternatives {
    /// Compares cell `index` of two storages.
    ///
    /// # Safety
    /// Cell `index` must be live in both.
    unsafe fn partial_cmp_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> Option<Ordering>;
}

/// Per-alternative total ordering.
pub trait OrdAlternatives: EqAlternatives + PartialOrdAlternatives {
    /// Compares cell `index` of two storages.
    ///
    /// # Safety
    /// Cell `index` must be live in both.
    unsafe fn cmp_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> Ordering;
}

/// Per-alternative hashing.
pub trait HashAlternatives: Alternatives {
    /// Feeds cell `index` to `state`.
    ///
    /// # Safety
    /// Cell `index` must be live.
    unsafe fn hash_at<S: Hasher>(storage: &Self::Storage, index: usize, state: &mut S);
}

/// Per-alternative debug formatting.
pub trait DebugAlternatives: Alternatives {
    /// Formats cell `index`.
    ///
    /// # Safety
    /// Cell `index` must be live.
    unsafe fn fmt_at(storage: &Self::Storage, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl PartialEqAlternatives for Nil {
    unsafe fn eq_at(_a: &(), _b: &(), index: usize) -> bool {
        unreachable!("alternative index {index} out of range")
    }
}

impl EqAlternatives for Nil {}

impl PartialOrdAlternatives for Nil {
    unsafe fn partial_cmp_at(_a: &(), _b: &(), index: usize) -> Option<Ordering> {
        unreachable!("alternative index {index} out of range")
    }
}

impl OrdAlternatives for Nil {
    unsafe fn cmp_at(_a: &(), _b: &(), index: usize) -> Ordering {
        unreachable!("alternative index {index} out of range")
    }
}

impl HashAlternatives for Nil {
    unsafe fn hash_at<S: Hasher>(_storage: &(), index: usize, _state: &mut S) {
        unreachable!("alternative index {index} out of range")
    }
}

impl DebugAlternatives for Nil {
    unsafe fn fmt_at(_storage: &(), index: usize, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unreachable!("alternative index {index} out of range")
    }
}

impl<H: PartialEq, T: PartialEqAlternatives> PartialEqAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn eq_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> bool {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live.
            unsafe { a.head() == b.head() }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::eq_at(a.tail(), b.tail(), index - 1) }
        }
    }
}

impl<H: Eq, T: EqAlternatives> EqAlternatives for Cons<H, T> {}

impl<H: PartialOrd, T: PartialOrdAlternatives> PartialOrdAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn partial_cmp_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> Option<Ordering> {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live.
            unsafe { a.head().partial_cmp(b.head()) }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::partial_cmp_at(a.tail(), b.tail(), index - 1) }
        }
    }
}

impl<H: Ord, T: OrdAlternatives> OrdAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn cmp_at(a: &Self::Storage, b: &Self::Storage, index: usize) -> Ordering {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live.
            unsafe { a.head().cmp(b.head()) }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::cmp_at(a.tail(), b.tail(), index - 1) }
        }
    }
}

impl<H: Hash, T: HashAlternatives> HashAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn hash_at<S: Hasher>(storage: &Self::Storage, index: usize, state: &mut S) {
        if index == 0 {
            // SAFETY: caller asserts the head cell is live.
            unsafe { storage.head() }.hash(state);
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::hash_at(storage.tail(), index - 1, state) }
        }
    }
}

impl<H: fmt::Debug, T: DebugAlternatives> DebugAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn fmt_at(storage: &Self::Storage, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if index == 0 {
            // SAFETY: caller asserts the head cell is live.
            fmt::Debug::fmt(unsafe { storage.head() }, f)
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::fmt_at(storage.tail(), index - 1, f) }
        }
    }
}

impl<L: PartialEqAlternatives> PartialEq for Variant<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self.raw.live(), other.raw.live()) {
            (None, None) => true,
            // SAFETY: `live` yields constructed cells, and the indices match.
            (Some((i, a)), Some((j, b))) if i == j => unsafe { L::eq_at(a, b, i) },
            _ => false,
        }
    }
}

impl<L: EqAlternatives> Eq for Variant<L> {}

impl<L: PartialOrdAlternatives> PartialOrd for Variant<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.raw.live(), other.raw.live()) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some((i, a)), Some((j, b))) => match i.cmp(&j) {
                // SAFETY: `live` yields constructed cells, and the indices match.
                Ordering::Equal => unsafe { L::partial_cmp_at(a, b, i) },
                unequal => Some(unequal),
            },
        }
    }
}

impl<L: OrdAlternatives> Ord for Variant<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.raw.live(), other.raw.live()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some((i, a)), Some((j, b))) => match i.cmp(&j) {
                // SAFETY: `live` yields constructed cells, and the indices match.
                Ordering::Equal => unsafe { L::cmp_at(a, b, i) },
                unequal => unequal,
            },
        }
    }
}

impl<L: HashAlternatives> Hash for Variant<L> {
    /// Feeds the raw tag, then the live alternative if there is one.
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.raw.tag().hash(state);
        if let Some((index, storage)) = self.raw.live() {
            // SAFETY: `live` yields the constructed cell.
            unsafe { L::hash_at(storage, index, state) }
        }
    }
}

struct Live<'a, L: DebugAlternatives> {
    storage: &'a L::Storage,
    index: usize,
}

impl<L: DebugAlternatives> fmt::Debug for Live<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: a `Live` is only built from the output of `live`.
        unsafe { L::fmt_at(self.storage, self.index, f) }
    }
}

impl<L: DebugAlternatives> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw.live() {
            None => f.write_str("Variant(<valueless>)"),
            Some((index, storage)) => f
                .debug_struct("Variant")
                .field("index", &index)
                .field("value", &Live::<L> { storage, index })
                .finish(),
        }
    }
}
