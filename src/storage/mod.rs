//! Overlapping storage for a list of alternatives.
//!
//! `Node<H, R>` is a `repr(C)` union of the head alternative and the storage of
//! the remaining ones, so every alternative of a list sits at offset zero of
//! the outermost node. Its size is the maximum alternative size and its
//! alignment is the strictest alternative alignment.
//!
//! The storage itself knows nothing about which cell is live; that is the
//! lifecycle layer's tag. Everything here is `unsafe` with the liveness
//! contract on the caller.

pub(crate) mod access;

use core::mem::{ManuallyDrop, MaybeUninit};
use core::ptr;

use crate::list::At;

/// One level of alternative storage: the head alternative overlapped with the
/// rest of the list.
///
/// Appears only as [`Alternatives::Storage`](crate::list::Alternatives::Storage).
#[repr(C)]
pub union Node<H, R> {
    head: ManuallyDrop<H>,
    tail: ManuallyDrop<R>,
}

impl<H, R> Node<H, R> {
    #[inline]
    pub(crate) fn from_head(value: H) -> Self {
        Self { head: ManuallyDrop::new(value) }
    }

    #[inline]
    pub(crate) fn from_tail(rest: R) -> Self {
        Self { tail: ManuallyDrop::new(rest) }
    }

    #[inline(always)]
    pub(crate) fn head_ptr(node: *mut Self) -> *mut H {
        node.cast()
    }

    #[inline(always)]
    pub(crate) fn tail_ptr(node: *mut Self) -> *mut R {
        node.cast()
    }

    /// # Safety
    /// The head cell must be live.
    #[inline(always)]
    pub(crate) unsafe fn head(&self) -> &H {
        // SAFETY: caller asserts the head cell is live.
        unsafe { &self.head }
    }

    /// # Safety
    /// The head cell must be live.
    #[inline(always)]
    pub(crate) unsafe fn head_mut(&mut self) -> &mut H {
        // SAFETY: caller asserts the head cell is live.
        unsafe { &mut self.head }
    }

    /// # Safety
    /// A cell of the tail must be live.
    #[inline(always)]
    pub(crate) unsafe fn tail(&self) -> &R {
        // SAFETY: caller asserts the live cell is in the tail.
        unsafe { &self.tail }
    }

    /// # Safety
    /// A cell of the tail must be live.
    #[inline(always)]
    pub(crate) unsafe fn tail_mut(&mut self) -> &mut R {
        // SAFETY: caller asserts the live cell is in the tail.
        unsafe { &mut self.tail }
    }

    /// # Safety
    /// The head cell must be live.
    #[inline(always)]
    pub(crate) unsafe fn into_head(self) -> H {
        // SAFETY: caller asserts the head cell is live; `self` has no drop glue,
        // so the value is moved out exactly once.
        unsafe { ManuallyDrop::into_inner(ptr::read(&self.head)) }
    }

    /// # Safety
    /// A cell of the tail must be live.
    #[inline(always)]
    pub(crate) unsafe fn into_tail(self) -> R {
        // SAFETY: as for `into_head`.
        unsafe { ManuallyDrop::into_inner(ptr::read(&self.tail)) }
    }
}

/// Pointer to cell `N` of `storage`.
#[inline(always)]
pub(crate) fn cell<L: At<N>, N>(storage: *const L::Storage) -> *const L::Output {
    storage.cast()
}

/// Mutable pointer to cell `N` of `storage`.
#[inline(always)]
pub(crate) fn cell_mut<L: At<N>, N>(storage: *mut L::Storage) -> *mut L::Output {
    storage.cast()
}

/// Placement-constructs alternative `N`.
///
/// # Safety
/// No cell of `storage` may be live; otherwise its value leaks.
#[inline]
pub(crate) unsafe fn construct<L: At<N>, N>(storage: &mut MaybeUninit<L::Storage>, value: L::Output) {
    // SAFETY: every cell sits at offset zero and the slot is not live.
    unsafe { access::write(cell_mut::<L, N>(storage.as_mut_ptr()), value) }
}

/// Reference to cell `N` with no liveness check.
///
/// # Safety
/// Cell `N` must be live.
#[inline(always)]
pub(crate) unsafe fn raw_get<L: At<N>, N>(storage: &MaybeUninit<L::Storage>) -> &L::Output {
    // SAFETY: caller asserts cell `N` is live.
    unsafe { access::as_ref(cell::<L, N>(storage.as_ptr())) }
}

/// Mutable reference to cell `N` with no liveness check.
///
/// # Safety
/// Cell `N` must be live.
#[inline(always)]
pub(crate) unsafe fn raw_get_mut<L: At<N>, N>(storage: &mut MaybeUninit<L::Storage>) -> &mut L::Output {
    // SAFETY: caller asserts cell `N` is live.
    unsafe { access::as_mut(cell_mut::<L, N>(storage.as_mut_ptr())) }
}

/// Moves cell `N` out of `storage`.
///
/// # Safety
/// Cell `N` must be live, and the caller must treat it as dead afterwards.
#[inline(always)]
pub(crate) unsafe fn take<L: At<N>, N>(storage: &mut MaybeUninit<L::Storage>) -> L::Output {
    // SAFETY: caller asserts cell `N` is live and will not be used again.
    unsafe { access::read(cell::<L, N>(storage.as_ptr())) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{Alternatives, Pos};
    use core::mem;

    type L = crate::alternatives![u8, u64, [u16; 3]];

    #[test]
    fn layout_is_max_of_alternatives() {
        assert_eq!(mem::size_of::<<L as Alternatives>::Storage>(), 8);
        assert_eq!(mem::align_of::<<L as Alternatives>::Storage>(), mem::align_of::<u64>());
    }

    #[test]
    fn every_cell_is_at_offset_zero() {
        let mut slot = MaybeUninit::<<L as Alternatives>::Storage>::uninit();
        let base = slot.as_mut_ptr().cast::<u8>();
        assert_eq!(cell_mut::<L, Pos<0>>(slot.as_mut_ptr()).cast::<u8>(), base);
        assert_eq!(cell_mut::<L, Pos<1>>(slot.as_mut_ptr()).cast::<u8>(), base);
        assert_eq!(cell_mut::<L, Pos<2>>(slot.as_mut_ptr()).cast::<u8>(), base);
    }

    #[test]
    fn construct_then_read_back() {
        let mut slot = MaybeUninit::<<L as Alternatives>::Storage>::uninit();
        unsafe {
            construct::<L, Pos<2>>(&mut slot, [1, 2, 3]);
            assert_eq!(raw_get::<L, Pos<2>>(&slot), &[1, 2, 3]);
            raw_get_mut::<L, Pos<2>>(&mut slot)[0] = 9;
            assert_eq!(take::<L, Pos<2>>(&mut slot), [9, 2, 3]);
        }
    }

    #[test]
    fn destroy_runs_the_live_destructor() {
        use std::rc::Rc;

        type Rcs = crate::alternatives![u8, Rc<()>];
        let counter = Rc::new(());
        let mut slot = MaybeUninit::<<Rcs as Alternatives>::Storage>::uninit();
        unsafe {
            construct::<Rcs, Pos<1>>(&mut slot, Rc::clone(&counter));
            assert_eq!(Rc::strong_count(&counter), 2);
            Rcs::destroy(slot.as_mut_ptr(), 1);
        }
        assert_eq!(Rc::strong_count(&counter), 1);
    }
}
