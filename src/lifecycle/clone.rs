use crate::list::{Alternatives, Cons, Nil};
use crate::storage::Node;

/// Per-alternative cloning, available when every alternative is [`Clone`].
///
/// Drives [`Clone`] for [`Variant`](crate::Variant), including the
/// clone-assignment ladder of `clone_from`.
pub trait CloneAlternatives: Alternatives {
    /// Clones cell `index` into fresh storage.
    ///
    /// # Safety
    /// Cell `index` of `storage` must be live.
    unsafe fn clone_at(storage: &Self::Storage, index: usize) -> Self::Storage;

    /// Clone-assigns cell `index` of `source` over cell `index` of `target`.
    ///
    /// # Safety
    /// Cell `index` must be live in both.
    unsafe fn clone_from_at(target: &mut Self::Storage, source: &Self::Storage, index: usize);
}

impl CloneAlternatives for Nil {
    unsafe fn clone_at(_storage: &(), index: usize) {
        unreachable!("alternative index {index} out of range")
    }

    unsafe fn clone_from_at(_target: &mut (), _source: &(), index: usize) {
        unreachable!("alternative index {index} out of range")
    }
}

impl<H: Clone, T: CloneAlternatives> CloneAlternatives for Cons<H, T> {
    #[inline]
    unsafe fn clone_at(storage: &Self::Storage, index: usize) -> Self::Storage {
        if index == 0 {
            // SAFETY: caller asserts the head cell is live.
            Node::from_head(unsafe { storage.head() }.clone())
        } else {
            // SAFETY: forwarded contract.
            Node::from_tail(unsafe { T::clone_at(storage.tail(), index - 1) })
        }
    }

    #[inline]
    unsafe fn clone_from_at(target: &mut Self::Storage, source: &Self::Storage, index: usize) {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live.
            unsafe { target.head_mut().clone_from(source.head()) }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::clone_from_at(target.tail_mut(), source.tail(), index - 1) }
        }
    }
}
