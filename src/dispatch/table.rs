//! Static dispatch tables.
//!
//! Each impl below contributes one row: "if the index is mine, call the thunk
//! with my alternative, otherwise recurse into the tail". Monomorphization
//! flattens the recursion into a dense branch chain over the list, which the
//! optimizer lowers to a jump table. The output type is fixed by the first
//! alternative and every later row must agree with it.

use crate::list::{Alternatives, Cons, Nil};

/// A continuation invoked with one alternative and its index.
pub trait Thunk<A> {
    /// Result of the call. Must agree across every alternative of a dispatch.
    type Output;

    /// Calls the continuation with the alternative at `index`.
    fn call(self, index: usize, value: A) -> Self::Output;
}

/// Dispatch over shared references to the live alternative.
pub trait Dispatch<'a, K>: Alternatives {
    /// Common output of the thunk across every alternative.
    type Output;

    /// Calls `thunk` with the alternative at `index`, reported as `base + index`.
    ///
    /// # Safety
    /// Cell `index` of `storage` must be live and `index < Self::LEN`.
    unsafe fn dispatch(storage: &'a Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output;
}

/// Dispatch over a mutable reference to the live alternative.
pub trait DispatchMut<'a, K>: Alternatives {
    /// Common output of the thunk across every alternative.
    type Output;

    /// # Safety
    /// Cell `index` of `storage` must be live and `index < Self::LEN`.
    unsafe fn dispatch_mut(storage: &'a mut Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output;
}

/// Dispatch that moves the live alternative into the thunk.
pub trait DispatchOnce<K>: Alternatives {
    /// Common output of the thunk across every alternative.
    type Output;

    /// # Safety
    /// Cell `index` of `storage` must be live and `index < Self::LEN`. The
    /// caller gives up ownership of that cell.
    unsafe fn dispatch_once(storage: Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output;
}

impl<'a, H: 'a, K> Dispatch<'a, K> for Cons<H, Nil>
where
    K: Thunk<&'a H>,
{
    type Output = K::Output;

    #[inline(always)]
    unsafe fn dispatch(storage: &'a Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        debug_assert_eq!(index, 0, "alternative index out of range");
        // SAFETY: the only cell of a one-element list is the head.
        thunk.call(base, unsafe { storage.head() })
    }
}

impl<'a, H: 'a, H2, T, K> Dispatch<'a, K> for Cons<H, Cons<H2, T>>
where
    T: Alternatives,
    K: Thunk<&'a H>,
    Cons<H2, T>: Dispatch<'a, K, Output = <K as Thunk<&'a H>>::Output>,
{
    type Output = <K as Thunk<&'a H>>::Output;

    #[inline(always)]
    unsafe fn dispatch(storage: &'a Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        if index == 0 {
            // SAFETY: caller asserts cell 0 is live.
            thunk.call(base, unsafe { storage.head() })
        } else {
            // SAFETY: the live cell is in the tail, one position further down.
            unsafe { <Cons<H2, T> as Dispatch<'a, K>>::dispatch(storage.tail(), index - 1, base + 1, thunk) }
        }
    }
}

impl<'a, H: 'a, K> DispatchMut<'a, K> for Cons<H, Nil>
where
    K: Thunk<&'a mut H>,
{
    type Output = K::Output;

    #[inline(always)]
    unsafe fn dispatch_mut(storage: &'a mut Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        debug_assert_eq!(index, 0, "alternative index out of range");
        // SAFETY: the only cell of a one-element list is the head.
        thunk.call(base, unsafe { storage.head_mut() })
    }
}

impl<'a, H: 'a, H2, T, K> DispatchMut<'a, K> for Cons<H, Cons<H2, T>>
where
    T: Alternatives,
    K: Thunk<&'a mut H>,
    Cons<H2, T>: DispatchMut<'a, K, Output = <K as Thunk<&'a mut H>>::Output>,
{
    type Output = <K as Thunk<&'a mut H>>::Output;

    #[inline(always)]
    unsafe fn dispatch_mut(storage: &'a mut Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        if index == 0 {
            // SAFETY: caller asserts cell 0 is live.
            thunk.call(base, unsafe { storage.head_mut() })
        } else {
            // SAFETY: the live cell is in the tail.
            unsafe {
                <Cons<H2, T> as DispatchMut<'a, K>>::dispatch_mut(storage.tail_mut(), index - 1, base + 1, thunk)
            }
        }
    }
}

impl<H, K> DispatchOnce<K> for Cons<H, Nil>
where
    K: Thunk<H>,
{
    type Output = K::Output;

    #[inline(always)]
    unsafe fn dispatch_once(storage: Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        debug_assert_eq!(index, 0, "alternative index out of range");
        // SAFETY: the only cell of a one-element list is the head.
        thunk.call(base, unsafe { storage.into_head() })
    }
}

impl<H, H2, T, K> DispatchOnce<K> for Cons<H, Cons<H2, T>>
where
    T: Alternatives,
    K: Thunk<H>,
    Cons<H2, T>: DispatchOnce<K, Output = <K as Thunk<H>>::Output>,
{
    type Output = <K as Thunk<H>>::Output;

    #[inline(always)]
    unsafe fn dispatch_once(storage: Self::Storage, index: usize, base: usize, thunk: K) -> Self::Output {
        if index == 0 {
            // SAFETY: caller asserts cell 0 is live and hands it over.
            thunk.call(base, unsafe { storage.into_head() })
        } else {
            // SAFETY: the live cell is in the tail.
            unsafe { <Cons<H2, T> as DispatchOnce<K>>::dispatch_once(storage.into_tail(), index - 1, base + 1, thunk) }
        }
    }
}
