//! Compile-time alternative lists.
//!
//! A variant's alternatives are spelled as a type-level cons list,
//! `Cons<A, Cons<B, Nil>>`, usually through the [`Variant!`](crate::Variant!) or
//! [`alternatives!`](crate::alternatives!) macros. A list never exists at
//! runtime: it only carries the storage layout and the per-alternative
//! operations (destroy, swap, in-place replace) that the rest of the crate is
//! generated from.
//!
//! Positions are Peano numbers ([`Z`], [`S`]). Literal indices are mapped onto
//! them by [`Idx`], which lets the façade accept `get::<1>()` while the
//! recursion below stays on types.

mod index;

pub use index::{Alt, At, Contains, Idx, Pos, Position, S, Z};

use core::marker::PhantomData;
use core::mem;

use crate::storage::{access, Node};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Nil {}
    impl<H, T> Sealed for super::Cons<H, T> {}
}

/// The empty alternative list.
///
/// A variant over `Nil` has no alternatives and cannot be constructed; `Nil`
/// only terminates non-empty lists.
pub enum Nil {}

/// A non-empty alternative list: `H` followed by the alternatives of `T`.
///
/// Never instantiated; used purely at the type level.
pub struct Cons<H, T>(PhantomData<fn() -> (H, T)>);

/// Layout and lifecycle facts derived from an alternative list.
///
/// Implemented for [`Nil`] and [`Cons`] only.
pub trait Alternatives: sealed::Sealed {
    /// Overlapping storage for every alternative, each at offset zero.
    type Storage;

    /// Number of alternatives.
    const LEN: usize;

    /// Whether any alternative has drop glue.
    const NEEDS_DROP: bool;

    /// Runs the destructor of cell `index`.
    ///
    /// # Safety
    /// `storage` must be valid for writes and cell `index` must be live. The
    /// cell is dead afterwards.
    unsafe fn destroy(storage: *mut Self::Storage, index: usize);

    /// Swaps cell `index` of `a` with cell `index` of `b`.
    ///
    /// # Safety
    /// Both pointers must be valid, distinct, and hold a live cell `index`.
    unsafe fn swap_at(a: *mut Self::Storage, b: *mut Self::Storage, index: usize);

    /// Moves cell `index` out of `source` and assigns it over cell `index` of
    /// `target`, dropping the old target value.
    ///
    /// # Safety
    /// Both pointers must be valid, distinct, and hold a live cell `index`.
    /// The source cell is dead afterwards.
    unsafe fn replace_at(target: *mut Self::Storage, source: *mut Self::Storage, index: usize);
}

impl Alternatives for Nil {
    type Storage = ();

    const LEN: usize = 0;
    const NEEDS_DROP: bool = false;

    unsafe fn destroy(_storage: *mut (), index: usize) {
        unreachable!("alternative index {index} out of range")
    }

    unsafe fn swap_at(_a: *mut (), _b: *mut (), index: usize) {
        unreachable!("alternative index {index} out of range")
    }

    unsafe fn replace_at(_target: *mut (), _source: *mut (), index: usize) {
        unreachable!("alternative index {index} out of range")
    }
}

impl<H, T: Alternatives> Alternatives for Cons<H, T> {
    type Storage = Node<H, T::Storage>;

    const LEN: usize = 1 + T::LEN;
    const NEEDS_DROP: bool = mem::needs_drop::<H>() || T::NEEDS_DROP;

    #[inline]
    unsafe fn destroy(storage: *mut Self::Storage, index: usize) {
        if index == 0 {
            // SAFETY: caller asserts the head cell is live.
            unsafe { access::drop_in_place(Node::head_ptr(storage)) }
        } else {
            // SAFETY: forwarded contract, one position further down the list.
            unsafe { T::destroy(Node::tail_ptr(storage), index - 1) }
        }
    }

    #[inline]
    unsafe fn swap_at(a: *mut Self::Storage, b: *mut Self::Storage, index: usize) {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live and distinct.
            unsafe { access::swap(Node::head_ptr(a), Node::head_ptr(b)) }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::swap_at(Node::tail_ptr(a), Node::tail_ptr(b), index - 1) }
        }
    }

    #[inline]
    unsafe fn replace_at(target: *mut Self::Storage, source: *mut Self::Storage, index: usize) {
        if index == 0 {
            // SAFETY: caller asserts both head cells are live; the source cell
            // is logically moved out by the read.
            unsafe { access::assign(Node::head_ptr(target), access::read(Node::head_ptr(source))) }
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::replace_at(Node::tail_ptr(target), Node::tail_ptr(source), index - 1) }
        }
    }
}

/// Builds an alternative list type from a comma-separated list of types.
///
/// ```rust
/// use variant::{alternatives, Alternatives};
///
/// type L = alternatives![u8, String, Vec<u32>];
/// assert_eq!(<L as Alternatives>::LEN, 3);
/// ```
#[macro_export]
macro_rules! alternatives {
    () => { $crate::list::Nil };
    ($head:ty $(, $rest:ty)* $(,)?) => {
        $crate::list::Cons<$head, $crate::alternatives!($($rest),*)>
    };
}

/// Names the variant type over the given alternatives.
///
/// `Variant![i32, String]` is `Variant<Cons<i32, Cons<String, Nil>>>`.
#[macro_export]
macro_rules! Variant {
    ($($alt:ty),+ $(,)?) => {
        $crate::Variant<$crate::alternatives!($($alt),+)>
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    type Three = crate::alternatives![u8, String, Vec<u32>];

    #[test]
    fn len_counts_alternatives() {
        assert_eq!(<Nil as Alternatives>::LEN, 0);
        assert_eq!(<Three as Alternatives>::LEN, 3);
    }

    #[test]
    fn needs_drop_is_any_alternative() {
        assert!(<Three as Alternatives>::NEEDS_DROP);
        assert!(!<crate::alternatives![u8, u64, ()] as Alternatives>::NEEDS_DROP);
        assert!(<crate::alternatives![u8, Box<u8>] as Alternatives>::NEEDS_DROP);
    }

    #[test]
    fn positions_resolve_to_indices() {
        assert_eq!(<Three as At<Pos<0>>>::INDEX, 0);
        assert_eq!(<Three as At<Pos<1>>>::INDEX, 1);
        assert_eq!(<Three as At<Pos<2>>>::INDEX, 2);
    }

    #[test]
    fn contains_finds_type_position() {
        fn position<L: Contains<T, N>, T, N>() -> usize {
            <L as At<N>>::INDEX
        }

        assert_eq!(position::<Three, u8, _>(), 0);
        assert_eq!(position::<Three, String, _>(), 1);
        assert_eq!(position::<Three, Vec<u32>, _>(), 2);
    }

    #[test]
    fn alt_names_the_alternative_type() {
        let value: Alt<Three, 1> = String::from("x");
        assert_eq!(value, "x");
    }
}
