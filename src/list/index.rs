//! Type-level positions into an alternative list.

use core::marker::PhantomData;

use super::{Alternatives, Cons};

/// Position zero.
pub enum Z {}

/// The position after `N`.
pub struct S<N>(PhantomData<N>);

/// A literal index, mapped onto its Peano position by [`Position`].
pub struct Idx<const I: usize>;

/// Maps a literal index to a type-level position.
///
/// Implemented for `Idx<0>` through `Idx<31>`.
pub trait Position {
    /// The Peano encoding of the index.
    type Peano;
}

/// The Peano position of literal index `I`.
pub type Pos<const I: usize> = <Idx<I> as Position>::Peano;

/// The alternative type at literal index `I` of list `L`.
pub type Alt<L, const I: usize> = <L as At<Pos<I>>>::Output;

impl Position for Idx<0> {
    type Peano = Z;
}

macro_rules! positions {
    ($prev:ty;) => {};
    ($prev:ty; $n:literal $(, $rest:literal)*) => {
        impl Position for Idx<$n> {
            type Peano = S<$prev>;
        }

        positions!(S<$prev>; $($rest),*);
    };
}

positions!(Z; 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31);

/// Compile-time lookup of position `N` in a list.
///
/// Indexing past the end fails to type-check.
pub trait At<N>: Alternatives {
    /// The alternative at position `N`.
    type Output;

    /// Zero-based runtime index of position `N`.
    const INDEX: usize;
}

impl<H, T: Alternatives> At<Z> for Cons<H, T> {
    type Output = H;

    const INDEX: usize = 0;
}

impl<H, T, N> At<S<N>> for Cons<H, T>
where
    T: At<N>,
{
    type Output = T::Output;

    const INDEX: usize = 1 + T::INDEX;
}

/// Proof that `T` occurs exactly once in a list, at position `N`.
///
/// `N` is inferred at call sites. A type that occurs more than once leaves `N`
/// ambiguous and the call fails to type-check; a type that does not occur has
/// no implementation at all.
pub trait Contains<T, N>: At<N, Output = T> {}

impl<T, R: Alternatives> Contains<T, Z> for Cons<T, R> {}

impl<H, T, R, N> Contains<T, S<N>> for Cons<H, R> where R: Contains<T, N> {}
