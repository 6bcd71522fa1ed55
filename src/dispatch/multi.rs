//! Visiting two or three variants at once.
//!
//! The tuple of live indices is keyed as a row-major canonical index into the
//! cartesian product of the alternative counts. Dispatch then nests one
//! single-variant table per operand, each level taking its digit of the key,
//! and calls the visitor with the tuple of alternatives.
//!
//! ```rust
//! use variant::dispatch::visit2;
//! use variant::{Variant, Visitor};
//!
//! struct Sum;
//!
//! impl<A: Copy + Into<i64>, B: Copy + Into<i64>> Visitor<(&A, &B)> for Sum {
//!     type Output = i64;
//!     fn visit(&mut self, (a, b): (&A, &B)) -> i64 {
//!         (*a).into() + (*b).into()
//!     }
//! }
//!
//! let a: Variant![i32, u8] = Variant::new(40_i32);
//! let b: Variant![u16, i64] = Variant::new(2_u16);
//! assert_eq!(visit2(&a, &b, Sum).unwrap(), 42);
//! ```

use core::marker::PhantomData;

use super::{Dispatch, Plain, Projection, Thunk, Visitor, WithIndex};
use crate::error::BadAccess;
use crate::list::Alternatives;
use crate::tagged::Variant;

/// Number of entries in a dispatch table over the given alternative counts.
pub const fn table_size(sizes: &[usize]) -> usize {
    let mut product = 1;
    let mut i = 0;
    while i < sizes.len() {
        product *= sizes[i];
        i += 1;
    }
    product
}

/// Row-major position of an index tuple in the cartesian product of `sizes`.
///
/// The last operand varies fastest.
pub fn canonical_index(indices: &[usize], sizes: &[usize]) -> usize {
    debug_assert_eq!(indices.len(), sizes.len());
    indices.iter().zip(sizes).fold(0, |key, (&index, &size)| {
        debug_assert!(index < size, "alternative index {index} out of range {size}");
        key * size + index
    })
}

/// Inverse of [`canonical_index`]: the per-operand indices of a table key.
pub fn split_canonical<const K: usize>(mut key: usize, sizes: [usize; K]) -> [usize; K] {
    let mut indices = [0; K];
    for (index, &size) in indices.iter_mut().zip(&sizes).rev() {
        *index = key % size;
        key /= size;
    }
    indices
}

/// First-level thunk of a two-variant dispatch: holds the second operand.
pub struct Outer2<'b, V, P, L2: Alternatives> {
    visitor: V,
    second: &'b L2::Storage,
    second_index: usize,
    projection: PhantomData<fn() -> P>,
}

/// Second-level thunk of a two-variant dispatch: holds the first alternative.
pub struct Inner2<V, P, A> {
    visitor: V,
    first: (usize, A),
    projection: PhantomData<fn() -> P>,
}

impl<'b, A, V, P, L2> Thunk<A> for Outer2<'b, V, P, L2>
where
    L2: Dispatch<'b, Inner2<V, P, A>>,
{
    type Output = <L2 as Dispatch<'b, Inner2<V, P, A>>>::Output;

    #[inline(always)]
    fn call(self, index: usize, value: A) -> Self::Output {
        let inner = Inner2 {
            visitor: self.visitor,
            first: (index, value),
            projection: PhantomData,
        };
        // SAFETY: an `Outer2` is only built after checking that
        // `second_index` names the live cell of `second`.
        unsafe { L2::dispatch(self.second, self.second_index, 0, inner) }
    }
}

impl<A, B, V, P> Thunk<B> for Inner2<V, P, A>
where
    P: Projection,
    V: Visitor<(P::Arg<A>, P::Arg<B>)>,
{
    type Output = <V as Visitor<(P::Arg<A>, P::Arg<B>)>>::Output;

    #[inline(always)]
    fn call(self, index: usize, value: B) -> Self::Output {
        let Self {
            mut visitor,
            first: (first_index, first),
            ..
        } = self;
        visitor.visit((P::project(first_index, first), P::project(index, value)))
    }
}

/// First-level thunk of a three-variant dispatch.
pub struct Outer3<'b, 'c, V, P, L2: Alternatives, L3: Alternatives> {
    visitor: V,
    second: (&'b L2::Storage, usize),
    third: (&'c L3::Storage, usize),
    projection: PhantomData<fn() -> P>,
}

/// Second-level thunk of a three-variant dispatch.
pub struct Middle3<'c, V, P, L3: Alternatives, A> {
    visitor: V,
    first: (usize, A),
    third: (&'c L3::Storage, usize),
    projection: PhantomData<fn() -> P>,
}

/// Third-level thunk of a three-variant dispatch.
pub struct Inner3<V, P, A, B> {
    visitor: V,
    first: (usize, A),
    second: (usize, B),
    projection: PhantomData<fn() -> P>,
}

impl<'b, 'c, A, V, P, L2, L3> Thunk<A> for Outer3<'b, 'c, V, P, L2, L3>
where
    L2: Dispatch<'b, Middle3<'c, V, P, L3, A>>,
    L3: Alternatives,
{
    type Output = <L2 as Dispatch<'b, Middle3<'c, V, P, L3, A>>>::Output;

    #[inline(always)]
    fn call(self, index: usize, value: A) -> Self::Output {
        let (second, second_index) = self.second;
        let middle = Middle3 {
            visitor: self.visitor,
            first: (index, value),
            third: self.third,
            projection: PhantomData,
        };
        // SAFETY: an `Outer3` is only built after checking both remaining operands.
        unsafe { L2::dispatch(second, second_index, 0, middle) }
    }
}

impl<'c, A, B, V, P, L3> Thunk<B> for Middle3<'c, V, P, L3, A>
where
    L3: Dispatch<'c, Inner3<V, P, A, B>>,
{
    type Output = <L3 as Dispatch<'c, Inner3<V, P, A, B>>>::Output;

    #[inline(always)]
    fn call(self, index: usize, value: B) -> Self::Output {
        let (third, third_index) = self.third;
        let inner = Inner3 {
            visitor: self.visitor,
            first: self.first,
            second: (index, value),
            projection: PhantomData,
        };
        // SAFETY: a `Middle3` inherits the checked third operand from its `Outer3`.
        unsafe { L3::dispatch(third, third_index, 0, inner) }
    }
}

impl<A, B, C, V, P> Thunk<C> for Inner3<V, P, A, B>
where
    P: Projection,
    V: Visitor<(P::Arg<A>, P::Arg<B>, P::Arg<C>)>,
{
    type Output = <V as Visitor<(P::Arg<A>, P::Arg<B>, P::Arg<C>)>>::Output;

    #[inline(always)]
    fn call(self, index: usize, value: C) -> Self::Output {
        let Self {
            mut visitor,
            first: (first_index, first),
            second: (second_index, second),
            ..
        } = self;
        visitor.visit((
            P::project(first_index, first),
            P::project(second_index, second),
            P::project(index, value),
        ))
    }
}

/// Output of visiting `&'a Variant<L1>` and `&'b Variant<L2>` with `V`.
pub type Visit2Output<'a, 'b, L1, L2, V, P = Plain> = <L1 as Dispatch<'a, Outer2<'b, V, P, L2>>>::Output;

/// Output of visiting three variants with `V`.
pub type Visit3Output<'a, 'b, 'c, L1, L2, L3, V, P = Plain> =
    <L1 as Dispatch<'a, Outer3<'b, 'c, V, P, L2, L3>>>::Output;

fn pair<'a, 'b, P, L1, L2, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    visitor: V,
) -> Result<Visit2Output<'a, 'b, L1, L2, V, P>, BadAccess>
where
    L1: Dispatch<'a, Outer2<'b, V, P, L2>>,
    L2: Alternatives,
{
    let (first_index, first) = first.raw.live().ok_or(BadAccess::valueless())?;
    let (second_index, second) = second.raw.live().ok_or(BadAccess::valueless())?;
    let sizes = [L1::LEN, L2::LEN];
    let key = canonical_index(&[first_index, second_index], &sizes);
    debug_assert!(key < table_size(&sizes));
    let [first_index, second_index] = split_canonical(key, sizes);
    let thunk = Outer2 {
        visitor,
        second,
        second_index,
        projection: PhantomData,
    };
    // SAFETY: both indices come from `live` and name constructed cells.
    Ok(unsafe { L1::dispatch(first, first_index, 0, thunk) })
}

fn triple<'a, 'b, 'c, P, L1, L2, L3, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    third: &'c Variant<L3>,
    visitor: V,
) -> Result<Visit3Output<'a, 'b, 'c, L1, L2, L3, V, P>, BadAccess>
where
    L1: Dispatch<'a, Outer3<'b, 'c, V, P, L2, L3>>,
    L2: Alternatives,
    L3: Alternatives,
{
    let (first_index, first) = first.raw.live().ok_or(BadAccess::valueless())?;
    let (second_index, second) = second.raw.live().ok_or(BadAccess::valueless())?;
    let (third_index, third) = third.raw.live().ok_or(BadAccess::valueless())?;
    let sizes = [L1::LEN, L2::LEN, L3::LEN];
    let key = canonical_index(&[first_index, second_index, third_index], &sizes);
    debug_assert!(key < table_size(&sizes));
    let [first_index, second_index, third_index] = split_canonical(key, sizes);
    let thunk = Outer3 {
        visitor,
        second: (second, second_index),
        third: (third, third_index),
        projection: PhantomData,
    };
    // SAFETY: all three indices come from `live` and name constructed cells.
    Ok(unsafe { L1::dispatch(first, first_index, 0, thunk) })
}

/// Visits two variants with a visitor over pairs of alternatives.
///
/// The visitor is invoked exactly once with `(&A, &B)` for the live
/// alternatives `A` and `B`.
///
/// # Errors
/// [`BadAccess`] if either operand is valueless; the visitor is not invoked.
pub fn visit2<'a, 'b, L1, L2, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    visitor: V,
) -> Result<Visit2Output<'a, 'b, L1, L2, V>, BadAccess>
where
    L1: Dispatch<'a, Outer2<'b, V, Plain, L2>>,
    L2: Alternatives,
{
    pair::<Plain, _, _, _>(first, second, visitor)
}

/// Like [`visit2`], with each alternative passed as [`Indexed`](super::Indexed).
///
/// # Errors
/// [`BadAccess`] if either operand is valueless.
pub fn visit2_indexed<'a, 'b, L1, L2, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    visitor: V,
) -> Result<Visit2Output<'a, 'b, L1, L2, V, WithIndex>, BadAccess>
where
    L1: Dispatch<'a, Outer2<'b, V, WithIndex, L2>>,
    L2: Alternatives,
{
    pair::<WithIndex, _, _, _>(first, second, visitor)
}

/// Visits three variants with a visitor over triples of alternatives.
///
/// # Errors
/// [`BadAccess`] if any operand is valueless; the visitor is not invoked.
pub fn visit3<'a, 'b, 'c, L1, L2, L3, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    third: &'c Variant<L3>,
    visitor: V,
) -> Result<Visit3Output<'a, 'b, 'c, L1, L2, L3, V>, BadAccess>
where
    L1: Dispatch<'a, Outer3<'b, 'c, V, Plain, L2, L3>>,
    L2: Alternatives,
    L3: Alternatives,
{
    triple::<Plain, _, _, _, _>(first, second, third, visitor)
}

/// Like [`visit3`], with each alternative passed as [`Indexed`](super::Indexed).
///
/// # Errors
/// [`BadAccess`] if any operand is valueless.
pub fn visit3_indexed<'a, 'b, 'c, L1, L2, L3, V>(
    first: &'a Variant<L1>,
    second: &'b Variant<L2>,
    third: &'c Variant<L3>,
    visitor: V,
) -> Result<Visit3Output<'a, 'b, 'c, L1, L2, L3, V, WithIndex>, BadAccess>
where
    L1: Dispatch<'a, Outer3<'b, 'c, V, WithIndex, L2, L3>>,
    L2: Alternatives,
    L3: Alternatives,
{
    triple::<WithIndex, _, _, _, _>(first, second, third, visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Indexed;

    #[test]
    fn table_size_is_the_product() {
        assert_eq!(table_size(&[]), 1);
        assert_eq!(table_size(&[3]), 3);
        assert_eq!(table_size(&[2, 3, 4]), 24);
    }

    #[test]
    fn canonical_index_is_row_major() {
        assert_eq!(canonical_index(&[0, 0], &[2, 3]), 0);
        assert_eq!(canonical_index(&[0, 2], &[2, 3]), 2);
        assert_eq!(canonical_index(&[1, 0], &[2, 3]), 3);
        assert_eq!(canonical_index(&[1, 2, 3], &[2, 3, 4]), 23);
    }

    #[test]
    fn split_inverts_canonical() {
        let sizes = [2, 3, 4];
        for key in 0..table_size(&sizes) {
            let indices = split_canonical(key, sizes);
            assert_eq!(canonical_index(&indices, &sizes), key);
        }
    }

    #[test]
    fn indexed_pair_reports_both_positions() {
        struct Positions;

        impl<A, B> Visitor<(Indexed<A>, Indexed<B>)> for Positions {
            type Output = (usize, usize);
            fn visit(&mut self, (a, b): (Indexed<A>, Indexed<B>)) -> (usize, usize) {
                (a.index, b.index)
            }
        }

        let a = Variant::<crate::alternatives![u8, u16, u32]>::in_place::<2>(1);
        let b = Variant::<crate::alternatives![i8, i16]>::in_place::<1>(1);
        assert_eq!(visit2_indexed(&a, &b, Positions), Ok((2, 1)));
    }
}
