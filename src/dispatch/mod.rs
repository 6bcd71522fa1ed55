//! Visitation: routing the runtime index of a live alternative to typed code.
//!
//! A visitor implements [`Visitor<A>`] once per alternative type it accepts
//! (or once, generically). Dispatch tables are generated per alternative list
//! at compile time and require every alternative to be accepted with the same
//! `Output` type; mismatched outputs fail to type-check.
//!
//! Single-variant visitation is available on [`Variant`] itself
//! ([`Variant::visit`], [`Variant::visit_mut`], [`Variant::visit_into`] and the
//! `_indexed` forms). Visiting two or three variants at once lives in [`multi`].
//!
//! ```rust
//! use std::fmt::Display;
//! use variant::{Variant, Visitor};
//!
//! struct Show;
//!
//! impl<T: Display> Visitor<&T> for Show {
//!     type Output = String;
//!     fn visit(&mut self, value: &T) -> String {
//!         value.to_string()
//!     }
//! }
//!
//! let v: Variant![u8, &str] = Variant::new("hi");
//! assert_eq!(v.visit(Show).unwrap(), "hi");
//! ```

pub mod multi;
mod table;

pub use multi::{canonical_index, split_canonical, table_size, visit2, visit2_indexed, visit3, visit3_indexed};
pub use table::{Dispatch, DispatchMut, DispatchOnce, Thunk};

use core::marker::PhantomData;

use crate::error::BadAccess;
use crate::tagged::Variant;

/// Code that accepts an alternative of type `A`.
///
/// Implemented once per accepted alternative type. Visitors are taken by
/// value; pass `&mut visitor` to keep using it afterwards.
pub trait Visitor<A> {
    /// Result of visiting.
    type Output;

    /// Visits one alternative.
    fn visit(&mut self, value: A) -> Self::Output;
}

impl<A, V: Visitor<A> + ?Sized> Visitor<A> for &mut V {
    type Output = V::Output;

    #[inline]
    fn visit(&mut self, value: A) -> V::Output {
        (**self).visit(value)
    }
}

/// An alternative paired with its index, as passed by the `_indexed` visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Indexed<A> {
    /// Index of the alternative within its variant.
    pub index: usize,
    /// The alternative itself.
    pub value: A,
}

/// How a visited alternative is presented to the visitor.
pub trait Projection {
    /// The argument type handed to the visitor for an alternative `A`.
    type Arg<A>;

    /// Builds the visitor argument.
    fn project<A>(index: usize, value: A) -> Self::Arg<A>;
}

/// The alternative is passed as-is.
pub enum Plain {}

impl Projection for Plain {
    type Arg<A> = A;

    #[inline(always)]
    fn project<A>(_index: usize, value: A) -> A {
        value
    }
}

/// The alternative is passed as [`Indexed`].
pub enum WithIndex {}

impl Projection for WithIndex {
    type Arg<A> = Indexed<A>;

    #[inline(always)]
    fn project<A>(index: usize, value: A) -> Indexed<A> {
        Indexed { index, value }
    }
}

/// The thunk for single-variant visitation: projects the alternative and
/// hands it to the visitor.
pub struct Cooked<V, P> {
    visitor: V,
    projection: PhantomData<fn() -> P>,
}

impl<V, P> Cooked<V, P> {
    #[inline(always)]
    pub(crate) fn new(visitor: V) -> Self {
        Self {
            visitor,
            projection: PhantomData,
        }
    }
}

impl<A, V, P> Thunk<A> for Cooked<V, P>
where
    P: Projection,
    V: Visitor<P::Arg<A>>,
{
    type Output = <V as Visitor<P::Arg<A>>>::Output;

    #[inline(always)]
    fn call(mut self, index: usize, value: A) -> Self::Output {
        self.visitor.visit(P::project(index, value))
    }
}

/// Output of visiting a `&'a Variant<L>` with `V` under projection `P`.
pub type VisitOutput<'a, L, V, P = Plain> = <L as Dispatch<'a, Cooked<V, P>>>::Output;

/// Output of visiting a `&'a mut Variant<L>` with `V` under projection `P`.
pub type VisitMutOutput<'a, L, V, P = Plain> = <L as DispatchMut<'a, Cooked<V, P>>>::Output;

/// Output of visiting an owned `Variant<L>` with `V` under projection `P`.
pub type VisitOnceOutput<L, V, P = Plain> = <L as DispatchOnce<Cooked<V, P>>>::Output;

pub(crate) fn visit<'a, P, L, V>(variant: &'a Variant<L>, visitor: V) -> Result<VisitOutput<'a, L, V, P>, BadAccess>
where
    L: Dispatch<'a, Cooked<V, P>>,
{
    let (index, storage) = variant.raw.live().ok_or(BadAccess::valueless())?;
    // SAFETY: `live` yields the index of the constructed cell.
    Ok(unsafe { L::dispatch(storage, index, 0, Cooked::new(visitor)) })
}

pub(crate) fn visit_mut<'a, P, L, V>(
    variant: &'a mut Variant<L>,
    visitor: V,
) -> Result<VisitMutOutput<'a, L, V, P>, BadAccess>
where
    L: DispatchMut<'a, Cooked<V, P>>,
{
    let (index, storage) = variant.raw.live_mut().ok_or(BadAccess::valueless())?;
    // SAFETY: `live_mut` yields the index of the constructed cell.
    Ok(unsafe { L::dispatch_mut(storage, index, 0, Cooked::new(visitor)) })
}

pub(crate) fn visit_into<P, L, V>(variant: Variant<L>, visitor: V) -> Result<VisitOnceOutput<L, V, P>, BadAccess>
where
    L: DispatchOnce<Cooked<V, P>>,
{
    let (index, storage) = variant.raw.into_live().ok_or(BadAccess::valueless())?;
    // SAFETY: `into_live` yields the constructed cell and gives up ownership of it.
    Ok(unsafe { L::dispatch_once(storage, index, 0, Cooked::new(visitor)) })
}
