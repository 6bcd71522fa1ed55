//! The [`Variant`] façade.
//!
//! Alternatives are addressed two ways:
//! - by literal index: `in_place::<1>`, `get::<1>`, `emplace::<1>`;
//! - by type, when the type occurs exactly once: `new`, `get_by_type::<T, _>`,
//!   `emplace_by_type`. The trailing `_` is the inferred position.

mod relational;
mod serialize;

pub use relational::{DebugAlternatives, EqAlternatives, HashAlternatives, OrdAlternatives, PartialEqAlternatives, PartialOrdAlternatives};
pub use serialize::{DeserializeAlternatives, SerializeAlternatives};

use crate::dispatch::{self, Cooked, Dispatch, DispatchMut, DispatchOnce, Plain, WithIndex};
use crate::dispatch::{VisitMutOutput, VisitOnceOutput, VisitOutput};
use crate::error::{BadAccess, ConstructionFailure};
use crate::lifecycle::{infallible, CloneAlternatives, Fallible, Lazy, RawVariant, Ready};
use crate::list::{Alt, Alternatives, At, Cons, Contains, Idx, Pos, Position, Z};

/// A tagged union holding exactly one of the alternatives in `L`, or nothing
/// after a failed replacement.
///
/// Name the type with [`Variant!`](crate::Variant!):
///
/// ```rust
/// use variant::Variant;
///
/// let mut v: Variant![i32, String] = Variant::new(7_i32);
/// v.set_by_type(String::from("seven"));
/// assert_eq!(v.get_by_type::<String, _>().unwrap(), "seven");
/// assert_eq!(v.index(), Some(1));
/// ```
///
/// ## Valueless state
/// A variant is valueless only after a replacement failed part-way: an
/// `emplace` whose constructor returned an error or panicked, or whose old
/// alternative's destructor panicked. Every checked access then reports
/// [`BadAccess`], `index()` returns `None`, and visiting fails. Any successful
/// emplace or assignment makes it valid again.
pub struct Variant<L: Alternatives> {
    pub(crate) raw: RawVariant<L>,
}

impl<L: Alternatives> Variant<L> {
    /// Number of alternatives.
    pub const LEN: usize = L::LEN;

    #[inline]
    pub(crate) fn from_raw(raw: RawVariant<L>) -> Self {
        Self { raw }
    }

    /// Constructs alternative `I` from `value`.
    #[inline]
    pub fn in_place<const I: usize>(value: Alt<L, I>) -> Self
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        Self::from_raw(RawVariant::with::<Pos<I>>(value))
    }

    /// Constructs alternative `I` from a constructor closure.
    #[inline]
    pub fn in_place_with<const I: usize, F>(make: F) -> Self
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Alt<L, I>,
    {
        Self::in_place::<I>(make())
    }

    /// Constructs alternative `I` from a fallible constructor closure.
    ///
    /// # Errors
    /// Returns the constructor's error, wrapped with the target index.
    pub fn try_in_place_with<const I: usize, E, F>(make: F) -> Result<Self, ConstructionFailure<E>>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Result<Alt<L, I>, E>,
    {
        RawVariant::build::<Pos<I>, _>(Fallible(make))
            .map(Self::from_raw)
            .map_err(|error| ConstructionFailure::new(<L as At<Pos<I>>>::INDEX, error))
    }

    /// Constructs the alternative of type `T`.
    ///
    /// `T` must occur exactly once in the list.
    #[inline]
    pub fn new<T, N>(value: T) -> Self
    where
        L: Contains<T, N>,
    {
        Self::from_raw(RawVariant::with::<N>(value))
    }

    /// Index of the live alternative, or `None` when valueless.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.raw.index()
    }

    /// Whether a failed replacement left the variant without a value.
    #[inline]
    pub fn is_valueless(&self) -> bool {
        self.raw.is_valueless()
    }

    /// Whether alternative `I` is live.
    #[inline]
    pub fn holds<const I: usize>(&self) -> bool
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.holds::<Pos<I>>()
    }

    /// Whether the alternative of type `T` is live.
    #[inline]
    pub fn holds_alternative<T, N>(&self) -> bool
    where
        L: Contains<T, N>,
    {
        self.raw.holds::<N>()
    }

    /// Checked reference to alternative `I`.
    ///
    /// # Errors
    /// [`BadAccess`] if alternative `I` is not live.
    #[inline]
    pub fn get<const I: usize>(&self) -> Result<&Alt<L, I>, BadAccess>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.get::<Pos<I>>()
    }

    /// Checked mutable reference to alternative `I`.
    ///
    /// # Errors
    /// [`BadAccess`] if alternative `I` is not live.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> Result<&mut Alt<L, I>, BadAccess>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.get_mut::<Pos<I>>()
    }

    /// Reference to alternative `I` if it is live.
    #[inline]
    pub fn get_if<const I: usize>(&self) -> Option<&Alt<L, I>>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.get::<Pos<I>>().ok()
    }

    /// Mutable reference to alternative `I` if it is live.
    #[inline]
    pub fn get_if_mut<const I: usize>(&mut self) -> Option<&mut Alt<L, I>>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.get_mut::<Pos<I>>().ok()
    }

    /// Checked reference to the alternative of type `T`.
    ///
    /// # Errors
    /// [`BadAccess`] if `T` is not the live alternative.
    #[inline]
    pub fn get_by_type<T, N>(&self) -> Result<&T, BadAccess>
    where
        L: Contains<T, N>,
    {
        self.raw.get::<N>()
    }

    /// Checked mutable reference to the alternative of type `T`.
    ///
    /// # Errors
    /// [`BadAccess`] if `T` is not the live alternative.
    #[inline]
    pub fn get_by_type_mut<T, N>(&mut self) -> Result<&mut T, BadAccess>
    where
        L: Contains<T, N>,
    {
        self.raw.get_mut::<N>()
    }

    /// Reference to the alternative of type `T` if it is live.
    #[inline]
    pub fn get_if_by_type<T, N>(&self) -> Option<&T>
    where
        L: Contains<T, N>,
    {
        self.raw.get::<N>().ok()
    }

    /// Mutable reference to the alternative of type `T` if it is live.
    #[inline]
    pub fn get_if_by_type_mut<T, N>(&mut self) -> Option<&mut T>
    where
        L: Contains<T, N>,
    {
        self.raw.get_mut::<N>().ok()
    }

    /// Reference to alternative `I` without checking the tag.
    ///
    /// # Safety
    /// Alternative `I` must be live.
    #[inline]
    pub unsafe fn get_unchecked<const I: usize>(&self) -> &Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        // SAFETY: forwarded contract.
        unsafe { self.raw.get_unchecked::<Pos<I>>() }
    }

    /// Mutable reference to alternative `I` without checking the tag.
    ///
    /// # Safety
    /// Alternative `I` must be live.
    #[inline]
    pub unsafe fn get_unchecked_mut<const I: usize>(&mut self) -> &mut Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        // SAFETY: forwarded contract.
        unsafe { self.raw.get_unchecked_mut::<Pos<I>>() }
    }

    /// Moves alternative `I` out.
    ///
    /// # Errors
    /// Hands the variant back unchanged if alternative `I` is not live.
    #[inline]
    pub fn into_inner<const I: usize>(self) -> Result<Alt<L, I>, Self>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.into_alternative::<Pos<I>>().map_err(Self::from_raw)
    }

    /// Moves the alternative of type `T` out.
    ///
    /// # Errors
    /// Hands the variant back unchanged if `T` is not the live alternative.
    #[inline]
    pub fn into_inner_by_type<T, N>(self) -> Result<T, Self>
    where
        L: Contains<T, N>,
    {
        self.raw.into_alternative::<N>().map_err(Self::from_raw)
    }

    /// Destroys the current alternative and constructs alternative `I`.
    ///
    /// Works from the valueless state too. Returns the new alternative.
    #[inline]
    pub fn emplace<const I: usize>(&mut self, value: Alt<L, I>) -> &mut Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        self.raw.emplace::<Pos<I>>(value)
    }

    /// Destroys the current alternative and constructs alternative `I` from
    /// `make`.
    ///
    /// If `make` panics, the variant is left valueless.
    #[inline]
    pub fn emplace_with<const I: usize, F>(&mut self, make: F) -> &mut Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Alt<L, I>,
    {
        infallible(self.raw.emplace_source::<Pos<I>, _>(Lazy(make)))
    }

    /// Destroys the current alternative and constructs alternative `I` from a
    /// fallible constructor.
    ///
    /// # Errors
    /// If `make` fails, the variant is left valueless and the error is
    /// returned with the target index.
    pub fn try_emplace_with<const I: usize, E, F>(&mut self, make: F) -> Result<&mut Alt<L, I>, ConstructionFailure<E>>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Result<Alt<L, I>, E>,
    {
        self.raw
            .emplace_source::<Pos<I>, _>(Fallible(make))
            .map_err(|error| ConstructionFailure::new(<L as At<Pos<I>>>::INDEX, error))
    }

    /// Destroys the current alternative and constructs the alternative of
    /// type `T`.
    #[inline]
    pub fn emplace_by_type<T, N>(&mut self, value: T) -> &mut T
    where
        L: Contains<T, N>,
    {
        self.raw.emplace::<N>(value)
    }

    /// Converting assignment of alternative `I`.
    ///
    /// Assigns in place if alternative `I` is already live, otherwise
    /// destroys the current alternative and moves `value` in.
    #[inline]
    pub fn set<const I: usize>(&mut self, value: Alt<L, I>) -> &mut Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
    {
        infallible(self.raw.assign_source::<Pos<I>, _>(Ready(value)))
    }

    /// Converting assignment of alternative `I` from a constructor closure.
    ///
    /// The new value is built before the current alternative is touched, so a
    /// panicking `make` leaves the variant unchanged.
    #[inline]
    pub fn set_with<const I: usize, F>(&mut self, make: F) -> &mut Alt<L, I>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Alt<L, I>,
    {
        infallible(self.raw.assign_source::<Pos<I>, _>(Lazy(make)))
    }

    /// Converting assignment of alternative `I` from a fallible constructor.
    ///
    /// # Errors
    /// If `make` fails, the variant is left unchanged and the error is
    /// returned with the target index.
    pub fn try_set_with<const I: usize, E, F>(&mut self, make: F) -> Result<&mut Alt<L, I>, ConstructionFailure<E>>
    where
        Idx<I>: Position,
        L: At<Pos<I>>,
        F: FnOnce() -> Result<Alt<L, I>, E>,
    {
        self.raw
            .assign_source::<Pos<I>, _>(Fallible(make))
            .map_err(|error| ConstructionFailure::new(<L as At<Pos<I>>>::INDEX, error))
    }

    /// Converting assignment of the alternative of type `T`.
    #[inline]
    pub fn set_by_type<T, N>(&mut self, value: T) -> &mut T
    where
        L: Contains<T, N>,
    {
        infallible(self.raw.assign_source::<N, _>(Ready(value)))
    }

    /// Move assignment from another variant of the same type.
    ///
    /// Matching alternatives are assigned in place; otherwise the current
    /// alternative is destroyed and the source's moved in. A valueless source
    /// makes this variant valueless.
    #[inline]
    pub fn assign(&mut self, source: Self) {
        self.raw.assign(source.raw);
    }

    /// Exchanges the contents of two variants.
    ///
    /// Matching alternatives are swapped in place; otherwise the whole
    /// contents are exchanged, valueless states included.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Re-homes the contents into a variant with `H` prepended to the list.
    ///
    /// The live index shifts by one; a valueless variant stays valueless.
    #[inline]
    pub fn widen<H>(self) -> Variant<Cons<H, L>> {
        Variant::from_raw(self.raw.widen())
    }

    /// Visits the live alternative by shared reference.
    ///
    /// # Errors
    /// [`BadAccess`] if the variant is valueless.
    #[inline]
    pub fn visit<'a, V>(&'a self, visitor: V) -> Result<VisitOutput<'a, L, V>, BadAccess>
    where
        L: Dispatch<'a, Cooked<V, Plain>>,
    {
        dispatch::visit::<Plain, _, _>(self, visitor)
    }

    /// Visits the live alternative by mutable reference.
    ///
    /// # Errors
    /// [`BadAccess`] if the variant is valueless.
    #[inline]
    pub fn visit_mut<'a, V>(&'a mut self, visitor: V) -> Result<VisitMutOutput<'a, L, V>, BadAccess>
    where
        L: DispatchMut<'a, Cooked<V, Plain>>,
    {
        dispatch::visit_mut::<Plain, _, _>(self, visitor)
    }

    /// Visits the live alternative by value, consuming the variant.
    ///
    /// # Errors
    /// [`BadAccess`] if the variant is valueless.
    #[inline]
    pub fn visit_into<V>(self, visitor: V) -> Result<VisitOnceOutput<L, V>, BadAccess>
    where
        L: DispatchOnce<Cooked<V, Plain>>,
    {
        dispatch::visit_into::<Plain, _, _>(self, visitor)
    }

    /// Visits the live alternative as [`Indexed`](crate::Indexed).
    ///
    /// # Errors
    /// [`BadAccess`] if the variant is valueless.
    #[inline]
    pub fn visit_indexed<'a, V>(&'a self, visitor: V) -> Result<VisitOutput<'a, L, V, WithIndex>, BadAccess>
    where
        L: Dispatch<'a, Cooked<V, WithIndex>>,
    {
        dispatch::visit::<WithIndex, _, _>(self, visitor)
    }

    /// Visits the live alternative mutably, as [`Indexed`](crate::Indexed).
    ///
    /// # Errors
    /// [`BadAccess`] if the variant is valueless.
    #[inline]
    pub fn visit_indexed_mut<'a, V>(&'a mut self, visitor: V) -> Result<VisitMutOutput<'a, L, V, WithIndex>, BadAccess>
    where
        L: DispatchMut<'a, Cooked<V, WithIndex>>,
    {
        dispatch::visit_mut::<WithIndex, _, _>(self, visitor)
    }
}

impl<H: Default, T: Alternatives> Default for Variant<Cons<H, T>> {
    /// Holds the default value of the first alternative.
    fn default() -> Self {
        Self::from_raw(RawVariant::with::<Z>(H::default()))
    }
}

impl<L: CloneAlternatives> Clone for Variant<L> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.clone())
    }

    /// Clone assignment; see [`CloneAlternatives`].
    ///
    /// A panicking clone leaves `self` unchanged unless the alternatives
    /// already matched, in which case the alternative's own `clone_from`
    /// guarantee applies.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}
