//! The raw variant: overlapping storage plus the tag naming its live cell.
//!
//! ## Tag invariant
//! `tag >= 0` exactly when cell `tag` is constructed. `tag == -1` is the
//! valueless state, in which no cell is live.
//!
//! Every transition sets the tag to valueless *before* running a destructor
//! or a constructor, and names the new cell only after its construction
//! completes. An unwinding panic at any point therefore leaves the variant
//! either unchanged or valueless, never with a tag naming a dead cell.

mod clone;
mod source;

pub use clone::CloneAlternatives;
pub(crate) use source::{infallible, Fallible, Lazy, Ready, Source};

use core::mem::{self, ManuallyDrop, MaybeUninit};

use crate::error::BadAccess;
use crate::list::{Alternatives, At, Cons};
use crate::storage::{self, Node};
use crate::trace::{became_valueless, transition};

const VALUELESS: i32 = -1;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
#[inline(always)]
const fn tag_of(index: usize) -> i32 {
    index as i32
}

pub(crate) struct RawVariant<L: Alternatives> {
    storage: MaybeUninit<L::Storage>,
    tag: i32,
}

impl<L: Alternatives> RawVariant<L> {
    #[inline]
    pub(crate) const fn valueless() -> Self {
        Self {
            storage: MaybeUninit::uninit(),
            tag: VALUELESS,
        }
    }

    /// A variant holding alternative `N`.
    #[inline]
    pub(crate) fn with<N>(value: L::Output) -> Self
    where
        L: At<N>,
    {
        let mut raw = Self::valueless();
        // SAFETY: a fresh slot has no live cell.
        unsafe { raw.construct_into::<N>(value) };
        raw
    }

    /// A variant holding alternative `N`, built by `source`.
    pub(crate) fn build<N, S>(source: S) -> Result<Self, S::Error>
    where
        L: At<N>,
        S: Source<L::Output>,
    {
        source.build().map(Self::with::<N>)
    }

    /// Reassembles a variant from a storage value and the index of its live cell.
    ///
    /// # Safety
    /// Cell `index` of `storage` must be live and `index < L::LEN`.
    #[inline]
    pub(crate) unsafe fn from_parts(index: usize, storage: L::Storage) -> Self {
        const { assert!(L::LEN <= i32::MAX as usize, "too many alternatives") };
        debug_assert!(index < L::LEN);
        Self {
            storage: MaybeUninit::new(storage),
            tag: tag_of(index),
        }
    }

    #[inline(always)]
    pub(crate) fn index(&self) -> Option<usize> {
        usize::try_from(self.tag).ok()
    }

    /// The raw tag: the live index, or `-1` when valueless.
    #[inline(always)]
    pub(crate) fn tag(&self) -> i32 {
        self.tag
    }

    #[inline(always)]
    pub(crate) fn is_valueless(&self) -> bool {
        self.tag == VALUELESS
    }

    #[inline(always)]
    pub(crate) fn holds<N>(&self) -> bool
    where
        L: At<N>,
    {
        self.index() == Some(<L as At<N>>::INDEX)
    }

    /// The live index and the storage holding it, or `None` when valueless.
    #[inline]
    pub(crate) fn live(&self) -> Option<(usize, &L::Storage)> {
        let index = self.index()?;
        // SAFETY: a live tag means cell `index` is constructed, so the slot is initialized.
        Some((index, unsafe { self.storage.assume_init_ref() }))
    }

    #[inline]
    pub(crate) fn live_mut(&mut self) -> Option<(usize, &mut L::Storage)> {
        let index = self.index()?;
        // SAFETY: as for `live`.
        Some((index, unsafe { self.storage.assume_init_mut() }))
    }

    /// Moves the storage out with the index of its live cell.
    ///
    /// The caller owns the live cell afterwards.
    #[inline]
    pub(crate) fn into_live(self) -> Option<(usize, L::Storage)> {
        let this = ManuallyDrop::new(self);
        let index = this.index()?;
        // SAFETY: the slot is initialized, and `this` never drops, so the cell
        // changes owner exactly once.
        Some((index, unsafe { this.storage.assume_init_read() }))
    }

    pub(crate) fn get<N>(&self) -> Result<&L::Output, BadAccess>
    where
        L: At<N>,
    {
        if self.holds::<N>() {
            // SAFETY: the tag names cell `N`.
            Ok(unsafe { storage::raw_get::<L, N>(&self.storage) })
        } else {
            Err(BadAccess::mismatch(<L as At<N>>::INDEX, self.index()))
        }
    }

    pub(crate) fn get_mut<N>(&mut self) -> Result<&mut L::Output, BadAccess>
    where
        L: At<N>,
    {
        if self.holds::<N>() {
            // SAFETY: the tag names cell `N`.
            Ok(unsafe { storage::raw_get_mut::<L, N>(&mut self.storage) })
        } else {
            Err(BadAccess::mismatch(<L as At<N>>::INDEX, self.index()))
        }
    }

    /// # Safety
    /// Cell `N` must be live.
    #[inline(always)]
    pub(crate) unsafe fn get_unchecked<N>(&self) -> &L::Output
    where
        L: At<N>,
    {
        debug_assert!(self.holds::<N>(), "unchecked access to a dead alternative");
        // SAFETY: forwarded contract.
        unsafe { storage::raw_get::<L, N>(&self.storage) }
    }

    /// # Safety
    /// Cell `N` must be live.
    #[inline(always)]
    pub(crate) unsafe fn get_unchecked_mut<N>(&mut self) -> &mut L::Output
    where
        L: At<N>,
    {
        debug_assert!(self.holds::<N>(), "unchecked access to a dead alternative");
        // SAFETY: forwarded contract.
        unsafe { storage::raw_get_mut::<L, N>(&mut self.storage) }
    }

    /// Moves alternative `N` out, or hands the variant back if it holds another.
    pub(crate) fn into_alternative<N>(self) -> Result<L::Output, Self>
    where
        L: At<N>,
    {
        if !self.holds::<N>() {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        // SAFETY: the tag names cell `N`, and `this` never drops.
        Ok(unsafe { storage::take::<L, N>(&mut this.storage) })
    }

    /// Placement-constructs cell `N` and names it in the tag.
    ///
    /// # Safety
    /// The variant must be valueless.
    #[inline]
    unsafe fn construct_into<N>(&mut self, value: L::Output) -> &mut L::Output
    where
        L: At<N>,
    {
        const { assert!(L::LEN <= i32::MAX as usize, "too many alternatives") };
        debug_assert!(self.is_valueless());
        // SAFETY: valueless means no cell is live.
        unsafe { storage::construct::<L, N>(&mut self.storage, value) };
        self.tag = tag_of(<L as At<N>>::INDEX);
        transition!(index = <L as At<N>>::INDEX, "alternative constructed");
        // SAFETY: cell `N` was just constructed.
        unsafe { storage::raw_get_mut::<L, N>(&mut self.storage) }
    }

    /// Destroys the live alternative, if any, leaving the variant valueless.
    pub(crate) fn clear(&mut self) {
        let Some(index) = self.index() else {
            return;
        };
        self.tag = VALUELESS;
        transition!(index, "alternative destroyed");
        if L::NEEDS_DROP {
            // SAFETY: the tag named `index` until just above.
            unsafe { L::destroy(self.storage.as_mut_ptr(), index) }
        }
    }

    /// Destroys the current alternative, then constructs `N` from `value`.
    #[inline]
    pub(crate) fn emplace<N>(&mut self, value: L::Output) -> &mut L::Output
    where
        L: At<N>,
    {
        infallible(self.emplace_source::<N, _>(Ready(value)))
    }

    /// Destroys the current alternative, then constructs `N` from `source`.
    ///
    /// A failing or panicking source leaves the variant valueless.
    pub(crate) fn emplace_source<N, S>(&mut self, source: S) -> Result<&mut L::Output, S::Error>
    where
        L: At<N>,
        S: Source<L::Output>,
    {
        self.clear();
        match source.build() {
            // SAFETY: `clear` left the variant valueless.
            Ok(value) => Ok(unsafe { self.construct_into::<N>(value) }),
            Err(error) => {
                became_valueless!(index = <L as At<N>>::INDEX, "constructor failed during emplace");
                Err(error)
            }
        }
    }

    /// Converting assignment of alternative `N`.
    ///
    /// - `N` already live: the new value is built, then assigned in place.
    /// - fallible source: the new value is built into a scratch value first; a
    ///   failure leaves the variant unchanged.
    /// - ready value: the old alternative is destroyed and the value moved in.
    pub(crate) fn assign_source<N, S>(&mut self, source: S) -> Result<&mut L::Output, S::Error>
    where
        L: At<N>,
        S: Source<L::Output>,
    {
        if self.holds::<N>() {
            let value = source.build()?;
            // SAFETY: the tag names cell `N`.
            let live = unsafe { storage::raw_get_mut::<L, N>(&mut self.storage) };
            *live = value;
            Ok(live)
        } else if S::MAY_FAIL {
            transition!(index = <L as At<N>>::INDEX, "assigning through a scratch value");
            let value = source.build()?;
            self.clear();
            // SAFETY: `clear` left the variant valueless.
            Ok(unsafe { self.construct_into::<N>(value) })
        } else {
            self.emplace_source::<N, S>(source)
        }
    }

    /// Move assignment from another variant of the same list.
    pub(crate) fn assign(&mut self, mut source: Self) {
        match (self.index(), source.index()) {
            (_, None) => self.clear(),
            (Some(held), Some(incoming)) if held == incoming => {
                // The source cell is moved out by `replace_at`; it must be dead
                // in the tag before the old target value's destructor can run.
                source.tag = VALUELESS;
                // SAFETY: both slots hold a live cell `held`, and the variants are distinct.
                unsafe { L::replace_at(self.storage.as_mut_ptr(), source.storage.as_mut_ptr(), held) }
            }
            (_, Some(_)) => {
                self.clear();
                self.storage = mem::replace(&mut source.storage, MaybeUninit::uninit());
                self.tag = mem::replace(&mut source.tag, VALUELESS);
                transition!(index = self.tag, "alternative moved in");
            }
        }
    }

    /// Exchanges the contents of two variants.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        match (self.index(), other.index()) {
            (None, None) => {}
            (Some(a), Some(b)) if a == b => {
                // SAFETY: both hold a live cell `a`, and `&mut` guarantees distinct slots.
                unsafe { L::swap_at(self.storage.as_mut_ptr(), other.storage.as_mut_ptr(), a) }
            }
            _ => {
                let scratch = other.take();
                *other = self.take();
                *self = scratch;
            }
        }
    }

    /// Moves the contents out, leaving this variant valueless.
    #[inline]
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::valueless())
    }

    /// Re-homes the contents into a list with `H` prepended.
    pub(crate) fn widen<H>(self) -> RawVariant<Cons<H, L>> {
        match self.into_live() {
            None => RawVariant::valueless(),
            // SAFETY: cell `index` of `L` is cell `index + 1` of `Cons<H, L>`.
            Some((index, storage)) => unsafe { RawVariant::from_parts(index + 1, Node::from_tail(storage)) },
        }
    }
}

impl<L: CloneAlternatives> Clone for RawVariant<L> {
    fn clone(&self) -> Self {
        match self.live() {
            None => Self::valueless(),
            // SAFETY: `live` yields the constructed cell, and the clone holds the same one.
            Some((index, storage)) => unsafe { Self::from_parts(index, L::clone_at(storage, index)) },
        }
    }

    /// Clone assignment.
    ///
    /// - source valueless: this variant becomes valueless.
    /// - same alternative: clone-assigned in place.
    /// - otherwise: the source alternative is cloned into a scratch value
    ///   first, so a panicking clone leaves this variant unchanged.
    fn clone_from(&mut self, source: &Self) {
        match (self.index(), source.live()) {
            (_, None) => self.clear(),
            (Some(held), Some((incoming, from))) if held == incoming => {
                // SAFETY: both hold a live cell `held`.
                unsafe { L::clone_from_at(self.storage.assume_init_mut(), from, held) }
            }
            (_, Some((incoming, from))) => {
                // SAFETY: `live` yields the constructed cell.
                let scratch = unsafe { L::clone_at(from, incoming) };
                self.clear();
                self.storage = MaybeUninit::new(scratch);
                self.tag = tag_of(incoming);
                transition!(index = incoming, "alternative clone-assigned");
            }
        }
    }
}

impl<L: Alternatives> Drop for RawVariant<L> {
    fn drop(&mut self) {
        self.clear();
    }
}
