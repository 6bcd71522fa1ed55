use crate::list::{Cons, Nil};
use crate::monostate::Monostate;
use crate::tagged::Variant;

pub(super) type Slot<T> = Variant<Cons<Monostate, Cons<T, Nil>>>;

/// Resets a slot to the empty alternative when dropped while armed.
///
/// Armed around every operation that can fail part-way, so an early return or
/// an unwinding panic leaves the optional empty rather than valueless.
pub(super) struct ResetGuard<'a, T> {
    slot: &'a mut Slot<T>,
    armed: bool,
}

impl<'a, T> ResetGuard<'a, T> {
    #[inline]
    pub(super) fn arm(slot: &'a mut Slot<T>) -> Self {
        Self { slot, armed: true }
    }

    #[inline]
    pub(super) fn slot(&mut self) -> &mut Slot<T> {
        &mut *self.slot
    }

    /// Releases the guard, keeping whatever the slot now holds.
    #[inline]
    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for ResetGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.slot.emplace::<0>(Monostate);
        }
    }
}
