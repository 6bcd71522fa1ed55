//! Unsafe, centralized operations on alternative cells.
//!
//! Every read, write, drop and swap of a cell in this crate goes through these
//! helpers, so they are the single place to audit raw access.
//!
//! ## Core invariant
//! A cell is live exactly while the owning variant's tag names it:
//! - from the end of a successful placement construction,
//! - until its destructor starts or its value is moved out.
//!
//! Callers must additionally uphold aliasing rules for any produced references.

use core::ptr;

/// Interprets a live cell as `&T`.
///
/// # Safety
/// - `cell` must point to a live `T`.
/// - The reference must not outlive the cell or coexist with a `&mut T` to it.
#[inline(always)]
pub(crate) unsafe fn as_ref<'a, T>(cell: *const T) -> &'a T {
    // SAFETY: caller asserts `cell` is live and unaliased by writers.
    unsafe { &*cell }
}

/// Interprets a live cell as `&mut T`.
///
/// # Safety
/// - `cell` must point to a live `T`.
/// - The returned reference must be exclusive for its lifetime.
#[inline(always)]
pub(crate) unsafe fn as_mut<'a, T>(cell: *mut T) -> &'a mut T {
    // SAFETY: caller asserts `cell` is live and exclusive.
    unsafe { &mut *cell }
}

/// Bitwise-moves a live value out of a cell.
///
/// # Safety
/// - `cell` must point to a live `T`.
/// - The cell is logically dead afterwards; dropping it again is a double drop.
#[inline(always)]
pub(crate) unsafe fn read<T>(cell: *const T) -> T {
    // SAFETY: caller asserts liveness and takes over ownership.
    unsafe { ptr::read(cell) }
}

/// Writes a value into a cell without dropping the prior bytes.
///
/// # Safety
/// - `cell` must be valid for writes and aligned.
/// - Any value previously in the cell must already be dead; otherwise it leaks.
#[inline(always)]
pub(crate) unsafe fn write<T>(cell: *mut T, value: T) {
    // SAFETY: caller upholds the overwrite contract.
    unsafe { ptr::write(cell, value) }
}

/// Assigns over a live cell, dropping its old value.
///
/// If the old value's destructor unwinds, `value` has still been written.
///
/// # Safety
/// `cell` must point to a live `T`.
#[inline(always)]
pub(crate) unsafe fn assign<T>(cell: *mut T, value: T) {
    // SAFETY: caller asserts `cell` is live.
    unsafe { *cell = value }
}

/// Drops the value in a live cell.
///
/// # Safety
/// - `cell` must point to a live `T`.
/// - The cell is dead afterwards.
#[inline(always)]
pub(crate) unsafe fn drop_in_place<T>(cell: *mut T) {
    // SAFETY: caller asserts liveness.
    unsafe { ptr::drop_in_place(cell) }
}

/// Swaps two live cells.
///
/// # Safety
/// Both pointers must point to live values of `T` and must not overlap.
#[inline(always)]
pub(crate) unsafe fn swap<T>(a: *mut T, b: *mut T) {
    // SAFETY: caller asserts both cells are live and distinct.
    unsafe { ptr::swap_nonoverlapping(a, b, 1) }
}
