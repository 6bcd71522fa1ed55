//! # `variant` - Checked Sum Types
//!
//! A generic tagged union over a compile-time list of alternative types, plus an
//! [`Optional`] built on top of it. Exactly one alternative is live at a time;
//! the only other state is *valueless*, which is reachable solely through a
//! failed or panicking replacement.
//!
//! ## Guarantees
//!
//! ### Memory Safety
//! - **Single live cell**: all alternatives share one overlapping storage slot,
//!   and the tag names the only constructed cell. Every unsafe read or drop of a
//!   cell is preceded by a tag check, or by a caller contract spelled out on an
//!   `unsafe fn`.
//! - **Tag before user code**: the tag is marked valueless before any
//!   destructor or constructor runs, so an unwinding panic can never leave the
//!   tag naming a dead cell.
//! - **Centralized raw access**: pointer casts, reads, writes and drops go
//!   through [`storage`], which is the only place that reasons about layout.
//!
//! ### Replacement Guarantees
//! - **Emplace** destroys first, then constructs. A failing constructor leaves
//!   the variant valueless.
//! - **Converting assignment** with a fallible constructor builds into a scratch
//!   value first, so a failure leaves the old alternative untouched.
//! - **Clone assignment** clones into a scratch value before destroying the old
//!   alternative.
//!
//! ## Architecture
//!
//! 1. **Alternative lists** ([`list`]): `Cons<A, Cons<B, Nil>>` spelled with the
//!    [`Variant!`] macro. Positions are Peano numbers so alternatives can be
//!    named by literal index (`get::<1>()`) or by type (`get_by_type::<String, _>()`).
//! 2. **Storage** ([`storage`]): a nested `repr(C)` union; every alternative
//!    lives at offset zero.
//! 3. **Lifecycle** (`lifecycle`): the raw slot plus tag, with the emplace,
//!    assignment and swap algorithms.
//! 4. **Dispatch** ([`dispatch`]): statically generated branch chains that route
//!    a runtime index (or tuple of indices) to a typed visitor.
//! 5. **Façades**: [`Variant`], [`Optional`] and [`NonPropagatingCache`].
//!
//! ## Example
//!
//! ```rust
//! use variant::{Variant, Visitor};
//!
//! struct Describe;
//!
//! impl Visitor<&i32> for Describe {
//!     type Output = String;
//!     fn visit(&mut self, value: &i32) -> String {
//!         format!("int {value}")
//!     }
//! }
//!
//! impl Visitor<&String> for Describe {
//!     type Output = String;
//!     fn visit(&mut self, value: &String) -> String {
//!         format!("string {value:?}")
//!     }
//! }
//!
//! let mut v: Variant![i32, String] = Variant::new(42_i32);
//! assert_eq!(v.index(), Some(0));
//! assert_eq!(v.visit(Describe).unwrap(), "int 42");
//!
//! v.emplace::<1>("x".to_string());
//! assert_eq!(v.get::<1>().unwrap(), "x");
//! assert!(v.get::<0>().is_err());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod trace;

pub mod cache;
pub mod dispatch;
pub mod error;
pub mod list;
pub mod monostate;
pub mod optional;
pub mod storage;
pub mod tagged;

mod lifecycle;

#[cfg(feature = "proptest")]
pub mod arbitrary;

pub use cache::NonPropagatingCache;
pub use dispatch::{Indexed, Visitor};
pub use error::{BadAccess, BadOptionalAccess, ConstructionFailure};
pub use lifecycle::CloneAlternatives;
pub use list::{Alt, Alternatives, Cons, Contains, Nil};
pub use monostate::Monostate;
pub use optional::{make_optional, Optional};
pub use tagged::Variant;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // The empty alternative is a ZST.
    assert!(mem::size_of::<Monostate>() == 0);

    // Storage is the largest alternative plus a 32-bit tag, padded to the
    // strictest alignment.
    assert!(mem::size_of::<Variant<Cons<u64, Cons<u8, Nil>>>>() == 16);
    assert!(mem::align_of::<Variant<Cons<u64, Cons<u8, Nil>>>>() == mem::align_of::<u64>());
    assert!(mem::size_of::<Variant<Cons<u8, Cons<u16, Nil>>>>() == 8);

    // `Optional<T>` pays for the tag and nothing else.
    assert!(mem::size_of::<Optional<u32>>() == 8);
    assert!(mem::size_of::<Optional<Monostate>>() == mem::size_of::<i32>());
};
