//! The empty alternative.

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A unit alternative with a single value.
///
/// Placing it first makes a variant default-constructible regardless of the
/// other alternatives, and [`Optional`](crate::Optional) uses it for the empty
/// state. All instances are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Monostate;

impl Hash for Monostate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(42);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    #[test]
    fn all_instances_are_equal() {
        assert_eq!(Monostate, Monostate);
        assert!(Monostate <= Monostate);
        assert!(!(Monostate < Monostate));
    }

    #[test]
    fn hash_is_a_fixed_constant() {
        let mut a = DefaultHasher::new();
        Monostate.hash(&mut a);
        let mut b = DefaultHasher::new();
        b.write_usize(42);
        assert_eq!(a.finish(), b.finish());
    }
}
