//! Generated variants and optionals (requires the `proptest` feature)
#![cfg(feature = "proptest")]

use proptest::prelude::*;
use variant::*;

proptest! {
    #[test]
    fn test_generated_variants_hold_a_value(v in any::<Variant![u8, String, Monostate]>()) {
        prop_assert!(!v.is_valueless());
        prop_assert!(v.index().is_some_and(|i| i < 3));
        prop_assert_eq!(v.clone(), v);
    }

    #[test]
    fn test_generated_optionals_round_trip(o in any::<Optional<i64>>()) {
        let text = serde_json::to_string(&o).unwrap();
        let back: Optional<i64> = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, o);
    }

    #[test]
    fn test_generated_variants_round_trip(v in any::<Variant![bool, i32, Vec<u8>]>()) {
        let text = serde_json::to_string(&v).unwrap();
        let back: Variant![bool, i32, Vec<u8>] = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, v);
    }
}
