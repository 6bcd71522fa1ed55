//! Serialization of variants and optionals through `serde_json`

use variant::*;

type V = Variant![i32, String];

#[test]
fn test_variant_serializes_as_index_value_pair() {
    let v = V::new(String::from("x"));
    assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,"x"]"#);

    let v = V::new(-3_i32);
    assert_eq!(serde_json::to_string(&v).unwrap(), "[0,-3]");
}

#[test]
fn test_variant_deserializes() {
    let v: V = serde_json::from_str(r#"[1,"y"]"#).unwrap();
    assert_eq!(v.get::<1>().unwrap(), "y");

    let v: V = serde_json::from_str("[0,12]").unwrap();
    assert_eq!(v.get::<0>(), Ok(&12));
}

#[test]
fn test_round_trip_preserves_equality() {
    let original: Variant![Monostate, Vec<u8>, Optional<bool>] = Variant::new(Optional::some(true));
    let text = serde_json::to_string(&original).unwrap();
    assert_eq!(text, "[2,true]");
    let decoded: Variant![Monostate, Vec<u8>, Optional<bool>] = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_valueless_variant_fails_to_serialize() {
    let mut v = V::new(1_i32);
    let _ = v.try_emplace_with::<1, _, _>(|| Err(()));
    let err = serde_json::to_string(&v).unwrap_err();
    assert!(err.to_string().contains("valueless"));
}

#[test]
fn test_malformed_input_is_rejected() {
    assert!(serde_json::from_str::<V>("[2,0]").is_err());
    assert!(serde_json::from_str::<V>("[0]").is_err());
    assert!(serde_json::from_str::<V>(r#"[0,"wrong type"]"#).is_err());
    assert!(serde_json::from_str::<V>("[]").is_err());
}

#[test]
fn test_optional_serializes_as_option() {
    assert_eq!(serde_json::to_string(&Optional::some(5)).unwrap(), "5");
    assert_eq!(serde_json::to_string(&Optional::<i32>::new()).unwrap(), "null");

    let o: Optional<String> = serde_json::from_str(r#""v""#).unwrap();
    assert_eq!(o.as_ref().map(String::as_str), Some("v"));
    let o: Optional<String> = serde_json::from_str("null").unwrap();
    assert!(o.is_none());
}

#[test]
fn test_monostate_serializes_as_unit() {
    assert_eq!(serde_json::to_string(&Monostate).unwrap(), "null");
    let m: Monostate = serde_json::from_str("null").unwrap();
    assert_eq!(m, Monostate);
}
