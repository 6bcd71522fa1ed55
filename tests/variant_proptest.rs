//! Property tests checking variants and optionals against std models

use proptest::prelude::*;
use variant::*;

type V = Variant![u8, String];

/// Reference model: `None` stands for the valueless state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Model {
    Byte(u8),
    Text(String),
}

#[derive(Debug, Clone)]
enum Op {
    EmplaceByte(u8),
    EmplaceText(String),
    SetText(String),
    FailEmplace,
    FailSet,
    AssignCopy(Option<Model>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::EmplaceByte),
        "[a-z]{0,8}".prop_map(Op::EmplaceText),
        "[a-z]{0,8}".prop_map(Op::SetText),
        Just(Op::FailEmplace),
        Just(Op::FailSet),
        proptest::option::of(model()).prop_map(Op::AssignCopy),
    ]
}

fn model() -> impl Strategy<Value = Model> {
    prop_oneof![any::<u8>().prop_map(Model::Byte), "[a-z]{0,8}".prop_map(Model::Text)]
}

fn build(model: Option<&Model>) -> V {
    let mut v = V::new(0_u8);
    match model {
        Some(Model::Byte(b)) => {
            v.emplace::<0>(*b);
        }
        Some(Model::Text(s)) => {
            v.emplace::<1>(s.clone());
        }
        None => {
            let _ = v.try_emplace_with::<1, _, _>(|| Err(()));
        }
    }
    v
}

fn observe(v: &V) -> Option<Model> {
    match v.index() {
        Some(0) => v.get::<0>().ok().map(|b| Model::Byte(*b)),
        Some(1) => v.get::<1>().ok().map(|s| Model::Text(s.clone())),
        _ => None,
    }
}

proptest! {
    #[test]
    fn test_variant_follows_model(ops in proptest::collection::vec(op(), 0..32)) {
        let mut v = V::new(0_u8);
        let mut expected = Some(Model::Byte(0));
        for op in ops {
            match op {
                Op::EmplaceByte(b) => {
                    v.emplace::<0>(b);
                    expected = Some(Model::Byte(b));
                }
                Op::EmplaceText(s) => {
                    v.emplace::<1>(s.clone());
                    expected = Some(Model::Text(s));
                }
                Op::SetText(s) => {
                    v.set::<1>(s.clone());
                    expected = Some(Model::Text(s));
                }
                Op::FailEmplace => {
                    prop_assert!(v.try_emplace_with::<0, _, _>(|| Err("fail")).is_err());
                    expected = None;
                }
                Op::FailSet => {
                    prop_assert!(v.try_set_with::<1, _, _>(|| Err::<String, _>("fail")).is_err());
                }
                Op::AssignCopy(m) => {
                    v.clone_from(&build(m.as_ref()));
                    expected = m;
                }
            }
            prop_assert_eq!(observe(&v), expected.clone());
            prop_assert_eq!(v.is_valueless(), expected.is_none());
        }
    }

    #[test]
    fn test_ordering_matches_model(a in proptest::option::of(model()), b in proptest::option::of(model())) {
        let (va, vb) = (build(a.as_ref()), build(b.as_ref()));
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        prop_assert_eq!(va == vb, a == b);
    }

    #[test]
    fn test_swap_exchanges_contents(a in proptest::option::of(model()), b in proptest::option::of(model())) {
        let (mut va, mut vb) = (build(a.as_ref()), build(b.as_ref()));
        va.swap(&mut vb);
        prop_assert_eq!(observe(&va), b);
        prop_assert_eq!(observe(&vb), a);
    }

    #[test]
    fn test_optional_follows_option(values in proptest::collection::vec(proptest::option::of(any::<i16>()), 0..16)) {
        let mut o = Optional::new();
        let mut expected: Option<i16> = None;
        for value in values {
            match value {
                Some(n) => {
                    prop_assert_eq!(o.replace(n), expected.replace(n));
                }
                None => {
                    prop_assert_eq!(o.take(), expected.take());
                }
            }
            prop_assert_eq!(o.as_ref(), expected.as_ref());
            prop_assert_eq!(o.value_or(-1), expected.unwrap_or(-1));
        }
    }
}
