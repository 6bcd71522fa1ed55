//! Visitation over one, two and three variants

use std::fmt::Debug;

use variant::dispatch::{visit2, visit2_indexed, visit3, visit3_indexed};
use variant::*;

type V = Variant![i32, String];

struct Describe;

impl Visitor<&i32> for Describe {
    type Output = String;
    fn visit(&mut self, value: &i32) -> String {
        format!("int:{value}")
    }
}

impl Visitor<&String> for Describe {
    type Output = String;
    fn visit(&mut self, value: &String) -> String {
        format!("str:{value}")
    }
}

/// Formats any tuple of alternatives and counts its invocations.
#[derive(Default)]
struct Tally {
    calls: usize,
}

impl<A: Debug, B: Debug> Visitor<(A, B)> for Tally {
    type Output = String;
    fn visit(&mut self, (a, b): (A, B)) -> String {
        self.calls += 1;
        format!("{a:?}/{b:?}")
    }
}

impl<A: Debug, B: Debug, C: Debug> Visitor<(A, B, C)> for Tally {
    type Output = String;
    fn visit(&mut self, (a, b, c): (A, B, C)) -> String {
        self.calls += 1;
        format!("{a:?}/{b:?}/{c:?}")
    }
}

fn valueless() -> V {
    let mut v = V::new(0_i32);
    let _ = v.try_emplace_with::<1, _, _>(|| Err(()));
    v
}

#[test]
fn test_visit_routes_to_the_live_alternative() {
    assert_eq!(V::new(7_i32).visit(Describe), Ok("int:7".to_string()));
    assert_eq!(V::new(String::from("s")).visit(Describe), Ok("str:s".to_string()));
}

#[test]
fn test_visit_valueless_is_bad_access() {
    let err = valueless().visit(Describe).unwrap_err();
    assert!(err.is_valueless());
    assert_eq!(err.requested(), None);
}

#[test]
fn test_visit_mut_modifies_in_place() {
    struct Grow;

    impl Visitor<&mut i32> for Grow {
        type Output = ();
        fn visit(&mut self, value: &mut i32) {
            *value *= 10;
        }
    }

    impl Visitor<&mut String> for Grow {
        type Output = ();
        fn visit(&mut self, value: &mut String) {
            value.push_str("0");
        }
    }

    let mut a = V::new(4_i32);
    let mut b = V::new(String::from("4"));
    a.visit_mut(Grow).unwrap();
    b.visit_mut(Grow).unwrap();
    assert_eq!(a.get::<0>(), Ok(&40));
    assert_eq!(b.get::<1>().unwrap(), "40");
}

#[test]
fn test_visit_into_moves_the_alternative() {
    struct Own;

    impl Visitor<i32> for Own {
        type Output = String;
        fn visit(&mut self, value: i32) -> String {
            value.to_string()
        }
    }

    impl Visitor<String> for Own {
        type Output = String;
        fn visit(&mut self, value: String) -> String {
            value
        }
    }

    assert_eq!(V::new(String::from("moved")).visit_into(Own), Ok(String::from("moved")));
    assert_eq!(V::new(3_i32).visit_into(Own), Ok(String::from("3")));
    assert!(valueless().visit_into(Own).is_err());
}

#[test]
fn test_visit_indexed_reports_position() {
    struct Position;

    impl<A> Visitor<Indexed<A>> for Position {
        type Output = usize;
        fn visit(&mut self, value: Indexed<A>) -> usize {
            value.index
        }
    }

    let mut v: Variant![u8, u8, u8] = Variant::in_place::<2>(0);
    assert_eq!(v.visit_indexed(Position), Ok(2));
    v.emplace::<1>(0);
    assert_eq!(v.visit_indexed_mut(Position), Ok(1));
}

#[test]
fn test_visitor_by_mutable_reference_is_reusable() {
    struct Count(usize);

    impl<A> Visitor<&A> for Count {
        type Output = ();
        fn visit(&mut self, _: &A) {
            self.0 += 1;
        }
    }

    let mut count = Count(0);
    let items = [V::new(1_i32), V::new(String::new()), V::new(2_i32)];
    for item in &items {
        item.visit(&mut count).unwrap();
    }
    assert_eq!(count.0, 3);
}

#[test]
fn test_visit2_invokes_exactly_once() {
    let a = V::new(1_i32);
    let b: Variant![bool, char] = Variant::new('z');
    let mut tally = Tally::default();
    assert_eq!(visit2(&a, &b, &mut tally), Ok(String::from("1/'z'")));
    assert_eq!(tally.calls, 1);
}

#[test]
fn test_visit2_every_index_pair() {
    let lefts = [V::new(1_i32), V::new(String::from("s"))];
    let rights: [Variant![u8, bool, char]; 3] = [Variant::new(2_u8), Variant::new(true), Variant::new('c')];
    let mut tally = Tally::default();
    let mut seen = Vec::new();
    for left in &lefts {
        for right in &rights {
            seen.push(visit2(left, right, &mut tally).unwrap());
        }
    }
    assert_eq!(tally.calls, 6);
    assert_eq!(seen, ["1/2", "1/true", "1/'c'", "\"s\"/2", "\"s\"/true", "\"s\"/'c'"]);
}

#[test]
fn test_visit2_indexed_pairs_positions() {
    struct Positions;

    impl<A, B> Visitor<(Indexed<A>, Indexed<B>)> for Positions {
        type Output = (usize, usize);
        fn visit(&mut self, (a, b): (Indexed<A>, Indexed<B>)) -> (usize, usize) {
            (a.index, b.index)
        }
    }

    let a = V::new(String::new());
    let b: Variant![u8, bool, char] = Variant::new(true);
    assert_eq!(visit2_indexed(&a, &b, Positions), Ok((1, 1)));
}

#[test]
fn test_visit2_with_a_valueless_operand() {
    let empty = valueless();
    let full = V::new(1_i32);
    let mut tally = Tally::default();
    assert!(visit2(&empty, &full, &mut tally).is_err());
    assert!(visit2(&full, &empty, &mut tally).is_err());
    assert_eq!(tally.calls, 0);
}

#[test]
fn test_visit3() {
    let a = V::new(1_i32);
    let b: Variant![bool, char] = Variant::new(false);
    let c: Variant![u8, &str] = Variant::new("three");
    let mut tally = Tally::default();
    assert_eq!(visit3(&a, &b, &c, &mut tally), Ok(String::from("1/false/\"three\"")));
    assert_eq!(tally.calls, 1);

    let empty = valueless();
    assert!(visit3(&a, &empty, &c, &mut tally).is_err());
    assert_eq!(tally.calls, 1);
}

#[test]
fn test_visit3_indexed() {
    struct Key;

    impl<A, B, C> Visitor<(Indexed<A>, Indexed<B>, Indexed<C>)> for Key {
        type Output = usize;
        fn visit(&mut self, (a, b, c): (Indexed<A>, Indexed<B>, Indexed<C>)) -> usize {
            dispatch::canonical_index(&[a.index, b.index, c.index], &[2, 2, 2])
        }
    }

    let a = V::new(String::new());
    let b: Variant![bool, char] = Variant::new('x');
    let c: Variant![u8, &str] = Variant::new(0_u8);
    assert_eq!(visit3_indexed(&a, &b, &c, Key), Ok(6));
}
