//! `proptest` strategies for variants, optionals and the empty alternative.
//!
//! Enabled by the `proptest` feature. Every alternative of a generated variant
//! is equally likely; the valueless state is never generated.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Just};

use crate::list::{Alternatives, Cons, Nil};
use crate::monostate::Monostate;
use crate::optional::Optional;
use crate::tagged::{DebugAlternatives, Variant};

/// Lists whose every alternative implements [`Arbitrary`].
pub trait ArbitraryAlternatives: DebugAlternatives + Sized + 'static {
    /// A strategy picking a uniformly random alternative, then a random value of it.
    fn strategy() -> BoxedStrategy<Variant<Self>>;
}

impl<H: Arbitrary + 'static> ArbitraryAlternatives for Cons<H, Nil> {
    fn strategy() -> BoxedStrategy<Variant<Self>> {
        any::<H>().prop_map(Variant::<Self>::in_place::<0>).boxed()
    }
}

impl<H, H2, T> ArbitraryAlternatives for Cons<H, Cons<H2, T>>
where
    H: Arbitrary + 'static,
    T: Alternatives,
    Cons<H2, T>: ArbitraryAlternatives,
{
    fn strategy() -> BoxedStrategy<Variant<Self>> {
        let rest = u32::try_from(<Cons<H2, T> as Alternatives>::LEN).unwrap_or(u32::MAX);
        prop_oneof![
            1 => any::<H>().prop_map(Variant::<Self>::in_place::<0>),
            rest => <Cons<H2, T> as ArbitraryAlternatives>::strategy().prop_map(Variant::<Cons<H2, T>>::widen::<H>),
        ]
        .boxed()
    }
}

impl<L: ArbitraryAlternatives> Arbitrary for Variant<L> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): ()) -> Self::Strategy {
        L::strategy()
    }
}

impl<T: Arbitrary + 'static> Arbitrary for Optional<T> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): ()) -> Self::Strategy {
        any::<Option<T>>().prop_map(Optional::from).boxed()
    }
}

impl Arbitrary for Monostate {
    type Parameters = ();
    type Strategy = Just<Self>;

    fn arbitrary_with((): ()) -> Self::Strategy {
        Just(Monostate)
    }
}
