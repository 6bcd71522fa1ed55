//! Serde support.
//!
//! A variant serializes as the 2-tuple `(index, value)`. A valueless variant
//! has no value to write and fails to serialize.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, SeqAccess, Unexpected};
use serde::ser::{self, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Variant;
use crate::lifecycle::RawVariant;
use crate::list::{Alternatives, Cons, Nil};
use crate::storage::Node;

/// Per-alternative serialization, available when every alternative is
/// [`Serialize`].
pub trait SerializeAlternatives: Alternatives {
    /// Writes cell `index` as the next tuple element.
    ///
    /// # Safety
    /// Cell `index` must be live.
    unsafe fn serialize_at<S: SerializeTuple>(storage: &Self::Storage, index: usize, tuple: &mut S) -> Result<(), S::Error>;
}

/// Per-alternative deserialization, available when every alternative is
/// [`Deserialize`].
pub trait DeserializeAlternatives<'de>: Alternatives {
    /// Reads alternative `index` from the next sequence element.
    ///
    /// Returns `Ok(None)` if the sequence has no further element.
    ///
    /// # Errors
    /// Whatever the alternative's deserializer reports.
    fn deserialize_at<A: SeqAccess<'de>>(index: usize, seq: &mut A) -> Result<Option<Self::Storage>, A::Error>;
}

impl SerializeAlternatives for Nil {
    unsafe fn serialize_at<S: SerializeTuple>(_storage: &(), index: usize, _tuple: &mut S) -> Result<(), S::Error> {
        unreachable!("alternative index {index} out of range")
    }
}

impl<H: Serialize, T: SerializeAlternatives> SerializeAlternatives for Cons<H, T> {
    unsafe fn serialize_at<S: SerializeTuple>(storage: &Self::Storage, index: usize, tuple: &mut S) -> Result<(), S::Error> {
        if index == 0 {
            // SAFETY: caller asserts the head cell is live.
            tuple.serialize_element(unsafe { storage.head() })
        } else {
            // SAFETY: forwarded contract.
            unsafe { T::serialize_at(storage.tail(), index - 1, tuple) }
        }
    }
}

impl<'de> DeserializeAlternatives<'de> for Nil {
    fn deserialize_at<A: SeqAccess<'de>>(index: usize, _seq: &mut A) -> Result<Option<()>, A::Error> {
        Err(de::Error::custom(format_args!("alternative index {index} out of range")))
    }
}

impl<'de, H: Deserialize<'de>, T: DeserializeAlternatives<'de>> DeserializeAlternatives<'de> for Cons<H, T> {
    fn deserialize_at<A: SeqAccess<'de>>(index: usize, seq: &mut A) -> Result<Option<Self::Storage>, A::Error> {
        if index == 0 {
            Ok(seq.next_element::<H>()?.map(Node::from_head))
        } else {
            Ok(T::deserialize_at(index - 1, seq)?.map(Node::from_tail))
        }
    }
}

impl<L: SerializeAlternatives> Serialize for Variant<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some((index, storage)) = self.raw.live() else {
            return Err(ser::Error::custom("cannot serialize a valueless variant"));
        };
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&index)?;
        // SAFETY: `live` yields the constructed cell.
        unsafe { L::serialize_at(storage, index, &mut tuple)? };
        tuple.end()
    }
}

struct VariantVisitor<L>(PhantomData<fn() -> L>);

impl<'de, L: DeserializeAlternatives<'de>> de::Visitor<'de> for VariantVisitor<L> {
    type Value = Variant<L>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an (index, value) pair for a variant of {} alternatives", L::LEN)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Variant<L>, A::Error> {
        let index: usize = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if index >= L::LEN {
            return Err(de::Error::invalid_value(Unexpected::Unsigned(index as u64), &self));
        }
        let storage = L::deserialize_at(index, &mut seq)?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
        // SAFETY: `deserialize_at` constructed exactly cell `index`, which is in range.
        Ok(Variant::from_raw(unsafe { RawVariant::from_parts(index, storage) }))
    }
}

impl<'de, L: DeserializeAlternatives<'de>> Deserialize<'de> for Variant<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(2, VariantVisitor(PhantomData))
    }
}
