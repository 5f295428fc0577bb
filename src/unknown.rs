//! Storage for fields the schema does not declare.

use crate::stream::Stream;
use crate::varint::{
    read_fixed32, read_fixed64, read_varint, varint_size, write_fixed32, write_fixed64,
    write_varint,
};
use crate::wire::{
    length_delimited_size, read_length_delimited, tag_size, write_length_delimited, write_tag,
    WireType,
};
use crate::Result;
use bytes::Bytes;
use indexmap::IndexMap;

/// A raw value captured without a schema. The wire type is the only thing known about it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnknownValue {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    LengthDelimited(Bytes),
}

impl UnknownValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            UnknownValue::Varint(_) => WireType::Varint,
            UnknownValue::Fixed32(_) => WireType::Fixed32,
            UnknownValue::Fixed64(_) => WireType::Fixed64,
            UnknownValue::LengthDelimited(_) => WireType::LengthDelimited,
        }
    }

    /// Reads the value that follows a tag of the given wire type.
    pub fn read(stream: &mut Stream, wire_type: WireType) -> Result<Self> {
        Ok(match wire_type {
            WireType::Varint => UnknownValue::Varint(read_varint(stream)?),
            WireType::Fixed32 => UnknownValue::Fixed32(read_fixed32(stream)?),
            WireType::Fixed64 => UnknownValue::Fixed64(read_fixed64(stream)?),
            WireType::LengthDelimited => {
                UnknownValue::LengthDelimited(read_length_delimited(stream)?)
            }
        })
    }

    /// Writes the value without its tag.
    pub fn write(&self, stream: &mut Stream) {
        match self {
            UnknownValue::Varint(v) => write_varint(stream, *v),
            UnknownValue::Fixed32(v) => write_fixed32(stream, *v),
            UnknownValue::Fixed64(v) => write_fixed64(stream, *v),
            UnknownValue::LengthDelimited(bytes) => write_length_delimited(stream, bytes),
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            UnknownValue::Varint(v) => varint_size(*v),
            UnknownValue::Fixed32(_) => 4,
            UnknownValue::Fixed64(_) => 8,
            UnknownValue::LengthDelimited(bytes) => length_delimited_size(bytes.len()),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            UnknownValue::Varint(v) | UnknownValue::Fixed64(v) => Some(v),
            UnknownValue::Fixed32(v) => Some(u64::from(v)),
            UnknownValue::LengthDelimited(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            UnknownValue::LengthDelimited(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Unrecognized fields of one message, grouped by field number.
///
/// Every occurrence is kept. Numbers are re-emitted in the order they were first seen, and the
/// occurrences of one number in the order they were captured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownFieldSet {
    fields: IndexMap<u32, Vec<UnknownValue>>,
}

impl UnknownFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field_number: u32, value: UnknownValue) {
        self.fields.entry(field_number).or_default().push(value);
    }

    /// The first value captured for `field_number`.
    pub fn get(&self, field_number: u32) -> Option<&UnknownValue> {
        self.fields.get(&field_number).and_then(|values| values.first())
    }

    pub fn get_all(&self, field_number: u32) -> &[UnknownValue] {
        self.fields
            .get(&field_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, field_number: u32) -> bool {
        self.fields.contains_key(&field_number)
    }

    pub fn remove(&mut self, field_number: u32) -> Option<Vec<UnknownValue>> {
        self.fields.shift_remove(&field_number)
    }

    /// Number of distinct field numbers.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of captured values across all field numbers.
    pub fn entry_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &UnknownValue)> {
        self.fields
            .iter()
            .flat_map(|(number, values)| values.iter().map(move |value| (*number, value)))
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Appends every entry of `other`.
    pub fn merge_from(&mut self, other: &UnknownFieldSet) {
        for (number, value) in other.iter() {
            self.add(number, value.clone());
        }
    }

    /// Writes every entry with its original tag.
    ///
    /// # Errors
    /// Returns [`crate::WireError::InvalidTag`] for an entry added under an unencodable number.
    pub fn write_to(&self, stream: &mut Stream) -> Result<()> {
        for (number, value) in self.iter() {
            write_tag(stream, number, value.wire_type())?;
            value.write(stream);
        }
        Ok(())
    }

    /// Encoded size of [`UnknownFieldSet::write_to`].
    pub fn encoded_len(&self) -> usize {
        self.iter()
            .map(|(number, value)| tag_size(number) + value.encoded_len())
            .sum()
    }
}
