//! Tag framing and the scalar dispatch table.
//!
//! [`ScalarType::wire_type`] is the only place that assigns wire types to kinds. The message
//! codec, the size computer and the extension path all consult it.

use crate::descriptor::{FieldType, ScalarType};
use crate::stream::Stream;
use crate::value::ScalarValue;
use crate::varint::{
    read_double, read_fixed32, read_fixed64, read_float, read_varint, varint_size, write_double,
    write_fixed32, write_fixed64, write_float, write_varint, zigzag_decode, zigzag_encode,
};
use crate::{Result, WireError};
use bytes::Bytes;
use std::fmt;

/// Largest field number a tag can carry.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// The byte-layout family of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl TryFrom<u8> for WireType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            other => Err(other),
        }
    }
}

/// A field number paired with the wire type of the value that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// The composed `(field_number << 3) | wire_type` value.
    pub const fn value(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type as u64
    }

    /// Splits a raw tag value.
    ///
    /// # Errors
    /// Returns [`WireError::InvalidTag`] for unsupported wire types (including the group
    /// markers 3 and 4), a zero field number, or a value wider than 32 bits.
    pub fn from_raw(raw: u64) -> Result<Self> {
        let invalid = || WireError::InvalidTag { tag: raw };
        let value = u32::try_from(raw).map_err(|_| invalid())?;
        let wire_type = WireType::try_from((value & 0x07) as u8).map_err(|_| invalid())?;
        let field_number = value >> 3;
        if field_number == 0 {
            return Err(invalid());
        }
        Ok(Self::new(field_number, wire_type))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.field_number, self.wire_type)
    }
}

/// Writes the tag for `field_number`.
///
/// # Errors
/// Returns [`WireError::InvalidTag`] if `field_number` is zero or above [`MAX_FIELD_NUMBER`].
#[inline]
pub fn write_tag(stream: &mut Stream, field_number: u32, wire_type: WireType) -> Result<()> {
    let tag = Tag::new(field_number, wire_type);
    if field_number == 0 || field_number > MAX_FIELD_NUMBER {
        return Err(WireError::InvalidTag { tag: tag.value() });
    }
    write_varint(stream, tag.value());
    Ok(())
}

#[inline]
pub fn read_tag(stream: &mut Stream) -> Result<Tag> {
    let raw = read_varint(stream)?;
    Tag::from_raw(raw)
}

/// Encoded size of the tag for `field_number`. The wire type never changes the size.
#[inline]
pub const fn tag_size(field_number: u32) -> usize {
    varint_size((field_number as u64) << 3)
}

/// Writes a varint length followed by the raw bytes.
pub fn write_length_delimited(stream: &mut Stream, bytes: &[u8]) {
    write_varint(stream, bytes.len() as u64);
    stream.write_slice(bytes);
}

/// Reads a varint length and then exactly that many bytes.
///
/// # Errors
/// Returns [`WireError::TruncatedInput`] if fewer bytes remain than the length declares.
pub fn read_length_delimited(stream: &mut Stream) -> Result<Bytes> {
    let len = read_length(stream)?;
    stream.read_bytes(len)
}

/// Reads the varint length prefix of a length-delimited value.
pub fn read_length(stream: &mut Stream) -> Result<usize> {
    let len = read_varint(stream)?;
    usize::try_from(len).map_err(|_| WireError::TruncatedInput {
        needed: usize::MAX,
        remaining: stream.remaining(),
    })
}

/// Size of a length-delimited entry with a `len`-byte payload, prefix included.
#[inline]
pub const fn length_delimited_size(len: usize) -> usize {
    varint_size(len as u64) + len
}

impl ScalarType {
    pub const fn wire_type(self) -> WireType {
        match self {
            ScalarType::Bool
            | ScalarType::Int32
            | ScalarType::Int64
            | ScalarType::Uint32
            | ScalarType::Uint64
            | ScalarType::Sint32
            | ScalarType::Sint64
            | ScalarType::Enum => WireType::Varint,
            ScalarType::Fixed64 | ScalarType::Sfixed64 | ScalarType::Double => WireType::Fixed64,
            ScalarType::Fixed32 | ScalarType::Sfixed32 | ScalarType::Float => WireType::Fixed32,
            ScalarType::String | ScalarType::Bytes => WireType::LengthDelimited,
        }
    }

    /// Whether repeated values of this kind may share one length-delimited entry.
    pub const fn is_packable(self) -> bool {
        !matches!(self.wire_type(), WireType::LengthDelimited)
    }
}

impl FieldType {
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldType::Scalar(scalar) => scalar.wire_type(),
            FieldType::Message(_) => WireType::LengthDelimited,
        }
    }

    pub fn is_packable(&self) -> bool {
        match self {
            FieldType::Scalar(scalar) => scalar.is_packable(),
            FieldType::Message(_) => false,
        }
    }
}

/// Writes a scalar without its tag.
pub fn write_scalar(stream: &mut Stream, value: &ScalarValue) {
    match value {
        ScalarValue::Bool(v) => write_varint(stream, u64::from(*v)),
        // negative 32-bit values are sign-extended and cost ten bytes
        ScalarValue::Int32(v) | ScalarValue::Enum(v) => write_varint(stream, i64::from(*v) as u64),
        ScalarValue::Int64(v) => write_varint(stream, *v as u64),
        ScalarValue::Uint32(v) => write_varint(stream, u64::from(*v)),
        ScalarValue::Uint64(v) => write_varint(stream, *v),
        ScalarValue::Sint32(v) => write_varint(stream, zigzag_encode(i64::from(*v))),
        ScalarValue::Sint64(v) => write_varint(stream, zigzag_encode(*v)),
        ScalarValue::Fixed32(v) => write_fixed32(stream, *v),
        ScalarValue::Fixed64(v) => write_fixed64(stream, *v),
        ScalarValue::Sfixed32(v) => write_fixed32(stream, *v as u32),
        ScalarValue::Sfixed64(v) => write_fixed64(stream, *v as u64),
        ScalarValue::Float(v) => write_float(stream, *v),
        ScalarValue::Double(v) => write_double(stream, *v),
        ScalarValue::String(v) => write_length_delimited(stream, v.as_bytes()),
        ScalarValue::Bytes(v) => write_length_delimited(stream, v),
    }
}

/// Reads a scalar of the given kind. The tag must already have been consumed.
///
/// 32-bit varint kinds keep the low 32 bits of wider input, matching other protobuf runtimes.
pub fn read_scalar(stream: &mut Stream, scalar: ScalarType) -> Result<ScalarValue> {
    Ok(match scalar {
        ScalarType::Bool => ScalarValue::Bool(read_varint(stream)? != 0),
        ScalarType::Int32 => ScalarValue::Int32(read_varint(stream)? as i32),
        ScalarType::Int64 => ScalarValue::Int64(read_varint(stream)? as i64),
        ScalarType::Uint32 => ScalarValue::Uint32(read_varint(stream)? as u32),
        ScalarType::Uint64 => ScalarValue::Uint64(read_varint(stream)?),
        ScalarType::Sint32 => ScalarValue::Sint32(zigzag_decode(read_varint(stream)?) as i32),
        ScalarType::Sint64 => ScalarValue::Sint64(zigzag_decode(read_varint(stream)?)),
        ScalarType::Fixed32 => ScalarValue::Fixed32(read_fixed32(stream)?),
        ScalarType::Fixed64 => ScalarValue::Fixed64(read_fixed64(stream)?),
        ScalarType::Sfixed32 => ScalarValue::Sfixed32(read_fixed32(stream)? as i32),
        ScalarType::Sfixed64 => ScalarValue::Sfixed64(read_fixed64(stream)? as i64),
        ScalarType::Float => ScalarValue::Float(read_float(stream)?),
        ScalarType::Double => ScalarValue::Double(read_double(stream)?),
        ScalarType::String => {
            let bytes = read_length_delimited(stream)?;
            ScalarValue::String(String::from_utf8(bytes.to_vec())?)
        }
        ScalarType::Bytes => ScalarValue::Bytes(read_length_delimited(stream)?),
        ScalarType::Enum => ScalarValue::Enum(read_varint(stream)? as i32),
    })
}

/// Encoded size of a scalar without its tag.
pub fn scalar_size(value: &ScalarValue) -> usize {
    match value {
        ScalarValue::Bool(_) => 1,
        ScalarValue::Int32(v) | ScalarValue::Enum(v) => varint_size(i64::from(*v) as u64),
        ScalarValue::Int64(v) => varint_size(*v as u64),
        ScalarValue::Uint32(v) => varint_size(u64::from(*v)),
        ScalarValue::Uint64(v) => varint_size(*v),
        ScalarValue::Sint32(v) => varint_size(zigzag_encode(i64::from(*v))),
        ScalarValue::Sint64(v) => varint_size(zigzag_encode(*v)),
        ScalarValue::Fixed32(_) | ScalarValue::Sfixed32(_) | ScalarValue::Float(_) => 4,
        ScalarValue::Fixed64(_) | ScalarValue::Sfixed64(_) | ScalarValue::Double(_) => 8,
        ScalarValue::String(v) => length_delimited_size(v.len()),
        ScalarValue::Bytes(v) => length_delimited_size(v.len()),
    }
}
