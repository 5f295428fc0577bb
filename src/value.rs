//! Field values held in message slots.

use crate::descriptor::{FieldDescriptor, FieldType, ScalarType};
use crate::message::Message;
use crate::{Result, WireError};
use bytes::Bytes;

/// A value of one of the protobuf scalar kinds.
///
/// The variant fixes both the in-memory width and the wire encoding: `Int32(-1)` is written as a
/// ten-byte sign-extended varint while `Sint32(-1)` is the single zigzag byte `0x01`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Sint32(i32),
    Sint64(i64),
    Fixed32(u32),
    Fixed64(u64),
    Sfixed32(i32),
    Sfixed64(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Bytes),
    Enum(i32),
}

impl ScalarValue {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Bool(_) => ScalarType::Bool,
            ScalarValue::Int32(_) => ScalarType::Int32,
            ScalarValue::Int64(_) => ScalarType::Int64,
            ScalarValue::Uint32(_) => ScalarType::Uint32,
            ScalarValue::Uint64(_) => ScalarType::Uint64,
            ScalarValue::Sint32(_) => ScalarType::Sint32,
            ScalarValue::Sint64(_) => ScalarType::Sint64,
            ScalarValue::Fixed32(_) => ScalarType::Fixed32,
            ScalarValue::Fixed64(_) => ScalarType::Fixed64,
            ScalarValue::Sfixed32(_) => ScalarType::Sfixed32,
            ScalarValue::Sfixed64(_) => ScalarType::Sfixed64,
            ScalarValue::Float(_) => ScalarType::Float,
            ScalarValue::Double(_) => ScalarType::Double,
            ScalarValue::String(_) => ScalarType::String,
            ScalarValue::Bytes(_) => ScalarType::Bytes,
            ScalarValue::Enum(_) => ScalarType::Enum,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ScalarValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Any 32-bit signed kind, including enum numbers.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            ScalarValue::Int32(v)
            | ScalarValue::Sint32(v)
            | ScalarValue::Sfixed32(v)
            | ScalarValue::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ScalarValue::Int64(v) | ScalarValue::Sint64(v) | ScalarValue::Sfixed64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            ScalarValue::Uint32(v) | ScalarValue::Fixed32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            ScalarValue::Uint64(v) | ScalarValue::Fixed64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            ScalarValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ScalarValue::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ScalarValue::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

/// The content of a field slot: a scalar or an owned nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(ScalarValue),
    Message(Box<Message>),
}

impl Value {
    /// Name of the value's type as it appears in error reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(scalar) => scalar.scalar_type().name(),
            Value::Message(message) => message.descriptor().full_name(),
        }
    }

    pub fn matches(&self, field_type: &FieldType) -> bool {
        match (self, field_type) {
            (Value::Scalar(scalar), FieldType::Scalar(expected)) => {
                scalar.scalar_type() == *expected
            }
            (Value::Message(message), FieldType::Message(expected)) => {
                message.descriptor() == *expected
            }
            _ => false,
        }
    }

    /// Ensures the value can be stored in `field`.
    ///
    /// # Errors
    /// Returns [`WireError::TypeMismatch`] naming both types. Values are never coerced.
    pub fn check(&self, field: &FieldDescriptor) -> Result<()> {
        if self.matches(&field.field_type) {
            Ok(())
        } else {
            Err(WireError::TypeMismatch {
                field_number: field.number,
                expected: field.field_type.name(),
                actual: self.type_name(),
            })
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Message(_) => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Value::Message(message) => Some(&**message),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_message_mut(&mut self) -> Option<&mut Message> {
        match self {
            Value::Message(message) => Some(&mut **message),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(ScalarValue::as_bool)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_scalar().and_then(ScalarValue::as_i32)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(ScalarValue::as_i64)
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_scalar().and_then(ScalarValue::as_u32)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_scalar().and_then(ScalarValue::as_u64)
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_scalar().and_then(ScalarValue::as_f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(ScalarValue::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        self.as_scalar().and_then(ScalarValue::as_bytes)
    }
}

impl From<ScalarValue> for Value {
    fn from(scalar: ScalarValue) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        Value::Message(Box::new(message))
    }
}

// Only Rust types with a single obvious protobuf kind convert implicitly. Integers must name
// their encoding through a `ScalarValue` variant.
macro_rules! impl_from_unambiguous {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    ScalarValue::$variant(value.into())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(ScalarValue::from(value))
                }
            }
        )*
    };
}

impl_from_unambiguous!(
    bool => Bool,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
    Bytes => Bytes,
    Vec<u8> => Bytes,
    &'static [u8] => Bytes,
);
