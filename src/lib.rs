//! # protowire
//!
//! A Protocol Buffers binary wire-format engine.
//!
//! Messages are described by static [`MessageDescriptor`] tables, which a schema compiler or
//! hand-written code supplies. This crate does everything below that layer:
//!
//! - Varint, zigzag and fixed-width codecs for every protobuf scalar type
//! - Tag framing and the per-kind dispatch table that assigns wire types
//! - Repeated fields in both unpacked and packed form. Packed input is accepted for any packable field
//! - Extension fields, resolved through an explicit [`Configuration`] passed into every decode
//! - Unknown-field capture that round-trips unrecognized tags without loss
//! - Exact size computation that agrees byte-for-byte with the encoder
//!
//! ## Example
//!
//! ```rust
//! use protowire::{FieldDescriptor, Message, MessageDescriptor, ScalarType, ScalarValue};
//!
//! static POINT_FIELDS: [FieldDescriptor; 2] = [
//!     FieldDescriptor::optional("x", 1, ScalarType::Sint32),
//!     FieldDescriptor::optional("y", 2, ScalarType::Sint32),
//! ];
//! static POINT: MessageDescriptor = MessageDescriptor::new("example.Point", &POINT_FIELDS);
//!
//! let mut point = Message::new(&POINT);
//! point.set(1, ScalarValue::Sint32(-3)).unwrap();
//! point.set(2, ScalarValue::Sint32(4)).unwrap();
//!
//! let bytes = protowire::encode(&point).unwrap();
//! assert_eq!(&bytes[..], &[0x08, 0x05, 0x10, 0x08]);
//! assert_eq!(protowire::encoded_len(&point), bytes.len());
//!
//! let decoded = protowire::decode(&POINT, bytes).unwrap();
//! assert_eq!(decoded, point);
//! ```

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod extension;
pub mod message;
pub mod size;
pub mod stream;
pub mod unknown;
pub mod value;
pub mod varint;
pub mod wire;

use bytes::Bytes;
use std::string::FromUtf8Error;

pub use config::{Configuration, ExtensionRegistry};
pub use descriptor::{FieldDescriptor, FieldType, Label, MessageDescriptor, ScalarType};
pub use extension::{ExtensionDescriptor, ExtensionSet};
pub use message::Message;
pub use size::ComputeSizeContext;
pub use stream::Stream;
pub use unknown::{UnknownFieldSet, UnknownValue};
pub use value::{ScalarValue, Value};
pub use wire::{Tag, WireType};

/// Errors that can occur while encoding or decoding protobuf data.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A varint did not terminate within 10 bytes, or the input ended in the middle of one.
    #[error("Malformed varint")]
    MalformedVarint,
    /// A tag carried an unsupported wire type, a zero field number, or did not fit in 32 bits.
    #[error("Invalid tag: {tag}")]
    InvalidTag { tag: u64 },
    /// A raw read or a length limit extended past the readable bytes.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    /// The value of a field extended past the readable bytes.
    #[error("Truncated message: field {field_number} needed {needed} bytes, {remaining} remaining")]
    TruncatedMessage {
        field_number: u32,
        needed: usize,
        remaining: usize,
    },
    /// A value does not match the declared type of the field it was assigned to.
    #[error("Type mismatch for field {field_number}: expected {expected}, got {actual}")]
    TypeMismatch {
        field_number: u32,
        expected: &'static str,
        actual: &'static str,
    },
    /// The message type declares no field with this number.
    #[error("Message {message} has no field {field_number}")]
    NoSuchField {
        message: &'static str,
        field_number: u32,
    },
    /// A singular accessor was used on a repeated field or the other way around.
    #[error("Cardinality mismatch for field {field_number} (repeated: {repeated})")]
    Cardinality { field_number: u32, repeated: bool },
    /// An extension was stored on a message type it does not extend.
    #[error("Extension {extension} extends {expected}, not {actual}")]
    ExtendeeMismatch {
        extension: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    /// A string field held bytes that are not valid UTF-8.
    #[error(transparent)]
    InvalidString(#[from] FromUtf8Error),
    /// Nested messages on the wire went deeper than the configured limit.
    #[error("Recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },
}

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, WireError>;

/// Encodes a message into a new buffer.
///
/// # Errors
/// Returns [`WireError::TypeMismatch`] if a nested message slot holds a message of the wrong type.
pub fn encode(message: &Message) -> Result<Bytes> {
    message.to_bytes()
}

/// Decodes a message of the given type using the default [`Configuration`].
///
/// Extension fields are never recognized this way and land in the unknown-field set.
pub fn decode(descriptor: &'static MessageDescriptor, bytes: impl Into<Bytes>) -> Result<Message> {
    Message::from_bytes(descriptor, bytes, &Configuration::default())
}

/// Decodes a message of the given type, resolving extensions through `config`.
pub fn decode_with(
    descriptor: &'static MessageDescriptor,
    bytes: impl Into<Bytes>,
    config: &Configuration,
) -> Result<Message> {
    Message::from_bytes(descriptor, bytes, config)
}

/// Returns the exact number of bytes [`encode`] would produce for `message`.
pub fn encoded_len(message: &Message) -> usize {
    message.encoded_len()
}
