//! Schema-side field tables consumed by the codec.
//!
//! Descriptors are plain `static` data produced by whatever layer knows the schema. A message
//! type that refers to itself points its field back at its own static:
//!
//! ```rust
//! use protowire::{FieldDescriptor, MessageDescriptor, ScalarType};
//!
//! static NODE_FIELDS: [FieldDescriptor; 2] = [
//!     FieldDescriptor::optional("path", 1, ScalarType::String),
//!     FieldDescriptor::repeated_message("children", 2, &NODE),
//! ];
//! static NODE: MessageDescriptor = MessageDescriptor::new("tree.Node", &NODE_FIELDS);
//!
//! assert_eq!(NODE.field(2).unwrap().name, "children");
//! ```

use std::fmt;

/// The protobuf scalar kinds.
///
/// Each kind fixes both a wire type and an in-memory representation in
/// [`ScalarValue`](crate::value::ScalarValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Float,
    Double,
    String,
    Bytes,
    /// Enum numbers travel as int32 varints.
    Enum,
}

impl ScalarType {
    /// The `.proto` spelling of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
            ScalarType::Enum => "enum",
        }
    }
}

/// The declared type of a field: a scalar kind or a nested message type.
#[derive(Clone, Copy)]
pub enum FieldType {
    Scalar(ScalarType),
    Message(&'static MessageDescriptor),
}

impl FieldType {
    /// Human-readable type name used in error reports.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Scalar(scalar) => scalar.name(),
            FieldType::Message(descriptor) => descriptor.full_name(),
        }
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldType::Scalar(a), FieldType::Scalar(b)) => a == b,
            (FieldType::Message(a), FieldType::Message(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldType {}

// Message types may be recursive, so only the type name is printed.
impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(scalar) => write!(f, "Scalar({:?})", scalar),
            FieldType::Message(descriptor) => write!(f, "Message({})", descriptor.full_name()),
        }
    }
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// At most one value. Absent values are not written.
    Optional,
    /// Zero or more values, one tagged entry per element.
    Repeated,
    /// Zero or more values written as a single length-delimited entry.
    Packed,
}

/// Metadata for one field of a message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub number: u32,
    pub field_type: FieldType,
    pub label: Label,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, number: u32, field_type: FieldType, label: Label) -> Self {
        Self {
            name,
            number,
            field_type,
            label,
        }
    }

    pub const fn optional(name: &'static str, number: u32, scalar: ScalarType) -> Self {
        Self::new(name, number, FieldType::Scalar(scalar), Label::Optional)
    }

    pub const fn repeated(name: &'static str, number: u32, scalar: ScalarType) -> Self {
        Self::new(name, number, FieldType::Scalar(scalar), Label::Repeated)
    }

    /// A repeated scalar written in packed form.
    ///
    /// Only varint and fixed-width kinds can be packed. Strings and bytes declared this way are
    /// written unpacked.
    pub const fn packed(name: &'static str, number: u32, scalar: ScalarType) -> Self {
        Self::new(name, number, FieldType::Scalar(scalar), Label::Packed)
    }

    pub const fn message(
        name: &'static str,
        number: u32,
        descriptor: &'static MessageDescriptor,
    ) -> Self {
        Self::new(name, number, FieldType::Message(descriptor), Label::Optional)
    }

    pub const fn repeated_message(
        name: &'static str,
        number: u32,
        descriptor: &'static MessageDescriptor,
    ) -> Self {
        Self::new(name, number, FieldType::Message(descriptor), Label::Repeated)
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self.label, Label::Repeated | Label::Packed)
    }

    /// Whether the writer emits this field in packed form.
    pub fn is_packed(&self) -> bool {
        self.label == Label::Packed && self.field_type.is_packable()
    }
}

/// The ordered field table of one message type.
pub struct MessageDescriptor {
    full_name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Creates a descriptor. Fields are written in the order given here.
    pub const fn new(full_name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { full_name, fields }
    }

    /// Fully qualified type name. Two descriptors with the same name denote the same type.
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.number == number)
    }

    /// Position of the field within [`MessageDescriptor::fields`].
    pub fn field_index(&self, number: u32) -> Option<usize> {
        self.fields.iter().position(|field| field.number == number)
    }
}

impl PartialEq for MessageDescriptor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.full_name == other.full_name
    }
}

impl Eq for MessageDescriptor {}

impl fmt::Debug for MessageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageDescriptor")
            .field("full_name", &self.full_name)
            .field("fields", &self.fields)
            .finish()
    }
}
