//! Message instances: field slots plus the extension and unknown-field side tables.

use crate::codec::{read_message, write_message};
use crate::config::Configuration;
use crate::descriptor::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::extension::{ExtensionDescriptor, ExtensionSet};
use crate::size::ComputeSizeContext;
use crate::stream::Stream;
use crate::unknown::UnknownFieldSet;
use crate::value::Value;
use crate::{Result, WireError};
use bytes::Bytes;

/// Storage for one present field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Slot {
    Single(Value),
    Repeated(Vec<Value>),
}

impl Slot {
    /// Adds a value the way the decoder does: repeated fields append, a singular submessage
    /// merges into the one already present and any other singular value replaces it.
    pub(crate) fn store(slot: &mut Option<Slot>, field: &FieldDescriptor, value: Value) {
        if field.is_repeated() {
            match slot {
                Some(Slot::Repeated(values)) => values.push(value),
                _ => *slot = Some(Slot::Repeated(vec![value])),
            }
            return;
        }
        if let Value::Message(incoming) = value {
            if let Some(Slot::Single(Value::Message(existing))) = slot {
                existing.merge(*incoming);
                return;
            }
            *slot = Some(Slot::Single(Value::Message(incoming)));
        } else {
            *slot = Some(Slot::Single(value));
        }
    }

    pub(crate) fn values(&self) -> &[Value] {
        match self {
            Slot::Single(value) => std::slice::from_ref(value),
            Slot::Repeated(values) => values,
        }
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        match self {
            Slot::Single(value) => vec![value],
            Slot::Repeated(values) => values,
        }
    }
}

/// One instance of a message type.
///
/// Fields are addressed by number and stored in the order of the descriptor's field table.
/// Nested messages are owned by value, so every decoded submessage is an independent instance.
/// The extension and unknown-field tables are only allocated once something is stored in them.
#[derive(Debug, Clone)]
pub struct Message {
    descriptor: &'static MessageDescriptor,
    slots: Vec<Option<Slot>>,
    extensions: Option<Box<ExtensionSet>>,
    unknown_fields: Option<Box<UnknownFieldSet>>,
}

impl Message {
    pub fn new(descriptor: &'static MessageDescriptor) -> Self {
        Self {
            descriptor,
            slots: vec![None; descriptor.fields().len()],
            extensions: None,
            unknown_fields: None,
        }
    }

    pub fn descriptor(&self) -> &'static MessageDescriptor {
        self.descriptor
    }

    fn lookup(&self, number: u32) -> Result<(usize, &'static FieldDescriptor)> {
        let index = self
            .descriptor
            .field_index(number)
            .ok_or(WireError::NoSuchField {
                message: self.descriptor.full_name(),
                field_number: number,
            })?;
        Ok((index, &self.descriptor.fields()[index]))
    }

    fn slot(&self, number: u32) -> Option<&Slot> {
        let index = self.descriptor.field_index(number)?;
        self.slots[index].as_ref()
    }

    /// Whether the field holds a value. A repeated field counts once it has an element.
    pub fn has(&self, number: u32) -> bool {
        self.slot(number).is_some()
    }

    /// The value of a singular field.
    pub fn get(&self, number: u32) -> Option<&Value> {
        match self.slot(number)? {
            Slot::Single(value) => Some(value),
            Slot::Repeated(_) => None,
        }
    }

    /// The elements of a repeated field, empty when unset.
    pub fn get_repeated(&self, number: u32) -> &[Value] {
        match self.slot(number) {
            Some(Slot::Repeated(values)) => values,
            _ => &[],
        }
    }

    pub fn get_message(&self, number: u32) -> Option<&Message> {
        self.get(number).and_then(Value::as_message)
    }

    /// Assigns a singular field, replacing the previous value.
    ///
    /// # Errors
    /// [`WireError::NoSuchField`] for an undeclared number, [`WireError::Cardinality`] for a
    /// repeated field and [`WireError::TypeMismatch`] if the value has the wrong type.
    pub fn set(&mut self, number: u32, value: impl Into<Value>) -> Result<()> {
        let (index, field) = self.lookup(number)?;
        if field.is_repeated() {
            return Err(WireError::Cardinality {
                field_number: number,
                repeated: true,
            });
        }
        let value = value.into();
        value.check(field)?;
        self.slots[index] = Some(Slot::Single(value));
        Ok(())
    }

    /// Appends an element to a repeated field.
    pub fn push(&mut self, number: u32, value: impl Into<Value>) -> Result<()> {
        let (index, field) = self.lookup(number)?;
        if !field.is_repeated() {
            return Err(WireError::Cardinality {
                field_number: number,
                repeated: false,
            });
        }
        let value = value.into();
        value.check(field)?;
        Slot::store(&mut self.slots[index], field, value);
        Ok(())
    }

    /// Mutable access to a singular submessage, creating an empty one if the field is unset.
    pub fn message_mut(&mut self, number: u32) -> Result<&mut Message> {
        let (index, field) = self.lookup(number)?;
        if field.is_repeated() {
            return Err(WireError::Cardinality {
                field_number: number,
                repeated: true,
            });
        }
        let descriptor = match field.field_type {
            FieldType::Message(descriptor) => descriptor,
            FieldType::Scalar(scalar) => {
                return Err(WireError::TypeMismatch {
                    field_number: number,
                    expected: scalar.name(),
                    actual: "message",
                })
            }
        };
        let slot = self.slots[index]
            .get_or_insert_with(|| Slot::Single(Value::from(Message::new(descriptor))));
        match slot {
            Slot::Single(Value::Message(message)) => Ok(&mut **message),
            _ => Err(WireError::TypeMismatch {
                field_number: number,
                expected: descriptor.full_name(),
                actual: "scalar",
            }),
        }
    }

    /// Unsets a field. Returns whether it held a value.
    pub fn clear_field(&mut self, number: u32) -> bool {
        match self.descriptor.field_index(number) {
            Some(index) => self.slots[index].take().is_some(),
            None => false,
        }
    }

    /// Unsets every field and drops both side tables.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.extensions = None;
        self.unknown_fields = None;
    }

    /// Declared fields that hold a value, in declaration order.
    pub(crate) fn present_fields(
        &self,
    ) -> impl Iterator<Item = (&'static FieldDescriptor, &Slot)> {
        self.descriptor
            .fields()
            .iter()
            .zip(&self.slots)
            .filter_map(|(field, slot)| slot.as_ref().map(|slot| (field, slot)))
    }

    /// Stores a decoded value into the field at `index` of the descriptor's table.
    pub(crate) fn store(&mut self, index: usize, value: Value) {
        let field = &self.descriptor.fields()[index];
        Slot::store(&mut self.slots[index], field, value);
    }

    pub fn extensions(&self) -> Option<&ExtensionSet> {
        self.extensions.as_deref()
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionSet {
        let descriptor = self.descriptor;
        self.extensions
            .get_or_insert_with(|| Box::new(ExtensionSet::new(descriptor)))
    }

    pub fn set_extension(
        &mut self,
        extension: &'static ExtensionDescriptor,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.extensions_mut().put(extension, value)
    }

    pub fn push_extension(
        &mut self,
        extension: &'static ExtensionDescriptor,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.extensions_mut().push(extension, value)
    }

    pub fn get_extension(&self, extension: &ExtensionDescriptor) -> Option<&Value> {
        self.extensions()?.get(extension)
    }

    pub fn has_extension(&self, extension: &ExtensionDescriptor) -> bool {
        self.extensions()
            .map_or(false, |extensions| extensions.contains(extension))
    }

    pub fn unknown_fields(&self) -> Option<&UnknownFieldSet> {
        self.unknown_fields.as_deref()
    }

    pub fn unknown_fields_mut(&mut self) -> &mut UnknownFieldSet {
        self.unknown_fields.get_or_insert_with(Box::default)
    }

    /// Merges `other` into this message.
    ///
    /// Singular scalars are overwritten, singular submessages are merged recursively and
    /// repeated fields are appended. Extensions follow the same rules and unknown fields are
    /// appended.
    ///
    /// # Errors
    /// Returns [`WireError::TypeMismatch`] with field number 0 if `other` is of another type.
    pub fn merge_from(&mut self, other: &Message) -> Result<()> {
        if self.descriptor != other.descriptor {
            return Err(WireError::TypeMismatch {
                field_number: 0,
                expected: self.descriptor.full_name(),
                actual: other.descriptor.full_name(),
            });
        }
        self.merge(other.clone());
        Ok(())
    }

    pub(crate) fn merge(&mut self, other: Message) {
        for (index, slot) in other.slots.into_iter().enumerate() {
            if let Some(slot) = slot {
                for value in slot.into_values() {
                    self.store(index, value);
                }
            }
        }
        if let Some(extensions) = other.extensions {
            self.extensions_mut().merge(*extensions);
        }
        if let Some(unknown_fields) = other.unknown_fields {
            self.unknown_fields_mut().merge_from(&unknown_fields);
        }
    }

    /// Exact size of [`Message::to_bytes`] in bytes.
    pub fn encoded_len(&self) -> usize {
        ComputeSizeContext::new().size_of(self)
    }

    /// Encodes the message into a new buffer sized up front.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut context = ComputeSizeContext::new();
        let mut stream = Stream::with_capacity(context.size_of(self));
        write_message(&mut stream, self, &mut context)?;
        Ok(stream.into_bytes())
    }

    /// Appends the encoding of the message to `stream`, without a length prefix.
    pub fn write_to(&self, stream: &mut Stream) -> Result<()> {
        write_message(stream, self, &mut ComputeSizeContext::new())
    }

    pub fn from_bytes(
        descriptor: &'static MessageDescriptor,
        bytes: impl Into<Bytes>,
        config: &Configuration,
    ) -> Result<Self> {
        let mut stream = Stream::from(bytes.into());
        Self::read_from(descriptor, &mut stream, config)
    }

    /// Decodes a message from the readable part of `stream`.
    pub fn read_from(
        descriptor: &'static MessageDescriptor,
        stream: &mut Stream,
        config: &Configuration,
    ) -> Result<Self> {
        let mut message = Self::new(descriptor);
        message.merge_from_stream(stream, config)?;
        Ok(message)
    }

    /// Decodes fields from `stream` into this message with the same rules as
    /// [`Message::merge_from`].
    pub fn merge_from_stream(&mut self, stream: &mut Stream, config: &Configuration) -> Result<()> {
        read_message(stream, self, config, 0)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        fn side_eq<T: PartialEq>(a: Option<&T>, b: Option<&T>, is_empty: fn(&T) -> bool) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a == b,
                (Some(table), None) | (None, Some(table)) => is_empty(table),
                (None, None) => true,
            }
        }

        self.descriptor == other.descriptor
            && self.slots == other.slots
            && side_eq(self.extensions(), other.extensions(), ExtensionSet::is_empty)
            && side_eq(
                self.unknown_fields(),
                other.unknown_fields(),
                UnknownFieldSet::is_empty,
            )
    }
}
