//! Size computation that mirrors the write path without producing bytes.

use crate::descriptor::FieldDescriptor;
use crate::message::{Message, Slot};
use crate::value::Value;
use crate::wire::{length_delimited_size, scalar_size, tag_size};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Per-pass memo of nested message sizes.
///
/// Entries are keyed by the address of the message instance. The lifetime keeps every measured
/// message borrowed for as long as the context lives, so an address cannot be reused by another
/// instance while its size is cached.
#[derive(Debug, Default)]
pub struct ComputeSizeContext<'a> {
    sizes: HashMap<usize, usize>,
    _messages: PhantomData<&'a Message>,
}

impl<'a> ComputeSizeContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded size of `message` without a length prefix. Computed once per instance.
    pub fn size_of(&mut self, message: &'a Message) -> usize {
        let key = message as *const Message as usize;
        if let Some(&size) = self.sizes.get(&key) {
            return size;
        }
        let size = compute_size(message, self);
        self.sizes.insert(key, size);
        size
    }

    /// Number of message instances measured so far.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Sums the declared fields, then extensions, then unknown fields of `message`.
pub fn compute_size<'a>(message: &'a Message, context: &mut ComputeSizeContext<'a>) -> usize {
    let mut size: usize = message
        .present_fields()
        .map(|(field, slot)| field_size(field, slot, context))
        .sum();
    if let Some(extensions) = message.extensions() {
        size += extensions
            .fields()
            .map(|(field, slot)| field_size(field, slot, context))
            .sum::<usize>();
    }
    if let Some(unknown_fields) = message.unknown_fields() {
        size += unknown_fields.encoded_len();
    }
    size
}

pub(crate) fn field_size<'a>(
    field: &FieldDescriptor,
    slot: &'a Slot,
    context: &mut ComputeSizeContext<'a>,
) -> usize {
    let values = slot.values();
    if field.is_packed() {
        if values.is_empty() {
            return 0;
        }
        return tag_size(field.number) + length_delimited_size(packed_size(values, context));
    }
    values
        .iter()
        .map(|value| tag_size(field.number) + value_size(value, context))
        .sum()
}

/// Payload size of a packed entry, without its tag or length prefix.
pub(crate) fn packed_size<'a>(values: &'a [Value], context: &mut ComputeSizeContext<'a>) -> usize {
    values.iter().map(|value| value_size(value, context)).sum()
}

/// Size of one value without its tag. Nested messages include their length prefix.
pub(crate) fn value_size<'a>(value: &'a Value, context: &mut ComputeSizeContext<'a>) -> usize {
    match value {
        Value::Scalar(scalar) => scalar_size(scalar),
        Value::Message(message) => length_delimited_size(context.size_of(message)),
    }
}
