//! The message-level read and write paths.
//!
//! Writing walks the declared fields in table order, then extensions, then unknown fields.
//! Reading loops over tags until the readable region is exhausted and routes each one to a
//! declared field, a registered extension or the unknown-field table.

use crate::config::Configuration;
use crate::descriptor::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::message::{Message, Slot};
use crate::size::{packed_size, ComputeSizeContext};
use crate::stream::Stream;
use crate::unknown::UnknownValue;
use crate::value::Value;
use crate::varint::write_varint;
use crate::wire::{read_length, read_scalar, read_tag, write_scalar, write_tag, Tag, WireType};
use crate::{Result, WireError};

/// Writes every present field of `message` to `stream`.
///
/// Length prefixes of nested messages come from `context`, so sizes are computed once per
/// instance even for deep trees.
///
/// # Errors
/// Returns [`WireError::TypeMismatch`] if a slot holds a value of the wrong type, or
/// [`WireError::InvalidTag`] if a field number cannot be encoded.
pub fn write_message<'a>(
    stream: &mut Stream,
    message: &'a Message,
    context: &mut ComputeSizeContext<'a>,
) -> Result<()> {
    for (field, slot) in message.present_fields() {
        write_field(stream, field, slot, context)?;
    }
    if let Some(extensions) = message.extensions() {
        for (field, slot) in extensions.fields() {
            write_field(stream, field, slot, context)?;
        }
    }
    if let Some(unknown_fields) = message.unknown_fields() {
        unknown_fields.write_to(stream)?;
    }
    Ok(())
}

fn write_field<'a>(
    stream: &mut Stream,
    field: &FieldDescriptor,
    slot: &'a Slot,
    context: &mut ComputeSizeContext<'a>,
) -> Result<()> {
    let values = slot.values();
    for value in values {
        value.check(field)?;
    }

    if field.is_packed() {
        if values.is_empty() {
            return Ok(());
        }
        write_tag(stream, field.number, WireType::LengthDelimited)?;
        write_varint(stream, packed_size(values, context) as u64);
        for value in values {
            write_value(stream, value, context)?;
        }
        return Ok(());
    }

    let wire_type = field.field_type.wire_type();
    for value in values {
        write_tag(stream, field.number, wire_type)?;
        write_value(stream, value, context)?;
    }
    Ok(())
}

fn write_value<'a>(
    stream: &mut Stream,
    value: &'a Value,
    context: &mut ComputeSizeContext<'a>,
) -> Result<()> {
    match value {
        Value::Scalar(scalar) => {
            write_scalar(stream, scalar);
            Ok(())
        }
        Value::Message(message) => {
            write_varint(stream, context.size_of(message) as u64);
            write_message(stream, message, context)
        }
    }
}

/// Reads fields from `stream` into `message` until the readable region ends.
///
/// `depth` is the nesting level of `message`, zero for the outermost one.
///
/// # Errors
/// Fails on the first malformed tag or value. A value cut short by the end of the input is
/// reported as [`WireError::TruncatedMessage`] naming its field.
pub fn read_message(
    stream: &mut Stream,
    message: &mut Message,
    config: &Configuration,
    depth: usize,
) -> Result<()> {
    while stream.has_remaining() {
        let tag = read_tag(stream)?;
        read_field(stream, message, tag, config, depth)?;
    }
    Ok(())
}

fn read_field(
    stream: &mut Stream,
    message: &mut Message,
    tag: Tag,
    config: &Configuration,
    depth: usize,
) -> Result<()> {
    let descriptor = message.descriptor();

    if let Some(index) = descriptor.field_index(tag.field_number) {
        let field = &descriptor.fields()[index];
        if accepts(field, tag.wire_type) {
            return read_values(stream, field, tag.wire_type, config, depth, |value| {
                message.store(index, value)
            })
            .map_err(within_field(tag.field_number));
        }
        tracing::debug!(
            "Field {} of {} arrived as {:?}, keeping it as an unknown field",
            tag.field_number,
            descriptor.full_name(),
            tag.wire_type
        );
    } else if let Some(extension) = config.extension(descriptor, tag.field_number) {
        if accepts(extension.field(), tag.wire_type) {
            tracing::trace!(
                "Decoding extension {} on {}",
                extension.full_name(),
                descriptor.full_name()
            );
            let extensions = message.extensions_mut();
            return read_values(stream, extension.field(), tag.wire_type, config, depth, |value| {
                extensions.store(extension, value)
            })
            .map_err(within_field(tag.field_number));
        }
        tracing::debug!(
            "Extension {} arrived as {:?}, keeping it as an unknown field",
            extension.full_name(),
            tag.wire_type
        );
    }

    let value = UnknownValue::read(stream, tag.wire_type).map_err(within_field(tag.field_number))?;
    if config.discard_unknown_fields() {
        return Ok(());
    }
    tracing::trace!(
        "Captured unknown field {} ({:?}) on {}",
        tag.field_number,
        tag.wire_type,
        descriptor.full_name()
    );
    message.unknown_fields_mut().add(tag.field_number, value);
    Ok(())
}

/// Whether a value framed as `wire_type` can be decoded into `field`.
///
/// Repeated packable fields take both their natural wire type and the packed form, whichever
/// form the field was declared with.
fn accepts(field: &FieldDescriptor, wire_type: WireType) -> bool {
    wire_type == field.field_type.wire_type()
        || (field.is_repeated()
            && field.field_type.is_packable()
            && wire_type == WireType::LengthDelimited)
}

fn read_values<F>(
    stream: &mut Stream,
    field: &FieldDescriptor,
    wire_type: WireType,
    config: &Configuration,
    depth: usize,
    mut sink: F,
) -> Result<()>
where
    F: FnMut(Value),
{
    match field.field_type {
        FieldType::Scalar(scalar)
            if wire_type == WireType::LengthDelimited && scalar.is_packable() =>
        {
            if !field.is_packed() {
                tracing::debug!(
                    "Accepting packed payload for unpacked field {}",
                    field.number
                );
            }
            let len = read_length(stream)?;
            let previous = stream.push_limit(len)?;
            while stream.has_remaining() {
                sink(Value::Scalar(read_scalar(stream, scalar)?));
            }
            stream.pop_limit(previous);
        }
        FieldType::Scalar(scalar) => sink(Value::Scalar(read_scalar(stream, scalar)?)),
        FieldType::Message(descriptor) => {
            sink(Value::from(read_nested(stream, descriptor, config, depth)?));
        }
    }
    Ok(())
}

fn read_nested(
    stream: &mut Stream,
    descriptor: &'static MessageDescriptor,
    config: &Configuration,
    depth: usize,
) -> Result<Message> {
    let depth = depth + 1;
    if depth > config.recursion_limit() {
        return Err(WireError::RecursionLimitExceeded {
            limit: config.recursion_limit(),
        });
    }
    let len = read_length(stream)?;
    let previous = stream.push_limit(len)?;
    let mut nested = Message::new(descriptor);
    read_message(stream, &mut nested, config, depth)?;
    stream.pop_limit(previous);
    Ok(nested)
}

fn within_field(field_number: u32) -> impl Fn(WireError) -> WireError {
    move |error| match error {
        WireError::TruncatedInput { needed, remaining } => WireError::TruncatedMessage {
            field_number,
            needed,
            remaining,
        },
        other => other,
    }
}
