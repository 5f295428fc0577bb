//! Extension identities and the per-message extension table.

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::message::{Message, Slot};
use crate::value::Value;
use crate::{Result, WireError};
use indexmap::IndexMap;

/// A field declared outside its message type.
///
/// The identity is the extended message type plus the field number, so one static per
/// `extend` declaration is enough:
///
/// ```rust
/// use protowire::{ExtensionDescriptor, FieldDescriptor, MessageDescriptor, ScalarType};
///
/// static ANIMAL: MessageDescriptor = MessageDescriptor::new("zoo.Animal", &[]);
/// static LEGS: ExtensionDescriptor = ExtensionDescriptor::new(
///     "zoo.legs",
///     &ANIMAL,
///     FieldDescriptor::optional("legs", 100, ScalarType::Uint32),
/// );
///
/// assert_eq!(LEGS.number(), 100);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    full_name: &'static str,
    extendee: &'static MessageDescriptor,
    field: FieldDescriptor,
}

impl ExtensionDescriptor {
    pub const fn new(
        full_name: &'static str,
        extendee: &'static MessageDescriptor,
        field: FieldDescriptor,
    ) -> Self {
        Self {
            full_name,
            extendee,
            field,
        }
    }

    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    pub fn extendee(&self) -> &'static MessageDescriptor {
        self.extendee
    }

    /// The field as it is framed on the wire.
    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn number(&self) -> u32 {
        self.field.number
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ExtensionEntry {
    descriptor: &'static ExtensionDescriptor,
    slot: Option<Slot>,
}

/// Extension values stored on one message instance, in insertion order.
#[derive(Debug, Clone)]
pub struct ExtensionSet {
    extendee: &'static MessageDescriptor,
    entries: IndexMap<u32, ExtensionEntry>,
}

impl ExtensionSet {
    pub fn new(extendee: &'static MessageDescriptor) -> Self {
        Self {
            extendee,
            entries: IndexMap::new(),
        }
    }

    fn check(&self, extension: &'static ExtensionDescriptor, repeated: bool) -> Result<()> {
        if extension.extendee != self.extendee {
            return Err(WireError::ExtendeeMismatch {
                extension: extension.full_name,
                expected: extension.extendee.full_name(),
                actual: self.extendee.full_name(),
            });
        }
        if extension.field.is_repeated() != repeated {
            return Err(WireError::Cardinality {
                field_number: extension.number(),
                repeated: extension.field.is_repeated(),
            });
        }
        Ok(())
    }

    /// Sets a singular extension, replacing any previous value.
    ///
    /// # Errors
    /// Fails if the extension targets another message type, is repeated, or if `value` does not
    /// match its declared type.
    pub fn put(
        &mut self,
        extension: &'static ExtensionDescriptor,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.check(extension, false)?;
        let value = value.into();
        value.check(&extension.field)?;
        self.entries.insert(
            extension.number(),
            ExtensionEntry {
                descriptor: extension,
                slot: Some(Slot::Single(value)),
            },
        );
        Ok(())
    }

    /// Appends to a repeated extension.
    pub fn push(
        &mut self,
        extension: &'static ExtensionDescriptor,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.check(extension, true)?;
        let value = value.into();
        value.check(&extension.field)?;
        self.store(extension, value);
        Ok(())
    }

    /// Stores a decoded value with the same rules as a declared field.
    pub(crate) fn store(&mut self, extension: &'static ExtensionDescriptor, value: Value) {
        let entry = self
            .entries
            .entry(extension.number())
            .or_insert_with(|| ExtensionEntry {
                descriptor: extension,
                slot: None,
            });
        Slot::store(&mut entry.slot, &extension.field, value);
    }

    fn slot(&self, extension: &ExtensionDescriptor) -> Option<&Slot> {
        self.entries
            .get(&extension.number())
            .filter(|entry| entry.descriptor == extension)
            .and_then(|entry| entry.slot.as_ref())
    }

    pub fn get(&self, extension: &ExtensionDescriptor) -> Option<&Value> {
        match self.slot(extension)? {
            Slot::Single(value) => Some(value),
            Slot::Repeated(_) => None,
        }
    }

    /// Mutable access to a singular message-typed extension.
    pub fn get_message_mut(&mut self, extension: &ExtensionDescriptor) -> Option<&mut Message> {
        let entry = self.entries.get_mut(&extension.number())?;
        if entry.descriptor != extension {
            return None;
        }
        match entry.slot.as_mut()? {
            Slot::Single(value) => value.as_message_mut(),
            Slot::Repeated(_) => None,
        }
    }

    /// All values of the extension. A singular extension yields at most one.
    pub fn get_repeated(&self, extension: &ExtensionDescriptor) -> &[Value] {
        self.slot(extension).map(Slot::values).unwrap_or(&[])
    }

    pub fn contains(&self, extension: &ExtensionDescriptor) -> bool {
        self.slot(extension).is_some()
    }

    pub fn remove(&mut self, extension: &ExtensionDescriptor) -> bool {
        if self.slot(extension).is_none() {
            return false;
        }
        self.entries.shift_remove(&extension.number()).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|entry| entry.slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every present extension with its values. Singular extensions yield one value.
    pub fn iter(&self) -> impl Iterator<Item = (&'static ExtensionDescriptor, &[Value])> {
        self.entries.values().filter_map(|entry| {
            entry
                .slot
                .as_ref()
                .map(|slot| (entry.descriptor, slot.values()))
        })
    }

    /// Field descriptors and slots in write order.
    pub(crate) fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Slot)> {
        self.entries.values().filter_map(|entry| {
            entry
                .slot
                .as_ref()
                .map(|slot| (&entry.descriptor.field, slot))
        })
    }

    pub(crate) fn merge(&mut self, other: ExtensionSet) {
        for (_, entry) in other.entries {
            let descriptor = entry.descriptor;
            for value in entry.slot.into_iter().flat_map(Slot::into_values) {
                self.store(descriptor, value);
            }
        }
    }
}

impl PartialEq for ExtensionSet {
    fn eq(&self, other: &Self) -> bool {
        self.extendee == other.extendee
            && self.len() == other.len()
            && self.iter().all(|(descriptor, values)| {
                other.contains(descriptor) && other.get_repeated(descriptor) == values
            })
    }
}
