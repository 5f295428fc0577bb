//! Decode-time configuration.

use crate::descriptor::MessageDescriptor;
use crate::extension::ExtensionDescriptor;
use crate::size::ComputeSizeContext;
use std::collections::HashMap;

/// Default maximum nesting depth of messages on decode.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// The extensions a decode call recognizes, keyed by extended type name and field number.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<(&'static str, u32), &'static ExtensionDescriptor>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension, replacing any other registered for the same message type and number.
    pub fn register(&mut self, extension: &'static ExtensionDescriptor) {
        self.extensions.insert(
            (extension.extendee().full_name(), extension.number()),
            extension,
        );
    }

    pub fn find(
        &self,
        extendee: &MessageDescriptor,
        field_number: u32,
    ) -> Option<&'static ExtensionDescriptor> {
        self.extensions
            .get(&(extendee.full_name(), field_number))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Options passed into every decode call.
///
/// A configuration is only read while decoding, so one value can be shared by any number of
/// concurrent decodes.
#[derive(Debug, Clone)]
pub struct Configuration {
    extensions: ExtensionRegistry,
    recursion_limit: usize,
    discard_unknown_fields: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            extensions: ExtensionRegistry::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            discard_unknown_fields: false,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_extension(&mut self, extension: &'static ExtensionDescriptor) -> &mut Self {
        self.extensions.register(extension);
        self
    }

    pub fn with_extension(mut self, extension: &'static ExtensionDescriptor) -> Self {
        self.extensions.register(extension);
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Skip unknown fields on decode instead of keeping them for re-encoding.
    pub fn with_discard_unknown_fields(mut self, discard: bool) -> Self {
        self.discard_unknown_fields = discard;
        self
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// The registered extension of `extendee` with this field number, if any.
    pub fn extension(
        &self,
        extendee: &MessageDescriptor,
        field_number: u32,
    ) -> Option<&'static ExtensionDescriptor> {
        self.extensions.find(extendee, field_number)
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    pub fn discard_unknown_fields(&self) -> bool {
        self.discard_unknown_fields
    }

    /// A fresh size memo for one encode or size computation.
    pub fn create_compute_size_context<'a>(&self) -> ComputeSizeContext<'a> {
        ComputeSizeContext::new()
    }
}
