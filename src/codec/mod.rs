//! Record codec for structa
//!
//! Turns typed records into JSON text and back, using the generic value
//! model as the intermediate form.
//!
//! # Flow
//!
//! ```text
//! deserialize: text -> parse -> Object -> validate -> populate -> record
//! serialize:   record -> extract fields -> Object -> render -> text
//! ```
//!
//! Every call holds a fixed-capacity [`DocumentBuffer`] for its whole
//! duration; its accounting is released on every exit path.

mod buffer;
mod config;
mod deserializer;
mod record;
mod serializer;

use std::sync::OnceLock;

pub use buffer::DocumentBuffer;
pub use config::{CodecConfig, ConfigError, DEFAULT_DOCUMENT_CAPACITY};
pub use record::{FieldValue, Object, Record};
#[doc(hidden)]
pub use record::{read_field, wrong_kind};
pub use serde_json::Value;

use crate::observability::{AllocationAccounting, MemoryTracker};

/// Serializer and deserializer bound to one configuration and one
/// accounting sink.
///
/// Calls are synchronous and call-local; a `Codec` can be shared between
/// threads as long as its accounting sink tolerates concurrent updates.
pub struct Codec<'a> {
    config: CodecConfig,
    accounting: &'a dyn AllocationAccounting,
}

impl<'a> Codec<'a> {
    /// Create a codec with an injected accounting sink
    pub fn new(config: CodecConfig, accounting: &'a dyn AllocationAccounting) -> Self {
        Self { config, accounting }
    }

    /// Returns the configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Returns the accounting sink
    pub fn accounting(&self) -> &dyn AllocationAccounting {
        self.accounting
    }

    fn acquire_buffer(&self) -> DocumentBuffer<'_> {
        DocumentBuffer::acquire(self.config.document_capacity, self.accounting)
    }
}

impl Codec<'static> {
    /// Process-default codec: default configuration, global tracker
    pub fn global() -> &'static Codec<'static> {
        static GLOBAL: OnceLock<Codec<'static>> = OnceLock::new();
        GLOBAL.get_or_init(|| Codec::new(CodecConfig::default(), MemoryTracker::global()))
    }
}
