//! structa - schema-driven validation and JSON marshalling for records
//!
//! Declare a record once with [`record!`] and get its schema, fail-fast
//! validation, serialization and deserialization from that declaration.

pub mod codec;
pub mod observability;
pub mod schema;

pub use codec::{Codec, CodecConfig, Record};
pub use schema::{ErrorKind, FieldMeta, SchemaError, SchemaResult};
