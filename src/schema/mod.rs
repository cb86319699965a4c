//! Schema subsystem for structa
//!
//! A schema is the ordered field list of one record type. It is derived
//! once from the record declaration and is read-only afterwards.
//!
//! # Design Principles
//!
//! - Declaration order is validation order
//! - Fail fast: the first violation is the only one reported
//! - No coercion between kinds, except integral input for float fields
//! - Unvalidated fields are never rejected, not even for absence

mod describe;
mod errors;
mod types;
mod validator;

pub use describe::{FieldDescription, SchemaDescription};
pub use errors::{ErrorKind, MismatchReason, SchemaError, SchemaResult};
pub use types::{FieldMeta, FieldSchema, FieldType, Schema};
pub use validator::SchemaValidator;

pub(crate) use validator::json_type_name;
