//! Schema validator for generic values
//!
//! Validation semantics:
//! - Fields are checked in declaration order
//! - The first violated rule ends validation and is the only error reported
//! - Unvalidated fields are skipped entirely, presence included
//! - Undeclared keys are ignored
//! - Nested objects are only checked for shape; their own schema is applied
//!   when the field is deserialized into the nested record

use serde_json::{Map, Value};

use super::errors::{MismatchReason, SchemaError, SchemaResult};
use super::types::{FieldSchema, FieldType, Schema};

/// Validator that checks generic values against one schema.
///
/// Validation is deterministic and never mutates the input.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Returns the schema this validator enforces.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Validates a document whose root must be an object.
    ///
    /// # Errors
    ///
    /// Returns `TYPE_MISMATCH` with an empty field path when the root is not
    /// an object, otherwise whatever [`validate_object`](Self::validate_object)
    /// reports.
    pub fn validate_document(&self, document: &Value) -> SchemaResult<()> {
        let obj = document.as_object().ok_or_else(|| {
            SchemaError::mismatch(
                MismatchReason::WrongKind,
                "",
                format!("Expected object at root, got {}", json_type_name(document)),
            )
        })?;
        self.validate_object(obj)
    }

    /// Validates an object against every field in declaration order.
    ///
    /// # Errors
    ///
    /// - `FIELD_MISSING` when a required, validated field is absent
    /// - `TYPE_MISMATCH` for a wrong kind, a bound, a length or an enum
    ///   violation, with the reason set accordingly
    pub fn validate_object(&self, obj: &Map<String, Value>) -> SchemaResult<()> {
        for field in &self.schema.fields {
            if !field.meta.validate {
                continue;
            }

            match obj.get(&field.name) {
                Some(value) => validate_value(field, value)?,
                None if field.meta.required => {
                    return Err(SchemaError::field_missing(&field.name));
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Checks one present value against its field descriptor.
fn validate_value(field: &FieldSchema, value: &Value) -> SchemaResult<()> {
    match field.field_type {
        FieldType::Int => {
            if !value.is_i64() && !value.is_u64() {
                return Err(kind_error(field, value));
            }
            check_bounds(field, value)
        }
        FieldType::Float => {
            if !value.is_number() {
                return Err(kind_error(field, value));
            }
            check_bounds(field, value)
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(kind_error(field, value));
            }
            Ok(())
        }
        FieldType::String => match value.as_str() {
            Some(s) => check_string(field, s),
            None => Err(kind_error(field, value)),
        },
        FieldType::Object => {
            if !value.is_object() {
                return Err(kind_error(field, value));
            }
            Ok(())
        }
        FieldType::Unknown => Ok(()),
    }
}

fn check_bounds(field: &FieldSchema, value: &Value) -> SchemaResult<()> {
    let Some(n) = as_f64(value) else {
        return Err(kind_error(field, value));
    };

    if let Some(min) = field.meta.min_value {
        if n < min {
            return Err(SchemaError::mismatch(
                MismatchReason::OutOfRange,
                &field.name,
                "Value below min",
            ));
        }
    }
    if let Some(max) = field.meta.max_value {
        if n > max {
            return Err(SchemaError::mismatch(
                MismatchReason::OutOfRange,
                &field.name,
                "Value above max",
            ));
        }
    }
    Ok(())
}

fn check_string(field: &FieldSchema, s: &str) -> SchemaResult<()> {
    let len = s.len();

    if let Some(min) = field.meta.min_length {
        if len < min {
            return Err(SchemaError::mismatch(
                MismatchReason::LengthOutOfRange,
                &field.name,
                "String too short",
            ));
        }
    }
    if let Some(max) = field.meta.max_length {
        if len > max {
            return Err(SchemaError::mismatch(
                MismatchReason::LengthOutOfRange,
                &field.name,
                "String too long",
            ));
        }
    }
    if !field.meta.allows(s) {
        return Err(SchemaError::mismatch(
            MismatchReason::NotInEnumSet,
            &field.name,
            "Invalid enum value",
        ));
    }
    Ok(())
}

fn as_f64(value: &Value) -> Option<f64> {
    if let Some(i) = value.as_i64() {
        Some(i as f64)
    } else if let Some(u) = value.as_u64() {
        Some(u as f64)
    } else {
        value.as_f64()
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn kind_error(field: &FieldSchema, actual: &Value) -> SchemaError {
    SchemaError::mismatch(
        MismatchReason::WrongKind,
        &field.name,
        format!(
            "Expected {}, got {}",
            field.field_type.type_name(),
            json_type_name(actual)
        ),
    )
}
