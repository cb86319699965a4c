//! Record deserializer
//!
//! Parse, then validate, then populate. Population only starts once the
//! whole top-level object has passed validation; nested records validate
//! themselves as they are populated and report dotted field paths.

use serde_json::Value;

use super::{Codec, Object, Record};
use crate::observability::{Event, ObservationScope};
use crate::schema::{json_type_name, MismatchReason, SchemaError, SchemaResult};

impl Codec<'_> {
    /// Parse text into a record.
    ///
    /// # Errors
    ///
    /// - `INVALID_JSON` if the text does not parse or exceeds the document
    ///   capacity, with an empty field path
    /// - `TYPE_MISMATCH` with an empty field path if the root is not an object
    /// - the validator's error, unchanged
    pub fn deserialize<R: Record>(&self, text: &str) -> SchemaResult<R> {
        let scope = ObservationScope::new("deserialize", R::NAME);
        let buffer = self.acquire_buffer();

        let result = buffer
            .ensure_parsable(text.len())
            .and_then(|()| parse_object(text))
            .and_then(|obj| R::from_object(&obj));

        match &result {
            Ok(_) => scope.complete(Event::DeserializeComplete),
            Err(err) => scope.fail(
                Event::DeserializeRejected,
                err.kind().code(),
                err.field_path(),
                err.message(),
            ),
        }
        result
    }

    /// Parse text into a record, `R::default()` on failure
    pub fn deserialize_or_default<R: Record>(&self, text: &str) -> R {
        self.deserialize(text).unwrap_or_default()
    }

    /// Parse and validate text against `R`'s schema without populating.
    ///
    /// Nested records are only checked for object shape, as in
    /// [`SchemaValidator`](crate::schema::SchemaValidator).
    pub fn validate_str<R: Record>(&self, text: &str) -> SchemaResult<()> {
        let buffer = self.acquire_buffer();
        buffer.ensure_parsable(text.len())?;
        let obj = parse_object(text)?;
        R::validate_object(&obj)
    }
}

fn parse_object(text: &str) -> SchemaResult<Object> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SchemaError::invalid_json(format!("Parse error: {}", e)))?;

    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(SchemaError::mismatch(
            MismatchReason::WrongKind,
            "",
            format!("Expected object at root, got {}", json_type_name(&other)),
        )),
    }
}
