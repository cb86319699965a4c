//! Record serializer
//!
//! Serialization is structural by default: in-memory state is rendered as
//! is and validation is a separate call. With `validate_on_serialize` the
//! record is checked against its own schema first and the validator's
//! error is returned unchanged.

use super::{Codec, Record};
use crate::observability::{Event, ObservationScope};
use crate::schema::{SchemaError, SchemaResult};

impl Codec<'_> {
    /// Render a record to JSON text.
    ///
    /// # Errors
    ///
    /// - the validator's error when `validate_on_serialize` is set and the
    ///   record violates its schema
    /// - `INVALID_JSON` if rendering fails
    /// - `BUFFER_OVERFLOW` if the text exceeds the document capacity
    pub fn serialize<R: Record>(&self, record: &R) -> SchemaResult<String> {
        let scope = ObservationScope::new("serialize", R::NAME);
        let buffer = self.acquire_buffer();

        let result = self.render(record).and_then(|text| {
            buffer.ensure_fits(text.len())?;
            Ok(text)
        });

        match &result {
            Ok(_) => scope.complete(Event::SerializeComplete),
            Err(err) => scope.fail(
                Event::SerializeFailed,
                err.kind().code(),
                err.field_path(),
                err.message(),
            ),
        }
        result
    }

    /// Render to text, `"{}"` on failure
    pub fn serialize_or_empty<R: Record>(&self, record: &R) -> String {
        self.serialize(record)
            .unwrap_or_else(|_| String::from("{}"))
    }

    fn render<R: Record>(&self, record: &R) -> SchemaResult<String> {
        if self.config.validate_on_serialize {
            record.validate_self()?;
        }

        let obj = record.to_object();
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(&obj)
        } else {
            serde_json::to_string(&obj)
        };
        rendered.map_err(|e| SchemaError::invalid_json(format!("Failed to serialize: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;
    use crate::observability::{AllocationAccounting, MemoryTracker};
    use crate::schema::{ErrorKind, FieldMeta, MismatchReason};

    crate::record! {
        struct Address {
            city: String => FieldMeta::none(),
            zip: i32 => FieldMeta::none(),
        }
    }

    crate::record! {
        struct Person {
            name: String => FieldMeta::strlen(1, 10),
            age: i32 => FieldMeta::range(0.0, 150.0),
            weight: f64 => FieldMeta::optional(),
            address: Address => FieldMeta::optional(),
        }
    }

    fn person() -> Person {
        Person {
            name: "Ada".into(),
            age: 36,
            weight: 61.5,
            address: Address {
                city: "London".into(),
                zip: 12345,
            },
        }
    }

    #[test]
    fn test_output_keys_in_declaration_order() {
        let tracker = MemoryTracker::new();
        let codec = Codec::new(CodecConfig::default(), &tracker);
        let text = codec.serialize(&person()).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Ada","age":36,"weight":61.5,"address":{"city":"London","zip":12345}}"#
        );
    }

    #[test]
    fn test_invalid_state_serializes_by_default() {
        let tracker = MemoryTracker::new();
        let codec = Codec::new(CodecConfig::default(), &tracker);
        let record = Person {
            age: 500,
            ..person()
        };
        assert!(codec.serialize(&record).is_ok());
    }

    #[test]
    fn test_validate_on_serialize_returns_validator_error() {
        let tracker = MemoryTracker::new();
        let codec = Codec::new(CodecConfig::default().validating(), &tracker);
        let record = Person {
            age: 500,
            ..person()
        };
        let err = codec.serialize(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.reason(), Some(MismatchReason::OutOfRange));
        assert_eq!(err.field_path(), "age");
        assert_eq!(codec.serialize_or_empty(&record), "{}");
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn test_buffer_overflow() {
        let tracker = MemoryTracker::new();
        let codec = Codec::new(CodecConfig::with_capacity(16), &tracker);
        let err = codec.serialize(&person()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferOverflow);
        assert!(err.field_path().is_empty());
        assert_eq!(tracker.stats().current, 0);
        assert_eq!(tracker.stats().peak, 16);
    }

    #[test]
    fn test_pretty_output() {
        let tracker = MemoryTracker::new();
        let config = CodecConfig {
            pretty: true,
            ..CodecConfig::default()
        };
        let codec = Codec::new(config, &tracker);
        let text = codec.serialize(&person()).unwrap();
        assert!(text.contains("\n  \"name\": \"Ada\""));
    }
}
