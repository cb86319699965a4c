//! Codec Invariant Tests
//!
//! Tests for serializer/deserializer invariants:
//! - Valid records round-trip field for field
//! - Deserialization reports the validator's error unchanged
//! - Nested records validate themselves and report dotted paths
//! - Malformed text is INVALID_JSON with no field path
//! - Buffer accounting always returns to its starting value

use structa::codec::{Codec, CodecConfig, Record, Value};
use structa::observability::{AllocationAccounting, MemoryTracker};
use structa::record;
use structa::schema::{ErrorKind, FieldMeta, MismatchReason};

// =============================================================================
// Helper Records
// =============================================================================

record! {
    pub struct Address {
        pub city: String => FieldMeta::strlen(1, 32),
        pub zip: u32 => FieldMeta::default(),
    }
}

record! {
    /// Account holder with an optional nested address
    pub struct User {
        pub username: String => FieldMeta::strlen(3, 15),
        pub role: String => FieldMeta::enum_of(["admin", "user", "guest"]),
        pub age: i32 => FieldMeta::range(18.0, 100.0),
        pub score: f64 => FieldMeta::optional(),
        pub active: bool => FieldMeta::none(),
        pub note: String => FieldMeta::optional(),
        pub address: Address => FieldMeta::optional(),
    }
}

record! {
    pub struct Envelope {
        pub id: u64 => FieldMeta::default(),
        pub owner: User => FieldMeta::default(),
        pub payload: Value => FieldMeta::optional_unvalidated(),
    }
}

record! {
    pub struct Gauge {
        pub level: f32 => FieldMeta::range(0.0, 0.1),
        pub temp: f32 => FieldMeta::default(),
    }
}

fn alice() -> User {
    User {
        username: "alice".into(),
        role: "admin".into(),
        age: 30,
        score: 97.25,
        active: true,
        note: "founder".into(),
        address: Address {
            city: "Oslo".into(),
            zip: 150,
        },
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// A valid record survives serialize then deserialize unchanged.
#[test]
fn test_round_trip() {
    let user = alice();
    let text = user.serialize_with_result().unwrap();
    let back = User::deserialize_with_result(&text).unwrap();
    assert_eq!(back, user);
}

/// Two levels of nesting round-trip too.
#[test]
fn test_nested_round_trip() {
    let tracker = MemoryTracker::new();
    let codec = Codec::new(CodecConfig::with_capacity(1024), &tracker);

    let envelope = Envelope {
        id: 42,
        owner: alice(),
        payload: serde_json::json!({"raw": [1, 2, 3]}),
    };
    let text = codec.serialize(&envelope).unwrap();
    let back: Envelope = codec.deserialize(&text).unwrap();
    assert_eq!(back, envelope);
}

/// Single-precision fields sitting on an inclusive bound survive a round trip.
#[test]
fn test_f32_at_bound_round_trip() {
    let gauge = Gauge {
        level: 0.1,
        temp: 21.1,
    };
    assert!(gauge.validate_self().is_ok());

    let tracker = MemoryTracker::new();
    let strict = Codec::new(CodecConfig::default().validating(), &tracker);
    let text = strict.serialize(&gauge).unwrap();
    assert_eq!(text, r#"{"level":0.1,"temp":21.1}"#);

    let back: Gauge = strict.deserialize(&text).unwrap();
    assert_eq!(back, gauge);
}

/// Input larger than the document capacity cannot be parsed.
#[test]
fn test_oversized_input_is_invalid_json() {
    let tracker = MemoryTracker::new();
    let codec = Codec::new(CodecConfig::with_capacity(16), &tracker);
    let text = serde_json::to_string(&alice().to_object()).unwrap();

    let err = codec.deserialize::<User>(&text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidJson);
    assert!(err.field_path().is_empty());
    assert_eq!(codec.validate_str::<User>(&text).unwrap_err().kind(), ErrorKind::InvalidJson);
    assert_eq!(tracker.current(), 0);
}

/// Keys not declared in the schema are ignored on read.
#[test]
fn test_undeclared_keys_ignored() {
    let text = r#"{"username":"bob","role":"user","age":40,"active":false,"shoe_size":44}"#;
    let user = User::deserialize_with_result(text).unwrap();
    assert_eq!(user.username, "bob");
    assert!(!user.serialize().contains("shoe_size"));
}

// =============================================================================
// Error Propagation Tests
// =============================================================================

/// `{}` fails with the first required field.
#[test]
fn test_required_field_omission() {
    let err = User::deserialize_with_result("{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldMissing);
    assert_eq!(err.field_path(), "username");
}

/// The convenience form returns a default instance on failure.
#[test]
fn test_convenience_form_returns_default() {
    assert_eq!(User::deserialize("{}"), User::default());
    assert_eq!(User::deserialize("not json"), User::default());
}

/// Malformed text is INVALID_JSON with an empty path.
#[test]
fn test_malformed_input() {
    for text in ["", "{", "{\"username\": }", "nul"] {
        let err = User::deserialize_with_result(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidJson, "input {:?}", text);
        assert!(err.field_path().is_empty());
    }
}

// =============================================================================
// Nested Record Tests
// =============================================================================

/// An optional nested record may be omitted.
#[test]
fn test_optional_nested_omitted() {
    let text = r#"{"username":"carol","role":"guest","age":22}"#;
    let user = User::deserialize_with_result(text).unwrap();
    assert_eq!(user.address, Address::default());
}

/// A nested record missing its own required field fails under a dotted path.
#[test]
fn test_nested_required_field_missing() {
    let text = r#"{"username":"carol","role":"guest","age":22,"address":{"city":"Rome"}}"#;
    let err = User::deserialize_with_result(text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldMissing);
    assert_eq!(err.field_path(), "address.zip");
}

/// Nested violations keep their reason and gain every parent segment.
#[test]
fn test_deeply_nested_violation() {
    let text = r#"{"id":1,"owner":{"username":"dave","role":"user","age":50,"address":{"city":"","zip":1}}}"#;
    let err = Envelope::deserialize_with_result(text).unwrap_err();
    assert_eq!(err.field_path(), "owner.address.city");
    assert_eq!(err.reason(), Some(MismatchReason::LengthOutOfRange));
}

/// A nested field of the wrong shape is caught by the outer validator.
#[test]
fn test_nested_wrong_shape() {
    let text = r#"{"username":"carol","role":"guest","age":22,"address":"Rome"}"#;
    let err = User::deserialize_with_result(text).unwrap_err();
    assert_eq!(err.field_path(), "address");
    assert_eq!(err.reason(), Some(MismatchReason::WrongKind));
}

// =============================================================================
// Accounting Tests
// =============================================================================

/// Running total returns to its starting value; peak never decreases.
#[test]
fn test_accounting_balance() {
    let tracker = MemoryTracker::new();
    let codec = Codec::new(CodecConfig::default().validating(), &tracker);
    let before = tracker.stats();
    let mut last_peak = before.peak;

    let invalid = User {
        age: 3,
        ..alice()
    };
    let inputs = [
        r#"{"username":"erin","role":"user","age":33}"#,
        "{}",
        "{{{",
        r#"{"username":"erin","role":"root","age":33}"#,
    ];

    for _ in 0..5 {
        let _ = codec.serialize(&alice());
        let _ = codec.serialize(&invalid);
        for text in inputs {
            let _ = codec.deserialize::<User>(text);
            let _ = codec.validate_str::<User>(text);
        }

        let stats = tracker.stats();
        assert_eq!(stats.current, before.current);
        assert!(stats.peak >= last_peak);
        last_peak = stats.peak;
    }

    assert_eq!(last_peak, CodecConfig::default().document_capacity);
}

/// The validating codec refuses to render invalid state, the default one does not.
#[test]
fn test_serialize_policy() {
    let tracker = MemoryTracker::new();
    let invalid = User {
        role: "root".into(),
        ..alice()
    };

    let lenient = Codec::new(CodecConfig::default(), &tracker);
    assert!(lenient.serialize(&invalid).is_ok());

    let strict = Codec::new(CodecConfig::default().validating(), &tracker);
    let err = strict.serialize(&invalid).unwrap_err();
    assert_eq!(err.field_path(), "role");
    assert_eq!(strict.serialize_or_empty(&invalid), "{}");
}
