//! Error types for schema validation and record marshalling
//!
//! Error codes:
//! - SUCCESS
//! - BUFFER_OVERFLOW
//! - INVALID_JSON
//! - TYPE_MISMATCH
//! - FIELD_MISSING
//! - MEMORY_ALLOCATION_FAILED
//!
//! `TYPE_MISMATCH` covers wrong kinds, numeric bounds, string length and
//! enum membership. The [`MismatchReason`] attached to the error tells them
//! apart without changing the code consumers match on.

use std::fmt;

use thiserror::Error;

/// Error codes reported by validation, serialization and deserialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No error
    Success,
    /// Document does not fit the fixed-capacity buffer
    BufferOverflow,
    /// Text could not be parsed or rendered
    InvalidJson,
    /// Value has the wrong kind or violates a declared constraint
    TypeMismatch,
    /// Required field absent from the input
    FieldMissing,
    /// Document buffer could not be acquired
    MemoryAllocationFailed,
}

impl ErrorKind {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Success => "SUCCESS",
            ErrorKind::BufferOverflow => "BUFFER_OVERFLOW",
            ErrorKind::InvalidJson => "INVALID_JSON",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::FieldMissing => "FIELD_MISSING",
            ErrorKind::MemoryAllocationFailed => "MEMORY_ALLOCATION_FAILED",
        }
    }

    /// Returns the human-readable label used in rendered errors
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Success => "Success",
            ErrorKind::BufferOverflow => "Buffer overflow",
            ErrorKind::InvalidJson => "Invalid JSON",
            ErrorKind::TypeMismatch => "Type mismatch",
            ErrorKind::FieldMissing => "Field missing",
            ErrorKind::MemoryAllocationFailed => "Memory allocation failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Finer classification of a `TypeMismatch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchReason {
    /// Runtime kind differs from the declared field type
    WrongKind,
    /// Numeric value outside the declared bounds
    OutOfRange,
    /// String length outside the declared bounds
    LengthOutOfRange,
    /// String not in the declared allowed set
    NotInEnumSet,
}

impl MismatchReason {
    /// Returns the string code for this reason
    pub fn code(&self) -> &'static str {
        match self {
            MismatchReason::WrongKind => "WRONG_KIND",
            MismatchReason::OutOfRange => "OUT_OF_RANGE",
            MismatchReason::LengthOutOfRange => "LENGTH_OUT_OF_RANGE",
            MismatchReason::NotInEnumSet => "NOT_IN_ENUM_SET",
        }
    }
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error with code, message and the path of the offending field.
///
/// `field_path` is empty unless the failure belongs to one declared field.
/// Nested records compose dotted paths such as `address.zip`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct SchemaError {
    kind: ErrorKind,
    message: String,
    field_path: String,
    reason: Option<MismatchReason>,
}

impl SchemaError {
    /// Create an error with no field attribution
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_path: String::new(),
            reason: None,
        }
    }

    /// Create a required-field-missing error
    pub fn field_missing(field: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::FieldMissing,
            message: "Required field missing".into(),
            field_path: field.into(),
            reason: None,
        }
    }

    /// Create a type mismatch error with its finer reason
    pub fn mismatch(
        reason: MismatchReason,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            message: message.into(),
            field_path: field.into(),
            reason: Some(reason),
        }
    }

    /// Create a parse failure error
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidJson, message)
    }

    /// Create a buffer overflow error
    pub fn buffer_overflow(needed: usize, capacity: usize) -> Self {
        Self::new(
            ErrorKind::BufferOverflow,
            format!("Document needs {} bytes, capacity is {}", needed, capacity),
        )
    }

    /// Re-scope this error under a parent field.
    ///
    /// `zip` inside `address` becomes `address.zip`. An unattributed error
    /// is attributed to the parent itself.
    pub fn within(mut self, parent: &str) -> Self {
        self.field_path = if self.field_path.is_empty() {
            parent.to_string()
        } else {
            format!("{}.{}", parent, self.field_path)
        };
        self
    }

    /// Returns the error code
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the mismatch classification, if this is a `TypeMismatch`
    pub fn reason(&self) -> Option<MismatchReason> {
        self.reason
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the dotted field path, empty when unattributed
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    fn render(&self) -> String {
        if self.kind == ErrorKind::Success {
            return "Success".into();
        }
        let mut out = format!("Error: {}", self.kind.label());
        if !self.message.is_empty() {
            out.push_str(": ");
            out.push_str(&self.message);
        }
        if !self.field_path.is_empty() {
            out.push_str(" (field: ");
            out.push_str(&self.field_path);
            out.push(')');
        }
        out
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
