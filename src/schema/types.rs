//! Schema type definitions
//!
//! Supported field types:
//! - int: integral number
//! - float: integral or floating-point number
//! - bool: boolean literal
//! - string: UTF-8 string
//! - object: nested record with its own schema
//! - unknown: no mapping, never checked

use serde::{Deserialize, Serialize};

/// Semantic type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Integral number
    Int,
    /// Floating-point number, integral input accepted
    Float,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Nested record
    Object,
    /// Type with no mapping; validation never matches it
    Unknown,
}

impl FieldType {
    /// Returns the type name for error messages and schema listings
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Object => "object",
            FieldType::Unknown => "unknown",
        }
    }
}

/// Declared constraint set for one field.
///
/// `validate == false` disables every check for the field, required-ness
/// included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Field must be present in input
    #[serde(default = "default_true")]
    pub required: bool,
    /// Whether any check runs at all
    #[serde(default = "default_true")]
    pub validate: bool,
    /// Inclusive lower numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Inclusive upper numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Inclusive lower string length bound, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Inclusive upper string length bound, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Closed set of permitted strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self {
            required: true,
            validate: true,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            allowed_values: None,
        }
    }
}

impl FieldMeta {
    /// Unvalidated field
    pub fn none() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }

    /// Optional field, validated when present
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::default()
        }
    }

    /// Optional field that is never validated
    pub fn optional_unvalidated() -> Self {
        Self {
            required: false,
            validate: false,
            ..Self::default()
        }
    }

    /// Inclusive numeric bounds
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min_value: Some(min),
            max_value: Some(max),
            ..Self::default()
        }
    }

    /// Inclusive string length bounds
    pub fn strlen(min: usize, max: usize) -> Self {
        Self {
            min_length: Some(min),
            max_length: Some(max),
            ..Self::default()
        }
    }

    /// Closed set of allowed strings
    pub fn enum_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Same constraints, but the field may be absent
    pub fn not_required(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    /// Whether `value` is a member of the allowed set (true when unrestricted)
    pub fn allows(&self, value: &str) -> bool {
        match &self.allowed_values {
            Some(values) => values.iter().any(|v| v == value),
            None => true,
        }
    }
}

/// Resolved descriptor of one declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, used verbatim as the object key
    pub name: String,
    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Declared constraints
    #[serde(flatten)]
    pub meta: FieldMeta,
}

impl FieldSchema {
    /// Create a field descriptor
    pub fn new(name: impl Into<String>, field_type: FieldType, meta: FieldMeta) -> Self {
        Self {
            name: name.into(),
            field_type,
            meta,
        }
    }
}

/// Ordered, immutable list of field descriptors for one record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Record type name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    /// Create a schema from fields in declaration order
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_defaults() {
        let meta = FieldMeta::default();
        assert!(meta.required);
        assert!(meta.validate);
        assert!(meta.min_value.is_none());
        assert!(meta.allowed_values.is_none());
    }

    #[test]
    fn test_meta_constructors() {
        assert!(!FieldMeta::none().validate);
        assert!(FieldMeta::none().required);

        let optional = FieldMeta::optional();
        assert!(!optional.required);
        assert!(optional.validate);

        let both = FieldMeta::optional_unvalidated();
        assert!(!both.required);
        assert!(!both.validate);

        let range = FieldMeta::range(18.0, 100.0);
        assert_eq!(range.min_value, Some(18.0));
        assert_eq!(range.max_value, Some(100.0));

        let strlen = FieldMeta::strlen(3, 15);
        assert_eq!(strlen.min_length, Some(3));
        assert_eq!(strlen.max_length, Some(15));
    }

    #[test]
    fn test_enum_membership() {
        let meta = FieldMeta::enum_of(["admin", "user", "guest"]);
        assert!(meta.allows("guest"));
        assert!(!meta.allows("root"));
        assert!(!meta.allows("Admin"));
        assert!(FieldMeta::default().allows("anything"));
    }

    #[test]
    fn test_not_required_keeps_constraints() {
        let meta = FieldMeta::range(0.0, 10.0).not_required();
        assert!(!meta.required);
        assert_eq!(meta.max_value, Some(10.0));
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::new("Empty", Vec::new());
        assert!(schema.is_empty());
        assert!(schema.field("anything").is_none());
    }

    #[test]
    fn test_schema_json_shape() {
        let schema = Schema::new(
            "User",
            vec![FieldSchema::new("age", FieldType::Int, FieldMeta::range(18.0, 100.0))],
        );
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["fields"][0]["type"], "int");
        assert_eq!(json["fields"][0]["min_value"], 18.0);

        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
