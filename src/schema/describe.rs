//! Introspectable schema description for tooling
//!
//! Derived from a schema alone, without running validation.

use std::fmt;

use serde::Serialize;

use super::types::{FieldType, Schema};

/// One row of a schema description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    pub name: String,
    pub kind: FieldType,
    pub required: bool,
    pub validated: bool,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allowed_values: Option<Vec<String>>,
}

/// Ordered description of a record's fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescription {
    pub record: String,
    pub fields: Vec<FieldDescription>,
}

impl SchemaDescription {
    /// Describe a schema
    pub fn of(schema: &Schema) -> Self {
        Self {
            record: schema.name.clone(),
            fields: schema
                .fields
                .iter()
                .map(|f| FieldDescription {
                    name: f.name.clone(),
                    kind: f.field_type,
                    required: f.meta.required,
                    validated: f.meta.validate,
                    min_value: f.meta.min_value,
                    max_value: f.meta.max_value,
                    min_length: f.meta.min_length,
                    max_length: f.meta.max_length,
                    allowed_values: f.meta.allowed_values.clone(),
                })
                .collect(),
        }
    }

    /// Render as a JSON document
    pub fn to_json(&self) -> String {
        // Only strings, numbers, bools and options; cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for SchemaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Schema ===", self.record)?;
        for field in &self.fields {
            write!(f, " - {} [{}]", field.name, field.kind.type_name())?;
            if !field.required {
                write!(f, " (optional)")?;
            }
            if !field.validated {
                write!(f, " (unvalidated)")?;
            }
            writeln!(f)?;
        }
        write!(f, "===========================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldMeta, FieldSchema};

    fn schema() -> Schema {
        Schema::new(
            "Device",
            vec![
                FieldSchema::new("deviceId", FieldType::String, FieldMeta::strlen(5, 20)),
                FieldSchema::new("battery", FieldType::Int, FieldMeta::range(0.0, 100.0)),
                FieldSchema::new("online", FieldType::Bool, FieldMeta::none()),
                FieldSchema::new("notes", FieldType::String, FieldMeta::optional_unvalidated()),
            ],
        )
    }

    #[test]
    fn test_description_preserves_order_and_attributes() {
        let desc = SchemaDescription::of(&schema());
        let names: Vec<_> = desc.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["deviceId", "battery", "online", "notes"]);
        assert_eq!(desc.fields[0].max_length, Some(20));
        assert_eq!(desc.fields[1].min_value, Some(0.0));
        assert!(!desc.fields[2].validated);
        assert!(!desc.fields[3].required);
    }

    #[test]
    fn test_display_listing() {
        let listing = SchemaDescription::of(&schema()).to_string();
        assert!(listing.starts_with("=== Device Schema ===\n"));
        assert!(listing.contains(" - battery [int]\n"));
        assert!(listing.contains(" - online [bool] (unvalidated)\n"));
        assert!(listing.contains(" - notes [string] (optional) (unvalidated)\n"));
    }

    #[test]
    fn test_to_json() {
        let json = SchemaDescription::of(&schema()).to_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["record"], "Device");
        assert_eq!(parsed["fields"][1]["kind"], "int");
        assert_eq!(parsed["fields"][1]["max_value"], 100.0);
    }
}
