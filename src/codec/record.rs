//! Record and field capabilities
//!
//! A record type is declared once with [`record!`](crate::record) and gets
//! its schema, field extraction and field population from that single
//! declaration. Field kinds are resolved statically through
//! [`FieldValue::KIND`]; a field whose type is itself a record resolves to
//! `Object` and is recursed into.

use serde_json::{Map, Value};

use super::Codec;
use crate::schema::{
    json_type_name, FieldType, MismatchReason, Schema, SchemaDescription, SchemaError,
    SchemaResult, SchemaValidator,
};

/// Associative node of the generic value model
pub type Object = Map<String, Value>;

/// A type that can sit in a record field.
pub trait FieldValue: Sized {
    /// Semantic type this Rust type resolves to
    const KIND: FieldType;

    /// Convert to a generic value
    fn to_value(&self) -> Value;

    /// Convert from a generic value.
    ///
    /// Errors carry no field path; the caller scopes them under the field
    /// name.
    fn from_value(value: &Value) -> SchemaResult<Self>;
}

/// A record type with a declared schema.
///
/// Implemented by [`record!`](crate::record). The provided methods are the
/// public surface; each comes in a `Result` form and a convenience form
/// that swallows the error.
pub trait Record: Default + Sized {
    /// Record type name
    const NAME: &'static str;

    /// Schema, built once per type and cached
    fn schema() -> &'static Schema;

    /// Write every declared field, in order, into a fresh object.
    /// Performs no validation.
    fn to_object(&self) -> Object;

    /// Populate a default instance from an object assumed to have passed
    /// validation. Nested records validate themselves.
    fn populate(obj: &Object) -> SchemaResult<Self>;

    /// Tooling description of the schema
    fn describe() -> SchemaDescription {
        SchemaDescription::of(Self::schema())
    }

    /// Validate an object against this record's schema
    fn validate_object(obj: &Object) -> SchemaResult<()> {
        SchemaValidator::new(Self::schema()).validate_object(obj)
    }

    /// Parse and validate text without building a record
    fn validate_str(text: &str) -> SchemaResult<()> {
        Codec::global().validate_str::<Self>(text)
    }

    /// Validate this instance's current field values
    fn validate_self(&self) -> SchemaResult<()> {
        Self::validate_object(&self.to_object())
    }

    /// Validate an already-parsed object, then populate a record from it
    fn from_object(obj: &Object) -> SchemaResult<Self> {
        Self::validate_object(obj)?;
        Self::populate(obj)
    }

    /// Render to text with the process-default codec
    fn serialize_with_result(&self) -> SchemaResult<String> {
        Codec::global().serialize(self)
    }

    /// Render to text, `"{}"` on failure
    fn serialize(&self) -> String {
        self.serialize_with_result()
            .unwrap_or_else(|_| String::from("{}"))
    }

    /// Parse, validate and populate with the process-default codec
    fn deserialize_with_result(text: &str) -> SchemaResult<Self> {
        Codec::global().deserialize(text)
    }

    /// Parse, validate and populate; `Self::default()` on failure
    fn deserialize(text: &str) -> Self {
        Self::deserialize_with_result(text).unwrap_or_default()
    }
}

/// Read one declared field for [`Record::populate`].
///
/// Absent fields yield `None` so the default stays in place. A conversion
/// failure on an unvalidated field also yields `None`; on a validated
/// field it is returned, scoped under `name`.
#[doc(hidden)]
pub fn read_field<T: FieldValue>(
    obj: &Object,
    schema: &Schema,
    name: &str,
) -> SchemaResult<Option<T>> {
    let Some(value) = obj.get(name) else {
        return Ok(None);
    };
    let validated = schema.field(name).map_or(true, |f| f.meta.validate);

    match T::from_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(_) if !validated => Ok(None),
        Err(err) => Err(err.within(name)),
    }
}

/// Wrong-kind error for a value that does not convert to `expected`
#[doc(hidden)]
pub fn wrong_kind(expected: FieldType, actual: &Value) -> SchemaError {
    SchemaError::mismatch(
        MismatchReason::WrongKind,
        "",
        format!(
            "Expected {}, got {}",
            expected.type_name(),
            json_type_name(actual)
        ),
    )
}

macro_rules! int_field {
    ($($t:ty),* $(,)?) => {$(
        impl FieldValue for $t {
            const KIND: FieldType = FieldType::Int;

            fn to_value(&self) -> Value {
                Value::from(*self)
            }

            fn from_value(value: &Value) -> SchemaResult<Self> {
                let converted = if let Some(i) = value.as_i64() {
                    <$t>::try_from(i).ok()
                } else if let Some(u) = value.as_u64() {
                    <$t>::try_from(u).ok()
                } else {
                    return Err(wrong_kind(FieldType::Int, value));
                };
                converted.ok_or_else(|| {
                    SchemaError::mismatch(
                        MismatchReason::OutOfRange,
                        "",
                        concat!("Value does not fit ", stringify!($t)),
                    )
                })
            }
        }
    )*};
}

int_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    const KIND: FieldType = FieldType::Float;

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: &Value) -> SchemaResult<Self> {
        value
            .as_f64()
            .ok_or_else(|| wrong_kind(FieldType::Float, value))
    }
}

impl FieldValue for f32 {
    const KIND: FieldType = FieldType::Float;

    // Widen through the shortest decimal form so 0.1f32 stays 0.1
    fn to_value(&self) -> Value {
        let widened = self
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(*self));
        Value::from(widened)
    }

    fn from_value(value: &Value) -> SchemaResult<Self> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| wrong_kind(FieldType::Float, value))
    }
}

impl FieldValue for bool {
    const KIND: FieldType = FieldType::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> SchemaResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| wrong_kind(FieldType::Bool, value))
    }
}

impl FieldValue for String {
    const KIND: FieldType = FieldType::String;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> SchemaResult<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| wrong_kind(FieldType::String, value))
    }
}

// Raw generic values have no mapping and pass through unchecked
impl FieldValue for Value {
    const KIND: FieldType = FieldType::Unknown;

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> SchemaResult<Self> {
        Ok(value.clone())
    }
}

/// Declare a record type.
///
/// Each field is `name: Type => meta`, where `meta` is a
/// [`FieldMeta`](crate::schema::FieldMeta) expression. Declaration order is
/// schema order, validation order and output key order.
///
/// ```
/// use structa::record;
/// use structa::codec::Record;
/// use structa::schema::FieldMeta;
///
/// record! {
///     pub struct Address {
///         pub city: String => FieldMeta::none(),
///         pub zip: i32 => FieldMeta::none(),
///     }
/// }
///
/// record! {
///     pub struct User {
///         pub username: String => FieldMeta::strlen(3, 15),
///         pub age: i32 => FieldMeta::range(18.0, 100.0),
///         pub address: Address => FieldMeta::optional(),
///     }
/// }
///
/// let user = User::deserialize(r#"{"username":"alice","age":30}"#);
/// assert_eq!(user.age, 30);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $field:ident : $ty:ty => $meta:expr
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fattr])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::codec::Record for $name {
            const NAME: &'static str = stringify!($name);

            fn schema() -> &'static $crate::schema::Schema {
                static SCHEMA: ::std::sync::OnceLock<$crate::schema::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::schema::Schema::new(
                        stringify!($name),
                        vec![$(
                            $crate::schema::FieldSchema::new(
                                stringify!($field),
                                <$ty as $crate::codec::FieldValue>::KIND,
                                $meta,
                            ),
                        )*],
                    )
                })
            }

            fn to_object(&self) -> $crate::codec::Object {
                #[allow(unused_mut)]
                let mut obj = $crate::codec::Object::new();
                $(
                    obj.insert(
                        ::std::string::String::from(stringify!($field)),
                        $crate::codec::FieldValue::to_value(&self.$field),
                    );
                )*
                obj
            }

            #[allow(unused_variables)]
            fn populate(
                obj: &$crate::codec::Object,
            ) -> $crate::schema::SchemaResult<Self> {
                let schema = <Self as $crate::codec::Record>::schema();
                #[allow(unused_mut)]
                let mut record = <Self as ::std::default::Default>::default();
                $(
                    if let Some(value) =
                        $crate::codec::read_field::<$ty>(obj, schema, stringify!($field))?
                    {
                        record.$field = value;
                    }
                )*
                Ok(record)
            }
        }

        impl $crate::codec::FieldValue for $name {
            const KIND: $crate::schema::FieldType = $crate::schema::FieldType::Object;

            fn to_value(&self) -> $crate::codec::Value {
                $crate::codec::Value::Object(
                    <Self as $crate::codec::Record>::to_object(self),
                )
            }

            fn from_value(
                value: &$crate::codec::Value,
            ) -> $crate::schema::SchemaResult<Self> {
                match value.as_object() {
                    Some(obj) => <Self as $crate::codec::Record>::from_object(obj),
                    None => Err($crate::codec::wrong_kind(
                        $crate::schema::FieldType::Object,
                        value,
                    )),
                }
            }
        }
    };
}
