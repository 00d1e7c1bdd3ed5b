//! Typed record instances.
//!
//! [`FieldValue`] is the strongly-typed side of a conversion: it distinguishes dates,
//! date-times, identifiers and enum labels, which all look like strings in a
//! [`Document`](crate::Document). [`RecordValue`] is one instance of a
//! [`RecordDecl`](crate::RecordDecl), keyed by field name.

use crate::error::{Error, Result};
use crate::path::FieldPath;
use crate::temporal::Timestamp;
use chrono::NaiveDate;
use indexmap::IndexMap;
use uuid::Uuid;

/// Field values keyed by name, in insertion order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// A typed value inside a record instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// An absent optional value.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(Timestamp),
    Identifier(Uuid),
    /// An enumeration variant, by label.
    Enum(String),
    Sequence(Vec<FieldValue>),
    Mapping(FieldMap),
    Record(RecordValue),
}

impl FieldValue {
    /// Name of this value's shape, as used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Identifier(_) => "uuid",
            FieldValue::Enum(_) => "enum label",
            FieldValue::Sequence(_) => "sequence",
            FieldValue::Mapping(_) => "mapping",
            FieldValue::Record(_) => "record",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Unwraps a record instance, for converting into the Rust type named `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is not a record.
    pub fn into_record(self, expected: &str) -> Result<RecordValue> {
        match self {
            FieldValue::Record(record) => Ok(record),
            other => Err(Error::type_mismatch(
                FieldPath::root(),
                format_args!("record {}", expected),
                other.kind_name(),
            )),
        }
    }
}

impl From<RecordValue> for FieldValue {
    fn from(value: RecordValue) -> Self {
        FieldValue::Record(value)
    }
}

/// One record instance.
///
/// # Examples
///
/// ```rust
/// use recmarshal::{FieldValue, RecordValue};
///
/// let record = RecordValue::new("Item")
///     .with_field("first_key", FieldValue::String("a".to_string()))
///     .with_field("count", FieldValue::Int(3));
///
/// assert_eq!(record.get("count"), Some(&FieldValue::Int(3)));
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordValue {
    name: String,
    fields: FieldMap,
}

impl RecordValue {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        RecordValue {
            name: name.into(),
            fields: FieldMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(field.into(), value)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Removes `field` and returns it, or [`FieldValue::Null`] if it was not set.
    pub fn take(&mut self, field: &str) -> FieldValue {
        self.fields.shift_remove(field).unwrap_or_default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}
