//! The bridge between Rust types and declared types.
//!
//! A [`Transcode`] type knows its [`TypeDecl`] and converts itself to and from a
//! [`FieldValue`]. The engine validates a document against the declared type first, so
//! `from_field_value` only ever sees values of the right shape when called through
//! [`unmarshal`](crate::unmarshal).
//!
//! Implementations are provided for the primitives, `chrono` dates and date-times,
//! [`Uuid`], `Option<T>`, `Vec<T>` and string-keyed maps. Structs and string enums get
//! theirs from [`record!`](crate::record) and [`string_enum!`](crate::string_enum).

use crate::error::{Error, Result};
use crate::instance::{FieldMap, FieldValue};
use crate::path::FieldPath;
use crate::schema::{IntWidth, TypeDecl};
use crate::temporal::Timestamp;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// A Rust type with a declared document shape.
pub trait Transcode: Sized {
    /// The declared type of `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the declaration of `Self`, or of a type it
    /// contains, is invalid.
    fn declared_type() -> Result<TypeDecl>;

    fn to_field_value(&self) -> FieldValue;

    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `value` does not have the shape of `Self`.
    fn from_field_value(value: FieldValue) -> Result<Self>;
}

fn mismatch<T>(expected: impl std::fmt::Display, found: &FieldValue) -> Result<T> {
    Err(Error::type_mismatch(
        FieldPath::root(),
        expected,
        found.kind_name(),
    ))
}

impl Transcode for () {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Null)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Null
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Null => Ok(()),
            other => mismatch("null", &other),
        }
    }
}

impl Transcode for bool {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Bool)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => mismatch("bool", &other),
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl Transcode for $ty {
                fn declared_type() -> Result<TypeDecl> {
                    Ok(TypeDecl::Integer($width))
                }

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(i64::from(*self))
                }

                fn from_field_value(value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::Int(i) => <$ty>::try_from(i).map_err(|_| {
                            Error::type_mismatch(
                                FieldPath::root(),
                                $width.name(),
                                format_args!("out of range integer {}", i),
                            )
                        }),
                        other => mismatch($width.name(), &other),
                    }
                }
            }
        )*
    };
}

impl_integer! {
    i8 => IntWidth::I8,
    i16 => IntWidth::I16,
    i32 => IntWidth::I32,
    i64 => IntWidth::I64,
    u8 => IntWidth::U8,
    u16 => IntWidth::U16,
    u32 => IntWidth::U32,
}

impl Transcode for f64 {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Float)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Float(f) => Ok(f),
            FieldValue::Int(i) => Ok(i as f64),
            other => mismatch("float", &other),
        }
    }
}

impl Transcode for f32 {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Float)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }

    /// Finite doubles outside the `f32` range are rejected rather than narrowed to infinity.
    fn from_field_value(value: FieldValue) -> Result<Self> {
        let wide = f64::from_field_value(value)?;
        let narrow = wide as f32;
        if narrow.is_infinite() && wide.is_finite() {
            return Err(Error::type_mismatch(
                FieldPath::root(),
                "f32",
                format_args!("out of range float {}", wide),
            ));
        }
        Ok(narrow)
    }
}

impl Transcode for String {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::String)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::String(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }
}

impl Transcode for NaiveDate {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Date)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Date(date) => Ok(date),
            other => mismatch("date", &other),
        }
    }
}

impl Transcode for NaiveDateTime {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::DateTime)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(Timestamp::Naive(*self))
    }

    /// Offset-carrying input is converted to UTC before the offset is dropped.
    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::DateTime(Timestamp::Naive(at)) => Ok(at),
            FieldValue::DateTime(Timestamp::Offset(at)) => Ok(at.naive_utc()),
            other => mismatch("datetime", &other),
        }
    }
}

impl Transcode for DateTime<Utc> {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::DateTime)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(Timestamp::Offset((*self).into()))
    }

    /// Offset-less input is read as UTC.
    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::DateTime(Timestamp::Offset(at)) => Ok(at.with_timezone(&Utc)),
            FieldValue::DateTime(Timestamp::Naive(at)) => Ok(Utc.from_utc_datetime(&at)),
            other => mismatch("datetime", &other),
        }
    }
}

impl Transcode for DateTime<FixedOffset> {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::DateTime)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(Timestamp::Offset(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::DateTime(Timestamp::Offset(at)) => Ok(at),
            FieldValue::DateTime(Timestamp::Naive(at)) => {
                Ok(Utc.from_utc_datetime(&at).into())
            }
            other => mismatch("datetime", &other),
        }
    }
}

impl Transcode for Uuid {
    fn declared_type() -> Result<TypeDecl> {
        Ok(TypeDecl::Identifier)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Identifier(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Identifier(id) => Ok(id),
            other => mismatch("uuid", &other),
        }
    }
}

impl<T: Transcode> Transcode for Option<T> {
    fn declared_type() -> Result<TypeDecl> {
        T::declared_type().map(TypeDecl::nullable)
    }

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Null => Ok(None),
            present => T::from_field_value(present).map(Some),
        }
    }
}

impl<T: Transcode> Transcode for Vec<T> {
    fn declared_type() -> Result<TypeDecl> {
        T::declared_type().map(TypeDecl::sequence)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Sequence(self.iter().map(Transcode::to_field_value).collect())
    }

    fn from_field_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Sequence(items) => items.into_iter().map(T::from_field_value).collect(),
            other => mismatch("sequence", &other),
        }
    }
}

fn mapping_entries(value: FieldValue) -> Result<FieldMap> {
    match value {
        FieldValue::Mapping(entries) => Ok(entries),
        other => mismatch("mapping", &other),
    }
}

macro_rules! impl_mapping {
    ($($map:ident),* $(,)?) => {
        $(
            impl<T: Transcode> Transcode for $map<String, T> {
                fn declared_type() -> Result<TypeDecl> {
                    T::declared_type().map(TypeDecl::mapping)
                }

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Mapping(
                        self.iter()
                            .map(|(key, value)| (key.clone(), value.to_field_value()))
                            .collect(),
                    )
                }

                fn from_field_value(value: FieldValue) -> Result<Self> {
                    mapping_entries(value)?
                        .into_iter()
                        .map(|(key, value)| T::from_field_value(value).map(|v| (key, v)))
                        .collect()
                }
            }
        )*
    };
}

impl_mapping!(HashMap, BTreeMap, IndexMap);
