//! # recmarshal
//!
//! Declaration-driven conversion between strongly-typed records and a dynamic document
//! tree.
//!
//! A record is described once, by a [`RecordDecl`] listing its fields in order with a
//! declared [`TypeDecl`] and optional [`FieldOptions`] (a document key override and an
//! omit-if-empty flag). The engine then walks the declaration alongside a value:
//!
//! - **marshal**: typed record → [`Document`] (mappings, sequences, strings, numbers,
//!   booleans, null)
//! - **unmarshal**: [`Document`] + declaration → validated typed record
//!
//! Dates and date-times become strings through configurable strftime patterns, UUIDs
//! become their hyphenated form, enums become their labels. Every failure reports the
//! path of the offending value, such as `items[0].createdAt`.
//!
//! Text is not this crate's concern: [`Document`] implements serde's `Serialize` and
//! `Deserialize`, so `serde_json` (or any serde format) handles the bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recmarshal::{doc, marshal, record, string_enum, unmarshal};
//!
//! string_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq)]
//!     pub enum Color {
//!         Red => "RED",
//!         Green => "GREEN",
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Item {
//!         pub first_key: String => { json: "firstKey" },
//!         pub color: Color,
//!         pub created: NaiveDate,
//!         pub note: Option<String> => { omitempty: true },
//!     }
//! }
//!
//! let item = Item {
//!     first_key: "a".to_string(),
//!     color: Color::Red,
//!     created: NaiveDate::from_ymd_opt(2020, 5, 14).unwrap(),
//!     note: None,
//! };
//!
//! let document = marshal(&item).unwrap();
//! assert_eq!(
//!     document,
//!     doc!({ "firstKey": "a", "color": "RED", "created": "2020-05-14" })
//! );
//!
//! let back: Item = unmarshal(&document).unwrap();
//! assert_eq!(back, item);
//! ```
//!
//! ### Declarations without macros
//!
//! ```rust
//! use recmarshal::{
//!     doc, unmarshal_value, ConversionOptions, ErrorKind, FieldOptions, RecordDecl, TypeDecl,
//! };
//!
//! let item = RecordDecl::builder("Item")
//!     .field_with("created_at", TypeDecl::DateTime, FieldOptions::new().rename("createdAt"))
//!     .build()
//!     .unwrap();
//! let order = RecordDecl::builder("Order")
//!     .field("items", TypeDecl::sequence(TypeDecl::Record(item)))
//!     .build()
//!     .unwrap();
//!
//! let err = unmarshal_value(
//!     &doc!({ "items": [{ "createdAt": "bad" }] }),
//!     &TypeDecl::Record(order),
//!     &ConversionOptions::default(),
//! )
//! .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidTemporal);
//! assert_eq!(err.path().unwrap().to_string(), "items[0].createdAt");
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber. Each top-level call
//! emits a `debug` event; ignored document keys are reported at `trace`.

pub mod classify;
pub mod error;
pub mod instance;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod resolve;
pub mod schema;
pub mod temporal;
pub mod transcode;
pub mod typed;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use instance::{FieldMap, FieldValue, RecordValue};
pub use map::DocumentMap;
pub use options::ConversionOptions;
pub use path::{FieldPath, PathSegment};
pub use schema::{
    EnumDecl, FieldDecl, FieldOptions, IntWidth, OptionValue, RecordDecl, RecordDeclBuilder,
    TypeDecl,
};
pub use temporal::Timestamp;
pub use transcode::Transcoder;
pub use typed::Transcode;
pub use value::{Document, Number};

/// Marshals any `T: Transcode` to a [`Document`] with default options.
///
/// # Errors
///
/// Returns an error if the declaration of `T` is invalid or a value cannot be converted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal<T: Transcode>(value: &T) -> Result<Document> {
    marshal_with_options(value, &ConversionOptions::default())
}

/// Marshals any `T: Transcode` to a [`Document`] with custom temporal patterns.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use recmarshal::{marshal_with_options, ConversionOptions, Document};
///
/// let at = NaiveDate::from_ymd_opt(2020, 6, 11).unwrap().and_hms_opt(14, 32, 0).unwrap();
/// let options = ConversionOptions::new().with_datetime_pattern("%d %b %Y %H:%M");
/// assert_eq!(
///     marshal_with_options(&at, &options).unwrap(),
///     Document::from("11 Jun 2020 14:32")
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Configuration`] for an invalid pattern, otherwise the first
/// conversion failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal_with_options<T: Transcode>(
    value: &T,
    options: &ConversionOptions,
) -> Result<Document> {
    let declared = T::declared_type()?;
    marshal_value(&value.to_field_value(), &declared, options)
}

/// Unmarshals a [`Document`] into any `T: Transcode` with default options.
///
/// # Examples
///
/// ```rust
/// use recmarshal::{doc, unmarshal};
/// use std::collections::HashMap;
///
/// let counts: HashMap<String, u32> = unmarshal(&doc!({ "a": 1, "b": 2 })).unwrap();
/// assert_eq!(counts["b"], 2);
/// ```
///
/// # Errors
///
/// Returns the first conversion failure, with the path of the offending value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal<T: Transcode>(document: &Document) -> Result<T> {
    unmarshal_with_options(document, &ConversionOptions::default())
}

/// Unmarshals a [`Document`] into any `T: Transcode` with custom temporal patterns.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for an invalid pattern, otherwise the first
/// conversion failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal_with_options<T: Transcode>(
    document: &Document,
    options: &ConversionOptions,
) -> Result<T> {
    let declared = T::declared_type()?;
    let value = unmarshal_value(document, &declared, options)?;
    T::from_field_value(value)
}

/// Marshals a dynamically typed value against an explicit declaration.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for an invalid pattern, otherwise the first
/// conversion failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn marshal_value(
    value: &FieldValue,
    declared: &TypeDecl,
    options: &ConversionOptions,
) -> Result<Document> {
    options.validate()?;
    tracing::debug!(target_type = %declared, "marshalling value");
    Transcoder::new(options).marshal(value, declared)
}

/// Unmarshals a document against an explicit declaration.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for an invalid pattern, otherwise the first
/// conversion failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unmarshal_value(
    document: &Document,
    declared: &TypeDecl,
    options: &ConversionOptions,
) -> Result<FieldValue> {
    options.validate()?;
    tracing::debug!(target_type = %declared, "unmarshalling document");
    Transcoder::new(options).unmarshal(document, declared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }
    }

    record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Shape {
            name: String => { json: "shapeName" },
            points: Vec<Point>,
            created: Option<NaiveDate> => { omitempty: true },
        }
    }

    fn shape() -> Shape {
        Shape {
            name: "triangle".to_string(),
            points: vec![Point { x: 0, y: 0 }, Point { x: 3, y: 4 }],
            created: NaiveDate::from_ymd_opt(2020, 5, 14),
        }
    }

    #[test]
    fn test_marshal_unmarshal_shape() {
        let document = marshal(&shape()).unwrap();
        assert_eq!(
            document,
            doc!({
                "shapeName": "triangle",
                "points": [{ "x": 0, "y": 0 }, { "x": 3, "y": 4 }],
                "created": "2020-05-14"
            })
        );
        let back: Shape = unmarshal(&document).unwrap();
        assert_eq!(back, shape());
    }

    #[test]
    fn test_top_level_sequence() {
        let points = vec![Point { x: 1, y: 2 }];
        let document = marshal(&points).unwrap();
        assert_eq!(document, doc!([{ "x": 1, "y": 2 }]));
        let back: Vec<Point> = unmarshal(&document).unwrap();
        assert_eq!(back, points);
    }

    #[test]
    fn test_invalid_pattern_rejected_before_conversion() {
        let options = ConversionOptions::new().with_date_pattern("%Y-%J");
        let err = marshal_with_options(&shape(), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_custom_date_pattern_round_trip() {
        let options = ConversionOptions::new().with_date_pattern("%d/%m/%Y");
        let document = marshal_with_options(&shape(), &options).unwrap();
        assert_eq!(document.get("created"), Some(&Document::from("14/05/2020")));
        let back: Shape = unmarshal_with_options(&document, &options).unwrap();
        assert_eq!(back, shape());
    }
}
