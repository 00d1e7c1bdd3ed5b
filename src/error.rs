//! Error types for marshalling and unmarshalling.
//!
//! Every conversion failure carries the [`FieldPath`] of the value that could not be
//! converted, so a failure deep inside a nested document reads like
//! `items[2].createdAt` instead of an opaque "invalid value".
//!
//! ## Error Categories
//!
//! - **Shape errors**: [`Error::MissingField`] and [`Error::TypeMismatch`]
//! - **Value errors**: [`Error::InvalidEnumValue`], [`Error::InvalidIdentifier`],
//!   [`Error::InvalidTemporal`]
//! - **Declaration errors**: [`Error::UnsupportedType`] (raised lazily, when a value of the
//!   type is actually reached) and [`Error::Configuration`] (raised when a declaration or
//!   an options value is built)
//!
//! Conversion is fail-fast: the first failure is returned and no partial result is kept.
//!
//! ## Examples
//!
//! ```rust
//! use recmarshal::{doc, unmarshal_value, ConversionOptions, ErrorKind, RecordDecl, TypeDecl};
//!
//! let decl = RecordDecl::builder("Item")
//!     .field("second_key", TypeDecl::String)
//!     .build()
//!     .unwrap();
//!
//! let err = unmarshal_value(&doc!({}), &TypeDecl::Record(decl), &ConversionOptions::default())
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingField);
//! assert_eq!(err.path().unwrap().to_string(), "second_key");
//! ```

use crate::path::FieldPath;
use thiserror::Error;

/// Represents all possible errors raised while converting between records and documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required field has no key in the document.
    #[error("missing field at {path}: key `{key}` is not present in the document")]
    MissingField { path: FieldPath, key: String },

    /// The dynamic shape of a value does not match its declared type.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: String,
        found: String,
    },

    /// A string is not one of the declared enumeration labels.
    #[error(
        "invalid enum value at {path}: '{value}' is not a variant of {enum_name} (expected one of {})",
        .variants.join(", ")
    )]
    InvalidEnumValue {
        path: FieldPath,
        value: String,
        enum_name: String,
        variants: Vec<String>,
    },

    /// A string is not a hyphenated UUID.
    #[error("invalid identifier at {path}: '{value}' is not a hyphenated UUID")]
    InvalidIdentifier { path: FieldPath, value: String },

    /// A string does not match the active date or date-time pattern, or a temporal value
    /// cannot be rendered with it.
    #[error("invalid temporal value at {path}: '{value}' does not match `{pattern}`: {reason}")]
    InvalidTemporal {
        path: FieldPath,
        value: String,
        pattern: String,
        reason: String,
    },

    /// The declared type has no defined conversion.
    #[error("unsupported type at {path}: {type_name} has no document representation")]
    UnsupportedType { path: FieldPath, type_name: String },

    /// A declaration or options value is malformed.
    #[error("configuration error in {target}: {msg}")]
    Configuration { target: String, msg: String },
}

/// The kind of an [`Error`], without its payload.
///
/// Handy for matching in callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    InvalidEnumValue,
    InvalidIdentifier,
    InvalidTemporal,
    UnsupportedType,
    Configuration,
}

impl Error {
    /// Creates a missing field error.
    pub fn missing_field(path: FieldPath, key: &str) -> Self {
        Error::MissingField {
            path,
            key: key.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::{Error, FieldPath};
    ///
    /// let err = Error::type_mismatch(FieldPath::root(), "bool", "number");
    /// assert!(err.to_string().contains("expected bool, found number"));
    /// ```
    pub fn type_mismatch(
        path: FieldPath,
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            path,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an invalid enum value error.
    pub fn invalid_enum_value(
        path: FieldPath,
        value: impl Into<String>,
        enum_name: &str,
        variants: Vec<String>,
    ) -> Self {
        Error::InvalidEnumValue {
            path,
            value: value.into(),
            enum_name: enum_name.to_string(),
            variants,
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(path: FieldPath, value: &str) -> Self {
        Error::InvalidIdentifier {
            path,
            value: value.to_string(),
        }
    }

    /// Creates an invalid temporal value error.
    pub fn invalid_temporal(path: FieldPath, value: &str, pattern: &str, reason: &str) -> Self {
        Error::InvalidTemporal {
            path,
            value: value.to_string(),
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(path: FieldPath, type_name: impl std::fmt::Display) -> Self {
        Error::UnsupportedType {
            path,
            type_name: type_name.to_string(),
        }
    }

    /// Creates a configuration error for the named declaration or options value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::{Error, ErrorKind};
    ///
    /// let err = Error::configuration("Item", "duplicate document key `id`");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// assert!(err.path().is_none());
    /// ```
    pub fn configuration(target: &str, msg: impl Into<String>) -> Self {
        Error::Configuration {
            target: target.to_string(),
            msg: msg.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            Error::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Error::InvalidTemporal { .. } => ErrorKind::InvalidTemporal,
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Returns the field path of the failing value.
    ///
    /// Configuration errors are not tied to a value and return `None`.
    #[must_use]
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Error::MissingField { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::InvalidEnumValue { path, .. }
            | Error::InvalidIdentifier { path, .. }
            | Error::InvalidTemporal { path, .. }
            | Error::UnsupportedType { path, .. } => Some(path),
            Error::Configuration { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
