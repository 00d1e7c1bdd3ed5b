//! Record, enumeration and field type declarations.
//!
//! A [`RecordDecl`] is the shape the transcoder walks: an ordered list of fields, each
//! with a declared [`TypeDecl`] and [`FieldOptions`]. Declarations are built once,
//! validated when built, and shared behind an [`Arc`].
//!
//! Declarations can be written by hand with [`RecordDecl::builder`] or generated for a
//! Rust struct by the [`record!`](crate::record) macro.
//!
//! Record declarations must form an acyclic graph: a record may not contain itself,
//! directly or through other records.
//!
//! ## Examples
//!
//! ```rust
//! use recmarshal::{FieldOptions, RecordDecl, TypeDecl};
//!
//! let item = RecordDecl::builder("Item")
//!     .field_with("first_key", TypeDecl::String, FieldOptions::new().rename("firstKey"))
//!     .field_with(
//!         "note",
//!         TypeDecl::nullable(TypeDecl::String),
//!         FieldOptions::new().omit_empty(),
//!     )
//!     .field("count", TypeDecl::int())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(item.fields().len(), 3);
//! assert_eq!(item.fields()[0].document_key(), "firstKey");
//! ```

use crate::error::{Error, Result};
use crate::resolve;
use std::fmt;
use std::sync::Arc;

/// Width of a declared integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
}

impl IntWidth {
    /// Inclusive bounds of the width.
    #[must_use]
    pub const fn bounds(&self) -> (i64, i64) {
        match self {
            IntWidth::I8 => (i8::MIN as i64, i8::MAX as i64),
            IntWidth::I16 => (i16::MIN as i64, i16::MAX as i64),
            IntWidth::I32 => (i32::MIN as i64, i32::MAX as i64),
            IntWidth::I64 => (i64::MIN, i64::MAX),
            IntWidth::U8 => (0, u8::MAX as i64),
            IntWidth::U16 => (0, u16::MAX as i64),
            IntWidth::U32 => (0, u32::MAX as i64),
        }
    }

    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
        }
    }
}

/// The declared type of a field (or of a root value).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    Null,
    Bool,
    Integer(IntWidth),
    Float,
    String,
    Date,
    DateTime,
    /// A UUID.
    Identifier,
    /// A value that may be absent.
    Nullable(Box<TypeDecl>),
    Sequence(Box<TypeDecl>),
    /// Only string keys have a document representation.
    Mapping {
        key: Box<TypeDecl>,
        value: Box<TypeDecl>,
    },
    Record(Arc<RecordDecl>),
    Enum(Arc<EnumDecl>),
    Union(Vec<TypeDecl>),
    Tuple(Vec<TypeDecl>),
    /// A type with no known conversion, by name.
    Opaque(String),
}

impl TypeDecl {
    /// A 64-bit signed integer.
    #[must_use]
    pub fn int() -> Self {
        TypeDecl::Integer(IntWidth::I64)
    }

    #[must_use]
    pub fn nullable(inner: TypeDecl) -> Self {
        TypeDecl::Nullable(Box::new(inner))
    }

    #[must_use]
    pub fn sequence(element: TypeDecl) -> Self {
        TypeDecl::Sequence(Box::new(element))
    }

    /// A mapping from string keys to `value`.
    #[must_use]
    pub fn mapping(value: TypeDecl) -> Self {
        TypeDecl::Mapping {
            key: Box::new(TypeDecl::String),
            value: Box::new(value),
        }
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDecl::Null => f.write_str("null"),
            TypeDecl::Bool => f.write_str("bool"),
            TypeDecl::Integer(width) => f.write_str(width.name()),
            TypeDecl::Float => f.write_str("float"),
            TypeDecl::String => f.write_str("string"),
            TypeDecl::Date => f.write_str("date"),
            TypeDecl::DateTime => f.write_str("datetime"),
            TypeDecl::Identifier => f.write_str("uuid"),
            TypeDecl::Nullable(inner) => write!(f, "Optional<{}>", inner),
            TypeDecl::Sequence(inner) => write!(f, "Sequence<{}>", inner),
            TypeDecl::Mapping { key, value } => write!(f, "Mapping<{}, {}>", key, value),
            TypeDecl::Record(decl) => write!(f, "record {}", decl.name()),
            TypeDecl::Enum(decl) => write!(f, "enum {}", decl.name()),
            TypeDecl::Union(alternatives) => {
                f.write_str("Union<")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                f.write_str(">")
            }
            TypeDecl::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            TypeDecl::Opaque(name) => f.write_str(name),
        }
    }
}

/// A value of a field option given in tag form, see [`RecordDeclBuilder::field_tagged`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// Per-field metadata: an optional document key override and the omit-if-empty flag.
///
/// `omitempty` is only accepted on fields whose type admits absence (optional wrappers,
/// nullable unions); declaring it on a required field is a configuration error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    pub json: Option<String>,
    pub omitempty: bool,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `key` as the document key instead of the field name.
    #[must_use]
    pub fn rename(mut self, key: impl Into<String>) -> Self {
        self.json = Some(key.into());
        self
    }

    /// Leaves the key out of marshalled output when the value is absent.
    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omitempty = true;
        self
    }

    /// Reads options from `(name, value)` pairs.
    ///
    /// Exactly two names are recognised: `json` (a string) and `omitempty` (a bool).
    fn from_tags(tags: &[(&str, OptionValue)]) -> std::result::Result<Self, String> {
        let mut options = FieldOptions::new();
        for (name, value) in tags {
            match (*name, value) {
                ("json", OptionValue::Str(key)) if key.is_empty() => {
                    return Err("option `json` must not be empty".to_string())
                }
                ("json", OptionValue::Str(key)) => options.json = Some(key.clone()),
                ("omitempty", OptionValue::Bool(flag)) => options.omitempty = *flag,
                ("json", OptionValue::Bool(_)) => {
                    return Err("option `json` expects a string".to_string())
                }
                ("omitempty", OptionValue::Str(_)) => {
                    return Err("option `omitempty` expects a bool".to_string())
                }
                (other, _) => return Err(format!("unrecognized field option `{}`", other)),
            }
        }
        Ok(options)
    }
}

/// One field of a record declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    name: String,
    declared_type: TypeDecl,
    options: FieldOptions,
    document_key: String,
}

impl FieldDecl {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn declared_type(&self) -> &TypeDecl {
        &self.declared_type
    }

    #[must_use]
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// The key this field is read from and written to.
    #[must_use]
    pub fn document_key(&self) -> &str {
        &self.document_key
    }
}

/// A named, ordered record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    name: String,
    fields: Vec<FieldDecl>,
}

impl RecordDecl {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RecordDeclBuilder {
        RecordDeclBuilder {
            name: name.into(),
            fields: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Builder returned by [`RecordDecl::builder`].
///
/// Option errors are held until [`build`](RecordDeclBuilder::build), which reports the
/// first one.
#[derive(Debug)]
pub struct RecordDeclBuilder {
    name: String,
    fields: Vec<FieldDecl>,
    error: Option<Error>,
}

impl RecordDeclBuilder {
    /// Adds a field with default options.
    #[must_use]
    pub fn field(self, name: impl Into<String>, declared_type: TypeDecl) -> Self {
        self.field_with(name, declared_type, FieldOptions::default())
    }

    #[must_use]
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        declared_type: TypeDecl,
        options: FieldOptions,
    ) -> Self {
        let name = name.into();
        let document_key = resolve::document_key(&name, &options);
        self.fields.push(FieldDecl {
            name,
            declared_type,
            options,
            document_key,
        });
        self
    }

    /// Adds a field whose options are given as `(name, value)` pairs, the form used by the
    /// [`record!`](crate::record) macro.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::{ErrorKind, OptionValue, RecordDecl, TypeDecl};
    ///
    /// let err = RecordDecl::builder("Item")
    ///     .field_tagged("id", TypeDecl::String, &[("rename", OptionValue::from("ID"))])
    ///     .build()
    ///     .unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    #[must_use]
    pub fn field_tagged(
        mut self,
        name: impl Into<String>,
        declared_type: TypeDecl,
        tags: &[(&str, OptionValue)],
    ) -> Self {
        let name = name.into();
        match FieldOptions::from_tags(tags) {
            Ok(options) => self.field_with(name, declared_type, options),
            Err(msg) => {
                if self.error.is_none() {
                    self.error = Some(Error::configuration(
                        &self.name,
                        format!("field `{}`: {}", name, msg),
                    ));
                }
                self
            }
        }
    }

    /// Validates and freezes the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for unrecognized options, duplicate field names,
    /// duplicate document keys, or `omitempty` on a field that cannot be absent.
    pub fn build(self) -> Result<Arc<RecordDecl>> {
        if let Some(error) = self.error {
            tracing::debug!(record = %self.name, %error, "rejected record declaration");
            return Err(error);
        }
        let decl = RecordDecl {
            name: self.name,
            fields: self.fields,
        };
        if let Err(error) = resolve::validate(&decl) {
            tracing::debug!(record = %decl.name, %error, "rejected record declaration");
            return Err(error);
        }
        tracing::debug!(record = %decl.name, fields = decl.fields.len(), "built record declaration");
        Ok(Arc::new(decl))
    }
}

/// A string-valued enumeration: its name and the set of valid labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    name: String,
    variants: Vec<String>,
}

impl EnumDecl {
    /// Declares an enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a label is declared twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recmarshal::EnumDecl;
    ///
    /// let color = EnumDecl::new("Color", &["RED", "GREEN"]).unwrap();
    /// assert!(color.contains("RED"));
    /// assert!(!color.contains("red"));
    /// assert!(EnumDecl::new("Color", &["RED", "RED"]).is_err());
    /// ```
    pub fn new(name: impl Into<String>, variants: &[&str]) -> Result<Arc<EnumDecl>> {
        let name = name.into();
        let mut labels: Vec<String> = Vec::with_capacity(variants.len());
        for variant in variants {
            if labels.iter().any(|label| label == variant) {
                return Err(Error::configuration(
                    &name,
                    format!("variant label `{}` declared twice", variant),
                ));
            }
            labels.push((*variant).to_string());
        }
        Ok(Arc::new(EnumDecl {
            name,
            variants: labels,
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Case-sensitive label lookup.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.variants.iter().any(|variant| variant == label)
    }
}
