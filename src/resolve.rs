//! Field metadata resolution.
//!
//! Turns a record declaration into the `(field name, document key, omit-if-empty,
//! declared type)` rows the transcoder walks. Keys are computed once, when the
//! declaration is built; [`resolve`] only borrows them.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::schema::{FieldDecl, FieldOptions, RecordDecl, TypeDecl};
use std::collections::HashSet;

/// The resolved view of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedField<'a> {
    pub field_name: &'a str,
    pub document_key: &'a str,
    pub omit_if_empty: bool,
    pub declared_type: &'a TypeDecl,
}

impl<'a> From<&'a FieldDecl> for ResolvedField<'a> {
    fn from(field: &'a FieldDecl) -> Self {
        ResolvedField {
            field_name: field.name(),
            document_key: field.document_key(),
            omit_if_empty: field.options().omitempty,
            declared_type: field.declared_type(),
        }
    }
}

/// Resolves every field of `decl`, in declaration order.
///
/// # Examples
///
/// ```rust
/// use recmarshal::resolve::resolve;
/// use recmarshal::{FieldOptions, RecordDecl, TypeDecl};
///
/// let decl = RecordDecl::builder("Item")
///     .field_with("first_key", TypeDecl::String, FieldOptions::new().rename("firstKey"))
///     .field("second_key", TypeDecl::Bool)
///     .build()
///     .unwrap();
///
/// let keys: Vec<_> = resolve(&decl).map(|f| f.document_key).collect();
/// assert_eq!(keys, vec!["firstKey", "second_key"]);
/// ```
pub fn resolve(decl: &RecordDecl) -> impl ExactSizeIterator<Item = ResolvedField<'_>> {
    decl.fields().iter().map(ResolvedField::from)
}

/// The document key for a field: the `json` override, or the name verbatim.
#[must_use]
pub fn document_key(field_name: &str, options: &FieldOptions) -> String {
    options
        .json
        .clone()
        .unwrap_or_else(|| field_name.to_string())
}

/// Declaration-time checks, run once by [`RecordDeclBuilder::build`](crate::RecordDeclBuilder::build).
pub(crate) fn validate(decl: &RecordDecl) -> Result<()> {
    let mut names = HashSet::with_capacity(decl.fields().len());
    let mut keys = HashSet::with_capacity(decl.fields().len());

    for field in resolve(decl) {
        if !names.insert(field.field_name) {
            return Err(Error::configuration(
                decl.name(),
                format!("field `{}` declared twice", field.field_name),
            ));
        }
        if !keys.insert(field.document_key) {
            return Err(Error::configuration(
                decl.name(),
                format!(
                    "document key `{}` of field `{}` is already used by another field",
                    field.document_key, field.field_name
                ),
            ));
        }
        if field.omit_if_empty && !classify(field.declared_type).admits_absence() {
            return Err(Error::configuration(
                decl.name(),
                format!(
                    "field `{}` is marked omitempty but its type {} is not optional",
                    field.field_name, field.declared_type
                ),
            ));
        }
    }
    Ok(())
}
