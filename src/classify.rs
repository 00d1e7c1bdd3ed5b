//! Type classification.
//!
//! [`classify`] maps a declared type to the conversion rule the transcoder applies.
//! Structural wrappers are recognised first, so the inner type of an optional, sequence
//! or mapping is inspected only by the recursive step that handles it.
//!
//! Unsupported types are not rejected here. They classify as
//! [`Classification::Unsupported`] and only fail when a value of that type is actually
//! converted, so a declaration whose unused fields have exotic types stays usable.

use crate::schema::{EnumDecl, IntWidth, RecordDecl, TypeDecl};
use crate::temporal::TemporalKind;
use crate::value::Document;
use std::fmt;

/// Primitive sub-kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Null,
    Bool,
    Integer(IntWidth),
    Float,
    String,
}

impl PrimitiveKind {
    /// Returns `true` if `document` has the dynamic shape this kind reads from.
    ///
    /// Integers additionally require a whole number inside the declared width.
    #[must_use]
    pub fn accepts(&self, document: &Document) -> bool {
        match (self, document) {
            (PrimitiveKind::Null, Document::Null) => true,
            (PrimitiveKind::Bool, Document::Bool(_)) => true,
            (PrimitiveKind::Integer(width), Document::Number(n)) => {
                n.as_i64().map_or(false, |i| width.contains(i))
            }
            (PrimitiveKind::Float, Document::Number(_)) => true,
            (PrimitiveKind::String, Document::String(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Null => f.write_str("null"),
            PrimitiveKind::Bool => f.write_str("bool"),
            PrimitiveKind::Integer(width) => f.write_str(width.name()),
            PrimitiveKind::Float => f.write_str("float"),
            PrimitiveKind::String => f.write_str("string"),
        }
    }
}

/// The conversion rule for a declared type, with references to its inner types.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'a> {
    Optional(&'a TypeDecl),
    Sequence(&'a TypeDecl),
    Mapping(&'a TypeDecl),
    Record(&'a RecordDecl),
    Enum(&'a EnumDecl),
    Identifier,
    Temporal(TemporalKind),
    Primitive(PrimitiveKind),
    /// Several primitive alternatives; the first whose shape matches wins.
    Union {
        alternatives: Vec<PrimitiveKind>,
        nullable: bool,
    },
    Unsupported(&'a TypeDecl),
}

impl Classification<'_> {
    /// Returns `true` if a missing or null value is valid for this classification.
    #[must_use]
    pub fn admits_absence(&self) -> bool {
        match self {
            Classification::Optional(_) => true,
            Classification::Union { nullable, .. } => *nullable,
            Classification::Primitive(PrimitiveKind::Null) => true,
            _ => false,
        }
    }
}

/// Classifies `ty`. Pure; first matching rule wins.
///
/// # Examples
///
/// ```rust
/// use recmarshal::classify::{classify, Classification, PrimitiveKind};
/// use recmarshal::TypeDecl;
///
/// let ty = TypeDecl::nullable(TypeDecl::sequence(TypeDecl::String));
/// assert_eq!(classify(&ty), Classification::Optional(&TypeDecl::sequence(TypeDecl::String)));
/// assert_eq!(classify(&TypeDecl::Bool), Classification::Primitive(PrimitiveKind::Bool));
/// ```
#[must_use]
pub fn classify(ty: &TypeDecl) -> Classification<'_> {
    match ty {
        TypeDecl::Nullable(inner) => Classification::Optional(inner),
        TypeDecl::Union(alternatives) => classify_union(ty, alternatives),
        TypeDecl::Sequence(element) => Classification::Sequence(element),
        TypeDecl::Mapping { key, value } => match **key {
            TypeDecl::String => Classification::Mapping(value),
            _ => Classification::Unsupported(ty),
        },
        TypeDecl::Record(decl) => Classification::Record(decl),
        TypeDecl::Enum(decl) => Classification::Enum(decl),
        TypeDecl::Identifier => Classification::Identifier,
        TypeDecl::Date => Classification::Temporal(TemporalKind::Date),
        TypeDecl::DateTime => Classification::Temporal(TemporalKind::DateTime),
        TypeDecl::Null => Classification::Primitive(PrimitiveKind::Null),
        TypeDecl::Bool => Classification::Primitive(PrimitiveKind::Bool),
        TypeDecl::Integer(width) => Classification::Primitive(PrimitiveKind::Integer(*width)),
        TypeDecl::Float => Classification::Primitive(PrimitiveKind::Float),
        TypeDecl::String => Classification::Primitive(PrimitiveKind::String),
        TypeDecl::Tuple(_) | TypeDecl::Opaque(_) => Classification::Unsupported(ty),
    }
}

fn primitive_kind(ty: &TypeDecl) -> Option<PrimitiveKind> {
    match ty {
        TypeDecl::Null => Some(PrimitiveKind::Null),
        TypeDecl::Bool => Some(PrimitiveKind::Bool),
        TypeDecl::Integer(width) => Some(PrimitiveKind::Integer(*width)),
        TypeDecl::Float => Some(PrimitiveKind::Float),
        TypeDecl::String => Some(PrimitiveKind::String),
        _ => None,
    }
}

fn classify_union<'a>(ty: &'a TypeDecl, alternatives: &'a [TypeDecl]) -> Classification<'a> {
    let nullable = alternatives.iter().any(|alt| *alt == TypeDecl::Null);
    let present: Vec<&TypeDecl> = alternatives
        .iter()
        .filter(|alt| **alt != TypeDecl::Null)
        .collect();

    match present.as_slice() {
        [] if nullable => Classification::Primitive(PrimitiveKind::Null),
        [] => Classification::Unsupported(ty),
        [only] if nullable => Classification::Optional(*only),
        [only] => classify(*only),
        _ => {
            // Composite alternatives cannot be told apart by shape alone.
            let kinds: Option<Vec<PrimitiveKind>> =
                present.iter().map(|alt| primitive_kind(alt)).collect();
            match kinds {
                Some(alternatives) => Classification::Union {
                    alternatives,
                    nullable,
                },
                None => Classification::Unsupported(ty),
            }
        }
    }
}
