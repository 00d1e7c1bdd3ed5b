//! The recursive conversion engine.
//!
//! [`Transcoder`] walks a declared type together with either a typed [`FieldValue`]
//! (marshal) or a [`Document`] (unmarshal). Both directions share the same
//! classification and field resolution, and both stop at the first failure.

use crate::classify::{classify, Classification, PrimitiveKind};
use crate::error::Result;
use crate::instance::{FieldMap, FieldValue, RecordValue};
use crate::map::DocumentMap;
use crate::options::ConversionOptions;
use crate::path::{PathSegment, PathTracker, Tracked};
use crate::resolve::resolve;
use crate::schema::{EnumDecl, RecordDecl, TypeDecl};
use crate::temporal::{self, TemporalKind, TemporalValue};
use crate::value::{Document, Number};
use uuid::Uuid;

/// Length of the hyphenated UUID form.
const IDENTIFIER_LEN: usize = 36;

/// State for one marshal or unmarshal call.
pub struct Transcoder<'o> {
    options: &'o ConversionOptions,
    path: PathTracker,
}

impl Tracked for Transcoder<'_> {
    fn tracker(&mut self) -> &mut PathTracker {
        &mut self.path
    }
}

impl<'o> Transcoder<'o> {
    #[must_use]
    pub fn new(options: &'o ConversionOptions) -> Self {
        Transcoder {
            options,
            path: PathTracker::new(),
        }
    }

    fn pattern(&self, kind: TemporalKind) -> Option<&'o str> {
        match kind {
            TemporalKind::Date => self.options.date_pattern(),
            TemporalKind::DateTime => self.options.datetime_pattern(),
        }
    }

    /// Converts a typed value of type `ty` into a document.
    ///
    /// # Errors
    ///
    /// Fails with the path of the first value whose shape does not match `ty`.
    pub fn marshal(&mut self, value: &FieldValue, ty: &TypeDecl) -> Result<Document> {
        match classify(ty) {
            Classification::Optional(inner) => match value {
                FieldValue::Null => Ok(Document::Null),
                present => self.marshal(present, inner),
            },
            Classification::Sequence(element) => match value {
                FieldValue::Sequence(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        out.push(
                            self.with_path(PathSegment::Index(index), |t| t.marshal(item, element))?,
                        );
                    }
                    Ok(Document::Sequence(out))
                }
                other => Err(self.path.type_mismatch(ty, other.kind_name())),
            },
            Classification::Mapping(inner) => match value {
                FieldValue::Mapping(entries) => {
                    let mut out = DocumentMap::with_capacity(entries.len());
                    for (key, entry) in entries {
                        let document =
                            self.with_path(PathSegment::key(key.as_str()), |t| t.marshal(entry, inner))?;
                        out.insert(key.clone(), document);
                    }
                    Ok(Document::Mapping(out))
                }
                other => Err(self.path.type_mismatch(ty, other.kind_name())),
            },
            Classification::Record(decl) => match value {
                FieldValue::Record(record) => self.marshal_record(record, decl),
                other => Err(self.path.type_mismatch(ty, other.kind_name())),
            },
            Classification::Enum(decl) => match value {
                FieldValue::Enum(label) if decl.contains(label) => {
                    Ok(Document::String(label.clone()))
                }
                FieldValue::Enum(label) => Err(self.invalid_enum(label, decl)),
                other => Err(self.path.type_mismatch(ty, other.kind_name())),
            },
            Classification::Identifier => match value {
                FieldValue::Identifier(id) => Ok(Document::String(id.hyphenated().to_string())),
                other => Err(self.path.type_mismatch(ty, other.kind_name())),
            },
            Classification::Temporal(kind) => {
                let moment = match (kind, value) {
                    (TemporalKind::Date, FieldValue::Date(date)) => TemporalValue::Date(*date),
                    (TemporalKind::DateTime, FieldValue::DateTime(at)) => {
                        TemporalValue::DateTime(*at)
                    }
                    (_, other) => return Err(self.path.type_mismatch(ty, other.kind_name())),
                };
                temporal::format(&moment, self.pattern(kind))
                    .map(Document::String)
                    .map_err(|e| {
                        self.path
                            .invalid_temporal(&moment.to_string(), &e.pattern, &e.reason)
                    })
            }
            Classification::Primitive(kind) => self.marshal_primitive(value, kind, ty),
            Classification::Union {
                alternatives,
                nullable,
            } => {
                if value.is_null() && nullable {
                    return Ok(Document::Null);
                }
                match alternatives
                    .iter()
                    .find(|kind| primitive_holds(**kind, value))
                {
                    Some(kind) => self.marshal_primitive(value, *kind, ty),
                    None => Err(self.path.type_mismatch(ty, value.kind_name())),
                }
            }
            Classification::Unsupported(ty) => Err(self.path.unsupported_type(ty)),
        }
    }

    fn marshal_record(&mut self, record: &RecordValue, decl: &RecordDecl) -> Result<Document> {
        let mut out = DocumentMap::with_capacity(decl.fields().len());
        for field in resolve(decl) {
            let value = record.get(field.field_name).unwrap_or(&FieldValue::Null);
            if value.is_null() && field.omit_if_empty {
                continue;
            }
            let document = self.with_path(PathSegment::key(field.document_key), |t| {
                t.marshal(value, field.declared_type)
            })?;
            out.insert(field.document_key.to_string(), document);
        }
        Ok(Document::Mapping(out))
    }

    fn marshal_primitive(
        &mut self,
        value: &FieldValue,
        kind: PrimitiveKind,
        ty: &TypeDecl,
    ) -> Result<Document> {
        match (kind, value) {
            (PrimitiveKind::Null, FieldValue::Null) => Ok(Document::Null),
            (PrimitiveKind::Bool, FieldValue::Bool(b)) => Ok(Document::Bool(*b)),
            (PrimitiveKind::Integer(width), FieldValue::Int(i)) if width.contains(*i) => {
                Ok(Document::Number(Number::Integer(*i)))
            }
            (PrimitiveKind::Integer(width), FieldValue::Int(i)) => Err(self
                .path
                .type_mismatch(width.name(), format_args!("out of range integer {}", i))),
            (PrimitiveKind::Float, FieldValue::Float(f)) => Ok(Document::Number(Number::Float(*f))),
            (PrimitiveKind::Float, FieldValue::Int(i)) => {
                Ok(Document::Number(Number::Float(*i as f64)))
            }
            (PrimitiveKind::String, FieldValue::String(s)) => Ok(Document::String(s.clone())),
            (_, other) => Err(self.path.type_mismatch(ty, other.kind_name())),
        }
    }

    /// Converts `document` into a typed value of type `ty`.
    ///
    /// # Errors
    ///
    /// Fails with the path of the first value that is missing or does not match `ty`.
    pub fn unmarshal(&mut self, document: &Document, ty: &TypeDecl) -> Result<FieldValue> {
        match classify(ty) {
            Classification::Optional(inner) => match document {
                Document::Null => Ok(FieldValue::Null),
                present => self.unmarshal(present, inner),
            },
            Classification::Sequence(element) => match document {
                Document::Sequence(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        out.push(self.with_path(PathSegment::Index(index), |t| {
                            t.unmarshal(item, element)
                        })?);
                    }
                    Ok(FieldValue::Sequence(out))
                }
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Mapping(inner) => match document {
                Document::Mapping(entries) => {
                    let mut out = FieldMap::with_capacity(entries.len());
                    for (key, entry) in entries {
                        let value = self.with_path(PathSegment::key(key.as_str()), |t| {
                            t.unmarshal(entry, inner)
                        })?;
                        out.insert(key.clone(), value);
                    }
                    Ok(FieldValue::Mapping(out))
                }
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Record(decl) => match document {
                Document::Mapping(entries) => self.unmarshal_record(entries, decl),
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Enum(decl) => match document {
                Document::String(label) if decl.contains(label) => {
                    Ok(FieldValue::Enum(label.clone()))
                }
                Document::String(label) => Err(self.invalid_enum(label, decl)),
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Identifier => match document {
                Document::String(text) => parse_identifier(text)
                    .map(FieldValue::Identifier)
                    .ok_or_else(|| self.path.invalid_identifier(text)),
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Temporal(kind) => match document {
                Document::String(text) => match temporal::parse(text, self.pattern(kind), kind) {
                    Ok(TemporalValue::Date(date)) => Ok(FieldValue::Date(date)),
                    Ok(TemporalValue::DateTime(at)) => Ok(FieldValue::DateTime(at)),
                    Err(e) => Err(self.path.invalid_temporal(text, &e.pattern, &e.reason)),
                },
                other => Err(self.path.type_mismatch(ty, other.type_name())),
            },
            Classification::Primitive(kind) => self.unmarshal_primitive(document, kind, ty),
            Classification::Union {
                alternatives,
                nullable,
            } => {
                if document.is_null() && nullable {
                    return Ok(FieldValue::Null);
                }
                match alternatives.iter().find(|kind| kind.accepts(document)) {
                    Some(kind) => self.unmarshal_primitive(document, *kind, ty),
                    None => Err(self.path.type_mismatch(ty, document.type_name())),
                }
            }
            Classification::Unsupported(ty) => Err(self.path.unsupported_type(ty)),
        }
    }

    fn unmarshal_record(&mut self, entries: &DocumentMap, decl: &RecordDecl) -> Result<FieldValue> {
        let mut record = RecordValue::new(decl.name());
        let mut matched = 0;
        for field in resolve(decl) {
            let value = self.with_path(PathSegment::key(field.document_key), |t| {
                match entries.get(field.document_key) {
                    Some(document) => t.unmarshal(document, field.declared_type),
                    None if classify(field.declared_type).admits_absence() => Ok(FieldValue::Null),
                    None => Err(t.path.missing_field(field.document_key)),
                }
            })?;
            if entries.contains_key(field.document_key) {
                matched += 1;
            }
            record.insert(field.field_name, value);
        }
        if matched < entries.len() {
            tracing::trace!(
                record = decl.name(),
                path = %self.path.current(),
                ignored = entries.len() - matched,
                "ignoring unknown document keys"
            );
        }
        Ok(FieldValue::Record(record))
    }

    fn unmarshal_primitive(
        &mut self,
        document: &Document,
        kind: PrimitiveKind,
        ty: &TypeDecl,
    ) -> Result<FieldValue> {
        match (kind, document) {
            (PrimitiveKind::Null, Document::Null) => Ok(FieldValue::Null),
            (PrimitiveKind::Bool, Document::Bool(b)) => Ok(FieldValue::Bool(*b)),
            (PrimitiveKind::Integer(width), Document::Number(n)) => match n.as_i64() {
                Some(i) if width.contains(i) => Ok(FieldValue::Int(i)),
                Some(i) => Err(self
                    .path
                    .type_mismatch(width.name(), format_args!("out of range integer {}", i))),
                None => Err(self
                    .path
                    .type_mismatch(width.name(), format_args!("non-integral number {}", n))),
            },
            (PrimitiveKind::Float, Document::Number(n)) => Ok(FieldValue::Float(n.as_f64())),
            (PrimitiveKind::String, Document::String(s)) => Ok(FieldValue::String(s.clone())),
            (_, other) => Err(self.path.type_mismatch(ty, other.type_name())),
        }
    }

    fn invalid_enum(&self, label: &str, decl: &EnumDecl) -> crate::Error {
        self.path
            .invalid_enum_value(label, decl.name(), decl.variants())
    }
}

/// Whether `value` is the typed counterpart of `kind`, used to pick a union alternative.
fn primitive_holds(kind: PrimitiveKind, value: &FieldValue) -> bool {
    match (kind, value) {
        (PrimitiveKind::Null, FieldValue::Null) => true,
        (PrimitiveKind::Bool, FieldValue::Bool(_)) => true,
        (PrimitiveKind::Integer(width), FieldValue::Int(i)) => width.contains(*i),
        (PrimitiveKind::Float, FieldValue::Float(_)) => true,
        (PrimitiveKind::String, FieldValue::String(_)) => true,
        _ => false,
    }
}

/// Accepts the hyphenated form only, in either case.
fn parse_identifier(text: &str) -> Option<Uuid> {
    if text.len() != IDENTIFIER_LEN {
        return None;
    }
    Uuid::parse_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{FieldOptions, IntWidth};
    use crate::temporal::Timestamp;
    use chrono::NaiveDate;

    fn options() -> ConversionOptions {
        ConversionOptions::default()
    }

    fn item_decl() -> TypeDecl {
        let decl = RecordDecl::builder("Item")
            .field_with("created_at", TypeDecl::DateTime, FieldOptions::new().rename("createdAt"))
            .build()
            .unwrap();
        TypeDecl::Record(decl)
    }

    #[test]
    fn test_nested_path_on_temporal_failure() {
        let decl = RecordDecl::builder("Order")
            .field("items", TypeDecl::sequence(item_decl()))
            .build()
            .unwrap();
        let document = crate::doc!({ "items": [{ "createdAt": "bad" }] });

        let options = options();
        let err = Transcoder::new(&options)
            .unmarshal(&document, &TypeDecl::Record(decl))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTemporal);
        assert_eq!(err.path().unwrap().to_string(), "items[0].createdAt");
    }

    #[test]
    fn test_path_is_empty_after_success() {
        let options = options();
        let mut transcoder = Transcoder::new(&options);
        let document = crate::doc!({ "createdAt": "2020-06-11T14:32:00" });
        let value = transcoder.unmarshal(&document, &item_decl()).unwrap();
        assert_eq!(transcoder.path.depth(), 0);

        let FieldValue::Record(record) = value else {
            panic!("expected record");
        };
        let at = NaiveDate::from_ymd_opt(2020, 6, 11)
            .unwrap()
            .and_hms_opt(14, 32, 0)
            .unwrap();
        assert_eq!(
            record.get("created_at"),
            Some(&FieldValue::DateTime(Timestamp::Naive(at)))
        );
    }

    #[test]
    fn test_integer_fraction_rejected() {
        let options = options();
        let err = Transcoder::new(&options)
            .unmarshal(&Document::from(1.5), &TypeDecl::int())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.path().unwrap().is_root());
    }

    #[test]
    fn test_integer_width_enforced() {
        let options = options();
        let ty = TypeDecl::Integer(IntWidth::U8);
        let err = Transcoder::new(&options)
            .unmarshal(&Document::from(300), &ty)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = Transcoder::new(&options)
            .marshal(&FieldValue::Int(-1), &ty)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_whole_float_accepted_for_integer() {
        let options = options();
        let value = Transcoder::new(&options)
            .unmarshal(&Document::from(12.0), &TypeDecl::int())
            .unwrap();
        assert_eq!(value, FieldValue::Int(12));
    }

    #[test]
    fn test_identifier_requires_hyphenated_form() {
        let options = options();
        let mut transcoder = Transcoder::new(&options);
        let ok = transcoder
            .unmarshal(
                &Document::from("CB637F6A-0DC0-4C42-8764-5B98137A8EA6"),
                &TypeDecl::Identifier,
            )
            .unwrap();
        let FieldValue::Identifier(id) = ok else {
            panic!("expected identifier");
        };
        assert_eq!(
            transcoder
                .marshal(&FieldValue::Identifier(id), &TypeDecl::Identifier)
                .unwrap(),
            Document::from("cb637f6a-0dc0-4c42-8764-5b98137a8ea6")
        );

        let err = transcoder
            .unmarshal(
                &Document::from("cb637f6a0dc04c4287645b98137a8ea6"),
                &TypeDecl::Identifier,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
    }

    #[test]
    fn test_union_picks_matching_alternative() {
        let options = options();
        let ty = TypeDecl::Union(vec![TypeDecl::int(), TypeDecl::String]);
        let mut transcoder = Transcoder::new(&options);

        assert_eq!(
            transcoder.unmarshal(&Document::from("x"), &ty).unwrap(),
            FieldValue::String("x".to_string())
        );
        assert_eq!(
            transcoder.unmarshal(&Document::from(4), &ty).unwrap(),
            FieldValue::Int(4)
        );
        let err = transcoder.unmarshal(&Document::Bool(true), &ty).unwrap_err();
        assert!(err.to_string().contains("Union<i64 | string>"));
        let err = transcoder.unmarshal(&Document::Null, &ty).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_unsupported_type_fails_lazily() {
        let decl = RecordDecl::builder("Item")
            .field("first_value", TypeDecl::Float)
            .field(
                "second_value",
                TypeDecl::nullable(TypeDecl::Opaque("Impossible".to_string())),
            )
            .build()
            .unwrap();
        let ty = TypeDecl::Record(decl);
        let options = options();
        let mut transcoder = Transcoder::new(&options);

        assert!(transcoder
            .unmarshal(&crate::doc!({ "first_value": 1.5 }), &ty)
            .is_ok());

        let err = transcoder
            .unmarshal(&crate::doc!({ "first_value": 1.5, "second_value": 999 }), &ty)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.path().unwrap().to_string(), "second_value");
        assert!(err.to_string().contains("Impossible"));
    }
}
