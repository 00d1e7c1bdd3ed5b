use recmarshal::{
    doc, marshal, record, string_enum, unmarshal, Document, DocumentMap, ErrorKind, FieldValue,
    Number, Transcode, TypeDecl,
};

#[test]
fn test_doc_macro_null() {
    assert_eq!(doc!(null), Document::Null);
}

#[test]
fn test_doc_macro_booleans() {
    assert_eq!(doc!(true), Document::Bool(true));
    assert_eq!(doc!(false), Document::Bool(false));
}

#[test]
fn test_doc_macro_numbers() {
    assert_eq!(doc!(42), Document::Number(Number::Integer(42)));
    assert_eq!(doc!(3.5), Document::Number(Number::Float(3.5)));
    assert_eq!(doc!(-123), Document::Number(Number::Integer(-123)));
}

#[test]
fn test_doc_macro_negative_numbers_in_containers() {
    assert_eq!(
        doc!([-1, 2, -3.5]),
        Document::Sequence(vec![
            Document::Number(Number::Integer(-1)),
            Document::Number(Number::Integer(2)),
            Document::Number(Number::Float(-3.5)),
        ])
    );

    let mapping = doc!({ "a": -1, "b": { "c": -2 } });
    assert_eq!(mapping.get("a"), Some(&Document::Number(Number::Integer(-1))));
    assert_eq!(
        mapping.get("b").and_then(|b| b.get("c")),
        Some(&Document::Number(Number::Integer(-2)))
    );
}

#[test]
fn test_doc_macro_strings() {
    assert_eq!(doc!("hello world"), Document::String("hello world".to_string()));
    assert_eq!(doc!(""), Document::String(String::new()));
}

#[test]
fn test_doc_macro_sequences() {
    assert_eq!(doc!([]), Document::Sequence(vec![]));
    assert_eq!(
        doc!([1, "hello", true, null]),
        Document::Sequence(vec![
            Document::Number(Number::Integer(1)),
            Document::String("hello".to_string()),
            Document::Bool(true),
            Document::Null,
        ])
    );
}

#[test]
fn test_doc_macro_mappings() {
    assert_eq!(doc!({}), Document::Mapping(DocumentMap::new()));

    let mapping = doc!({
        "name": "Alice",
        "tags": ["a", "b"],
        "meta": { "active": true }
    });
    let fields = mapping.as_mapping().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["name", "tags", "meta"]);
    assert_eq!(
        mapping.get("meta").and_then(|m| m.get("active")),
        Some(&Document::Bool(true))
    );
}

#[test]
fn test_doc_macro_variables() {
    let name = "Alice".to_string();
    let count = 7;
    assert_eq!(
        doc!({ "name": name, "count": count }),
        doc!({ "name": "Alice", "count": 7 })
    );
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Color {
        Red => "RED",
        /// Labels need not match variant names.
        Green => "green-ish",
    }
}

record! {
    /// A record with every option form.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Paint {
        pub color: Color,
        pub second_color: Option<Color> => { json: "secondColor", omitempty: true },
        pub label: Option<String> => { omitempty: false },
        pub code: u16 => { json: "code", },
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Empty {}
}

#[test]
fn test_string_enum_label_and_display() {
    assert_eq!(Color::Red.label(), "RED");
    assert_eq!(Color::Green.to_string(), "green-ish");
    assert_eq!(Color::LABELS, &["RED", "green-ish"]);
}

#[test]
fn test_string_enum_declaration_is_cached() {
    let first = Color::declared_type().unwrap();
    let second = Color::declared_type().unwrap();
    match (first, second) {
        (TypeDecl::Enum(a), TypeDecl::Enum(b)) => {
            assert!(std::sync::Arc::ptr_eq(&a, &b));
            assert_eq!(a.variants(), &["RED".to_string(), "green-ish".to_string()]);
        }
        other => panic!("expected enum declarations, got {:?}", other),
    }
}

#[test]
fn test_record_macro_options() {
    let paint = Paint {
        color: Color::Green,
        second_color: None,
        label: None,
        code: 7,
    };
    let document = marshal(&paint).unwrap();
    assert_eq!(
        document,
        doc!({ "color": "green-ish", "label": null, "code": 7 })
    );

    let back: Paint = unmarshal(&document).unwrap();
    assert_eq!(back, paint);
}

#[test]
fn test_record_macro_field_order() {
    let TypeDecl::Record(decl) = Paint::declared_type().unwrap() else {
        panic!("expected record declaration");
    };
    let keys: Vec<_> = decl.fields().iter().map(|f| f.document_key()).collect();
    assert_eq!(keys, vec!["color", "secondColor", "label", "code"]);
}

#[test]
fn test_empty_record() {
    assert_eq!(marshal(&Empty {}).unwrap(), doc!({}));
    let back: Empty = unmarshal(&doc!({ "anything": 1 })).unwrap();
    assert_eq!(back, Empty {});
}

#[test]
fn test_record_from_wrong_field_value() {
    let err = Paint::from_field_value(FieldValue::Bool(true)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.to_string().contains("record Paint"));
}
