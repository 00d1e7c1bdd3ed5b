/// Builds a [`Document`](crate::Document) from a JSON-like literal.
///
/// ```rust
/// use recmarshal::{doc, Document};
///
/// let items = doc!({ "items": [{ "createdAt": "2020-06-11T14:32:00" }], "count": 1 });
/// assert_eq!(items.get("count"), Some(&Document::from(1)));
///
/// let offsets = doc!({ "low": -40, "range": [-1.5, 0, 2] });
/// assert_eq!(offsets.get("low"), Some(&Document::from(-40)));
/// ```
#[macro_export]
macro_rules! doc {
    // Sequence elements, one at a time. A leading `-` stays with its literal.
    (@seq [$($out:expr,)*]) => {
        $crate::Document::Sequence(vec![$($out),*])
    };

    (@seq [$($out:expr,)*] - $n:literal $(, $($rest:tt)*)?) => {
        $crate::doc!(@seq [$($out,)* $crate::doc!(-$n),] $($($rest)*)?)
    };

    (@seq [$($out:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::doc!(@seq [$($out,)* $crate::doc!($elem),] $($($rest)*)?)
    };

    // Mapping entries, inserted into `$m` in order.
    (@map $m:ident) => {};

    (@map $m:ident $key:literal : - $n:literal $(, $($rest:tt)*)?) => {
        $m.insert($key.to_string(), $crate::doc!(-$n));
        $crate::doc!(@map $m $($($rest)*)?);
    };

    (@map $m:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $m.insert($key.to_string(), $crate::doc!($value));
        $crate::doc!(@map $m $($($rest)*)?);
    };

    (null) => {
        $crate::Document::Null
    };

    (true) => {
        $crate::Document::Bool(true)
    };

    (false) => {
        $crate::Document::Bool(false)
    };

    ([]) => {
        $crate::Document::Sequence(vec![])
    };

    ([ $($elem:tt)+ ]) => {
        $crate::doc!(@seq [] $($elem)+)
    };

    ({}) => {
        $crate::Document::Mapping($crate::DocumentMap::new())
    };

    ({ $($entry:tt)+ }) => {{
        let mut mapping = $crate::DocumentMap::new();
        $crate::doc!(@map mapping $($entry)+);
        $crate::Document::Mapping(mapping)
    }};

    // Numbers, strings and any expression with a `From` conversion.
    ($s:expr) => {
        $crate::Document::from($s)
    };
}

/// Declares a struct together with its [`Transcode`](crate::Transcode) impl.
///
/// Each field may carry an option clause after its type. The recognised options are
/// `json` (the document key) and `omitempty`; anything else makes
/// [`Transcode::declared_type`](crate::Transcode::declared_type) fail with a
/// configuration error. The declaration is built on first use and cached.
///
/// ```rust
/// use recmarshal::{marshal, record, doc};
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Item {
///         pub first_key: String => { json: "firstKey" },
///         pub note: Option<String> => { omitempty: true },
///         pub count: i64,
///     }
/// }
///
/// let item = Item { first_key: "a".to_string(), note: None, count: 2 };
/// assert_eq!(marshal(&item).unwrap(), doc!({ "firstKey": "a", "count": 2 }));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $( => { $($opt:ident : $val:expr),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Transcode for $name {
            fn declared_type() -> $crate::Result<$crate::TypeDecl> {
                static DECLARATION: ::std::sync::OnceLock<
                    $crate::Result<::std::sync::Arc<$crate::RecordDecl>>,
                > = ::std::sync::OnceLock::new();

                DECLARATION
                    .get_or_init(|| -> $crate::Result<::std::sync::Arc<$crate::RecordDecl>> {
                        $crate::RecordDecl::builder(stringify!($name))
                            $(
                                .field_tagged(
                                    stringify!($field),
                                    <$ty as $crate::Transcode>::declared_type()?,
                                    &[$($((stringify!($opt), $crate::OptionValue::from($val))),*)?],
                                )
                            )*
                            .build()
                    })
                    .clone()
                    .map($crate::TypeDecl::Record)
            }

            fn to_field_value(&self) -> $crate::FieldValue {
                #[allow(unused_mut)]
                let mut record = $crate::RecordValue::new(stringify!($name));
                $(
                    record.insert(
                        stringify!($field),
                        $crate::Transcode::to_field_value(&self.$field),
                    );
                )*
                $crate::FieldValue::Record(record)
            }

            fn from_field_value(value: $crate::FieldValue) -> $crate::Result<Self> {
                #[allow(unused_mut, unused_variables)]
                let mut record = value.into_record(stringify!($name))?;
                Ok($name {
                    $(
                        $field: <$ty as $crate::Transcode>::from_field_value(
                            record.take(stringify!($field)),
                        )?,
                    )*
                })
            }
        }
    };
}

/// Declares a fieldless enum whose variants marshal as string labels.
///
/// ```rust
/// use recmarshal::{marshal, string_enum, Document};
///
/// string_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Color {
///         Red => "RED",
///         Green => "GREEN",
///     }
/// }
///
/// assert_eq!(Color::Red.label(), "RED");
/// assert_eq!(marshal(&Color::Green).unwrap(), Document::from("GREEN"));
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $name {
            /// Every label, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label),*];

            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl $crate::Transcode for $name {
            fn declared_type() -> $crate::Result<$crate::TypeDecl> {
                static DECLARATION: ::std::sync::OnceLock<
                    $crate::Result<::std::sync::Arc<$crate::EnumDecl>>,
                > = ::std::sync::OnceLock::new();

                DECLARATION
                    .get_or_init(|| $crate::EnumDecl::new(stringify!($name), Self::LABELS))
                    .clone()
                    .map($crate::TypeDecl::Enum)
            }

            fn to_field_value(&self) -> $crate::FieldValue {
                $crate::FieldValue::Enum(self.label().to_string())
            }

            fn from_field_value(value: $crate::FieldValue) -> $crate::Result<Self> {
                match value {
                    $crate::FieldValue::Enum(label) => match label.as_str() {
                        $($label => Ok($name::$variant),)*
                        _ => Err($crate::Error::invalid_enum_value(
                            $crate::FieldPath::root(),
                            label.as_str(),
                            stringify!($name),
                            Self::LABELS.iter().map(|l| l.to_string()).collect(),
                        )),
                    },
                    other => Err($crate::Error::type_mismatch(
                        $crate::FieldPath::root(),
                        concat!("enum ", stringify!($name)),
                        other.kind_name(),
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Document, DocumentMap, ErrorKind, Number, Transcode, TypeDecl};

    #[test]
    fn test_doc_macro_primitives() {
        assert_eq!(doc!(null), Document::Null);
        assert_eq!(doc!(true), Document::Bool(true));
        assert_eq!(doc!(42), Document::Number(Number::Integer(42)));
        assert_eq!(doc!(3.5), Document::Number(Number::Float(3.5)));
        assert_eq!(doc!("hello"), Document::String("hello".to_string()));
    }

    #[test]
    fn test_doc_macro_nested() {
        assert_eq!(doc!({}), Document::Mapping(DocumentMap::new()));

        let document = doc!({ "items": [1, 2], "meta": { "ok": false } });
        let items = document.get("items").and_then(Document::as_sequence).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            document.get("meta").and_then(|m| m.get("ok")),
            Some(&Document::Bool(false))
        );
    }

    #[test]
    fn test_doc_macro_negative_numbers() {
        let document = doc!({ "a": -1, "b": [-2, 3, -4.5], "c": { "d": -0.25 }, });
        assert_eq!(document.get("a"), Some(&Document::Number(Number::Integer(-1))));
        assert_eq!(
            document.get("b"),
            Some(&Document::Sequence(vec![
                Document::Number(Number::Integer(-2)),
                Document::Number(Number::Integer(3)),
                Document::Number(Number::Float(-4.5)),
            ]))
        );
        assert_eq!(
            document.get("c").and_then(|c| c.get("d")),
            Some(&Document::Number(Number::Float(-0.25)))
        );
        assert_eq!(doc!([-1]), Document::Sequence(vec![Document::from(-1)]));
    }

    record! {
        #[derive(Debug, PartialEq)]
        struct Tagged {
            id: String => { json: "ID" },
            note: Option<String> => { json: "n", omitempty: true },
        }
    }

    record! {
        #[allow(dead_code)]
        struct Misconfigured {
            id: String => { rename: "ID" },
        }
    }

    string_enum! {
        #[derive(Debug, PartialEq)]
        enum Size {
            Small => "S",
            Large => "L",
        }
    }

    #[test]
    fn test_record_macro_declaration() {
        let TypeDecl::Record(decl) = Tagged::declared_type().unwrap() else {
            panic!("expected record declaration");
        };
        assert_eq!(decl.name(), "Tagged");
        assert_eq!(decl.fields()[0].document_key(), "ID");
        assert!(decl.fields()[1].options().omitempty);
    }

    #[test]
    fn test_record_macro_rejects_unknown_option() {
        let err = Misconfigured::declared_type().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("rename"));
    }

    #[test]
    fn test_string_enum_labels() {
        assert_eq!(Size::LABELS, &["S", "L"]);
        assert_eq!(Size::Large.to_string(), "L");
        let err = Size::from_field_value(crate::FieldValue::Enum("M".to_string())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
    }
}
