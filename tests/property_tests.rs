//! Property-based tests for the round-trip guarantees of the codec.

use inikit::{
    from_str, parse, parse_number, parse_with_options, stringify, to_string, IniDocument, IniMap,
    IniValue, Number, ParseOptions,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,8}"
}

fn section_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,8}[a-z]"
}

/// Strings that auto-typing keeps as strings.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ,:/=]{0,12}[a-zA-Z]".prop_filter("typed literal", |s| {
        !["true", "false", "null", "nan"]
            .iter()
            .any(|word| s.eq_ignore_ascii_case(word))
    })
}

fn fractional() -> impl Strategy<Value = f64> {
    (-1.0e6..1.0e6f64).prop_filter("whole numbers parse as integers", |f| f.fract() != 0.0)
}

fn scalar() -> impl Strategy<Value = IniValue> {
    prop_oneof![
        any::<i64>().prop_map(IniValue::from),
        fractional().prop_map(IniValue::from),
        any::<bool>().prop_map(IniValue::from),
        text().prop_map(IniValue::from),
        Just(IniValue::Null),
        Just(IniValue::Empty),
    ]
}

fn section() -> impl Strategy<Value = IniMap> {
    prop::collection::btree_map(key(), scalar(), 0..6).prop_map(|map| map.into_iter().collect())
}

fn document() -> impl Strategy<Value = IniDocument> {
    (
        prop::collection::btree_map(key(), scalar(), 0..6),
        prop::collection::btree_map(section_name(), section(), 0..4),
    )
        .prop_map(|(globals, sections)| {
            let mut doc = IniDocument::new();
            for (k, v) in globals {
                doc.insert(k, v);
            }
            for (name, entries) in sections {
                doc.insert(name, IniValue::Section(entries));
            }
            doc
        })
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
    secure: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    name: String,
    retries: i32,
    ratio: f64,
    aliases: Vec<String>,
    fallback: Option<u32>,
    endpoint: Endpoint,
    labels: BTreeMap<String, String>,
}

fn settings() -> impl Strategy<Value = Settings> {
    (
        (text(), any::<i32>(), fractional()),
        (
            prop::collection::vec(text(), 0..4),
            proptest::option::of(any::<u32>()),
        ),
        (text(), any::<u16>(), any::<bool>()),
        prop::collection::btree_map(key(), text(), 0..4),
    )
        .prop_map(
            |((name, retries, ratio), (aliases, fallback), (host, port, secure), labels)| Settings {
                name,
                retries,
                ratio,
                aliases,
                fallback,
                endpoint: Endpoint { host, port, secure },
                labels,
            },
        )
}

proptest! {
    #[test]
    fn prop_document_roundtrip(doc in document()) {
        let text = stringify(&doc).unwrap();
        let back = parse(&text).unwrap();
        prop_assert_eq!(back, doc, "stringified as:\n{}", text);
    }

    #[test]
    fn prop_struct_roundtrip(value in settings()) {
        let text = to_string(&value).unwrap();
        let back: Settings = from_str(&text).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn prop_integers_parse_exactly(n in any::<i64>()) {
        prop_assert_eq!(parse_number(&n.to_string()), Some(Number::Integer(n)));
    }

    #[test]
    fn prop_tolerant_parse_never_fails(input in "[a-z=\\[\\];# \r\n]{0,64}") {
        let doc = parse_with_options(&input, &ParseOptions::tolerant()).unwrap();
        if let Some(errors) = doc.errors() {
            let mut last = 0;
            for error in errors {
                prop_assert!(error.line_number() > last);
                last = error.line_number();
            }
        }
    }
}
