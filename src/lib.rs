//! # inikit
//!
//! A configurable INI codec: parse INI text into an ordered document, and write a
//! document back out as INI text.
//!
//! ## Key Features
//!
//! - **Typed values**: `true`, `5.3`, `0xFf0066` and `null` come back as booleans,
//!   numbers and nulls; everything else stays a string
//! - **Tolerant mode**: collect unsupported lines instead of failing on the first one
//! - **Data sections**: keep the body of chosen sections as raw, unparsed lines
//! - **Merge strategies**: decide what repeated keys do (override, collect into an
//!   array, or a closure of your own)
//! - **Serde compatible**: map INI onto your own types via
//!   `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! inikit = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Parsing and Stringifying Documents
//!
//! ```rust
//! use inikit::{parse, stringify, IniValue};
//!
//! let text = "v1 = 2\n\n[smbd]\nv2 = true\nv3 = 5.3";
//! let doc = parse(text).unwrap();
//!
//! assert_eq!(doc.get("v1"), Some(&IniValue::from(2)));
//! assert_eq!(doc.section("smbd").and_then(|s| s.get("v2")), Some(&IniValue::Bool(true)));
//!
//! assert_eq!(stringify(&doc).unwrap(), "v1=2\n\n[smbd]\nv2=true\nv3=5.3");
//! ```
//!
//! ### Typed Configuration with Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use inikit::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     debug: bool,
//!     database: Database,
//! }
//!
//! let config = Config {
//!     name: "svc".to_string(),
//!     debug: false,
//!     database: Database { host: "db.local".to_string(), port: 5432 },
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "name=svc\ndebug=false\n\n[database]\nhost=db.local\nport=5432");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Tolerant Parsing
//!
//! ```rust
//! use inikit::{parse_with_options, ParseOptions};
//!
//! let doc = parse_with_options("a = 1\ntrash\nb = 2", &ParseOptions::tolerant()).unwrap();
//! assert_eq!(doc.len(), 2);
//!
//! let errors = doc.errors().unwrap();
//! assert_eq!(errors[0].line_number(), 2);
//! assert_eq!(errors[0].line(), "trash");
//! ```
//!
//! ## Logging
//!
//! Parsing and stringifying emit `tracing` events at `debug` and `trace` level.
//! Install any subscriber to see them; the crate never installs one itself.
//!
//! ## Format Reference
//!
//! The accepted syntax is described in the [`format`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parsing, reading values and writing a document back
//! - **`dynamic_values.rs`** - building documents with the `ini!` macro
//! - **`custom_options.rs`** - delimiters, comments, data sections and merge strategies
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod fs;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod typing;
pub mod value;

pub use de::Deserializer;
pub use document::IniDocument;
pub use error::{Error, ParsingError, Result};
pub use map::IniMap;
pub use options::{AutoTyping, KeyMergeStrategy, ParseOptions, StringifyOptions};
pub use ser::{IniValueSerializer, Serializer};
pub use typing::{auto_type, parse_number};
pub use value::{IniValue, Number};

use serde::{Deserialize, Serialize};
use std::io;

/// Parses INI text with the default [`ParseOptions`].
///
/// # Examples
///
/// ```rust
/// use inikit::{parse, Error};
///
/// let doc = parse("[a]\nb = c").unwrap();
/// assert_eq!(doc.section("a").and_then(|s| s.get("b")).and_then(|v| v.as_str()), Some("c"));
///
/// let err = parse("a = 1\ntrash").unwrap_err();
/// assert_eq!(err, Error::parsing("trash", 2));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parsing`] for the first unsupported line and [`Error::Proto`]
/// for a `[__proto__]` header.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<IniDocument> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use inikit::{parse_with_options, KeyMergeStrategy, ParseOptions, IniValue};
///
/// let options = ParseOptions::new()
///     .with_delimiter(":")
///     .with_comment("//")
///     .with_key_merge_strategy(KeyMergeStrategy::JoinToArray);
///
/// let doc = parse_with_options("// hosts\nhost: a\nhost: b", &options).unwrap();
/// assert_eq!(
///     doc.get("host"),
///     Some(&IniValue::Array(vec![IniValue::from("a"), IniValue::from("b")]))
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] for an empty delimiter, and otherwise the same
/// errors as [`parse`]. In tolerant mode unsupported lines are collected in
/// [`IniDocument::errors`] instead.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<IniDocument> {
    de::parse_document(text, options)
}

/// Renders a document as INI text with the default [`StringifyOptions`].
///
/// # Errors
///
/// Returns [`Error::Nesting`] when a section holds a section, a data section, or an
/// array of composite values, and [`Error::UnsupportedType`] when a key, value,
/// section name or data line contains a line break.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(doc: &IniDocument) -> Result<String> {
    stringify_with_options(doc, &StringifyOptions::default())
}

/// Renders a document as INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use inikit::{parse, stringify_with_options, StringifyOptions};
///
/// let doc = parse("v1 = 2\n[s]\nempty =").unwrap();
/// let options = StringifyOptions::new()
///     .with_blank_line(false)
///     .with_space_before(true)
///     .with_space_after(true)
///     .with_skip_undefined(true);
///
/// assert_eq!(stringify_with_options(&doc, &options).unwrap(), "v1 = 2\n[s]");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] for an empty delimiter, and otherwise the same
/// errors as [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_options(doc: &IniDocument, options: &StringifyOptions) -> Result<String> {
    ser::stringify_document(doc, options)
}

/// Serialize any `T: Serialize` to an INI string.
///
/// The value must serialize as a map or struct. Its scalar fields become top-level
/// keys, fields holding a map or struct become sections, and sequences become
/// repeated keys.
///
/// # Examples
///
/// ```rust
/// use inikit::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Mirror { urls: Vec<&'static str> }
///
/// let text = to_string(&Mirror { urls: vec!["a", "b"] }).unwrap();
/// assert_eq!(text, "urls=a\nurls=b");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] when the value is not a map or struct, or
/// contains enum variants with data, and [`Error::Nesting`] when it nests too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &StringifyOptions::default())
}

/// Serialize any `T: Serialize` to an INI string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented in INI.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &StringifyOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let doc = IniDocument::try_from(to_value(value)?)?;
    stringify_with_options(&doc, options)
}

/// Convert any `T: Serialize` to an `IniValue`.
///
/// # Examples
///
/// ```rust
/// use inikit::{to_value, IniValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: Option<i32> }
///
/// let value = to_value(&Point { x: 1, y: None }).unwrap();
/// let section = value.as_section().unwrap();
/// assert_eq!(section.get("x"), Some(&IniValue::from(1)));
/// assert_eq!(section.get("y"), Some(&IniValue::Empty));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<IniValue>
where
    T: ?Sized + Serialize,
{
    ser::to_ini_value(value)
}

/// Serialize any `T: Serialize` to a writer in INI format.
///
/// # Examples
///
/// ```rust
/// use inikit::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1\ny=2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &StringifyOptions::default())
}

/// Serialize any `T: Serialize` to a writer in INI format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: &StringifyOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of INI text.
///
/// Values keep their exact text until a field asks for a number or a bool, and
/// repeated keys collect into sequences. See [`Deserializer::from_str`].
///
/// # Examples
///
/// ```rust
/// use inikit::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid INI or cannot be deserialized to type
/// `T`. Parse errors carry the offending line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from INI text parsed with custom options.
///
/// # Examples
///
/// ```rust
/// use inikit::{from_str_with_options, ParseOptions};
/// use std::collections::HashMap;
///
/// let options = ParseOptions::new().with_delimiter(":");
/// let map: HashMap<String, i64> = from_str_with_options("a: 1\nb: 2", options).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid INI or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: ParseOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an already parsed document.
///
/// # Examples
///
/// ```rust
/// use inikit::{from_document, parse};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Smbd { v1: u8 }
///
/// #[derive(Deserialize)]
/// struct Conf { smbd: Smbd }
///
/// let doc = parse("[smbd]\nv1 = 5").unwrap();
/// let conf: Conf = from_document(doc).unwrap();
/// assert_eq!(conf.smbd.v1, 5);
/// ```
///
/// # Errors
///
/// Returns an error if the document cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<T>(doc: IniDocument) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(de::ValueDeserializer::new(IniValue::Section(
        doc.into_entries(),
    )))
}

/// Deserialize an instance of type `T` from an I/O stream of INI.
///
/// # Examples
///
/// ```rust
/// use inikit::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\r\ny = 2\r\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid INI,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid INI, or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Owner {
        name: String,
        email: Option<String>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Project {
        id: u32,
        title: String,
        active: bool,
        tags: Vec<String>,
        owner: Owner,
    }

    fn project() -> Project {
        Project {
            id: 123,
            title: "inikit".to_string(),
            active: true,
            tags: vec!["parser".to_string(), "ini".to_string()],
            owner: Owner {
                name: "Alice".to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let ini = to_string(&point).unwrap();
        let point_back: Point = from_str(&ini).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_project() {
        let project = project();
        let ini = to_string(&project).unwrap();
        assert_eq!(
            ini,
            "id=123\ntitle=inikit\nactive=true\ntags=parser\ntags=ini\n\n[owner]\nname=Alice\nemail="
        );

        let project_back: Project = from_str(&ini).unwrap();
        assert_eq!(project, project_back);
    }

    #[test]
    fn test_custom_options() {
        let options = StringifyOptions::new()
            .with_delimiter(":")
            .with_space_after(true)
            .with_blank_line(false);
        let ini = to_string_with_options(&project(), &options).unwrap();
        assert!(ini.contains("\n[owner]\nname: Alice"));

        let parse_options = ParseOptions::new()
            .with_delimiter(":")
            .with_key_merge_strategy(KeyMergeStrategy::JoinToArray);
        let project_back: Project = from_str_with_options(&ini, parse_options).unwrap();
        assert_eq!(project_back, project());
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        match value {
            IniValue::Section(map) => {
                assert_eq!(map.get("x"), Some(&IniValue::Number(Number::Integer(1))));
                assert_eq!(map.get("y"), Some(&IniValue::Number(Number::Integer(2))));
            }
            _ => panic!("Expected section"),
        }
    }

    #[test]
    fn test_top_level_must_be_a_map() {
        assert!(matches!(
            to_string(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_from_document_uses_typed_values() {
        let doc = parse("[s]\nn = 5\nflag = yes").unwrap();
        let map: BTreeMap<String, BTreeMap<String, String>> = from_document(doc).unwrap();
        assert_eq!(map["s"]["n"], "5");
        assert_eq!(map["s"]["flag"], "yes");
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &project()).unwrap();
        let back: Project = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, project());

        let from_bytes: Project = from_slice(&buffer).unwrap();
        assert_eq!(from_bytes, project());
    }

    #[test]
    fn test_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_parse_error_surfaces_through_from_str() {
        let result: Result<Point> = from_str("x = 1\noops");
        assert_eq!(result.unwrap_err().line_number(), Some(2));
    }
}
