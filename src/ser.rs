//! INI stringification and serialization.
//!
//! The [`Serializer`] renders an [`IniDocument`] as text. Top-level scalars come
//! first, followed by every section and data section in document order. A scalar
//! stored after a section is still written before the first header rather than
//! where it sits in the mapping, since under that header it would read back as a
//! section key:
//!
//! ```rust
//! use inikit::{ini, stringify, IniDocument};
//!
//! let doc = IniDocument::try_from(ini!({
//!     "b": { "c": true },
//!     "v1": 2
//! })).unwrap();
//!
//! assert_eq!(stringify(&doc).unwrap(), "v1=2\n\n[b]\nc=true");
//! ```
//!
//! Rust values go through [`IniValueSerializer`] first, which builds an
//! [`IniValue`] tree that the renderer then writes out. Only one level of nesting
//! survives: a struct field holding a struct becomes a section, anything deeper is
//! [`Error::Nesting`].
//!
//! ```rust
//! use inikit::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { name: &'static str, server: Server }
//!
//! let text = to_string(&Config { name: "demo", server: Server { port: 80 } }).unwrap();
//! assert_eq!(text, "name=demo\n\n[server]\nport=80");
//! ```

use crate::{Error, IniDocument, IniMap, IniValue, Number, Result, StringifyOptions};
use serde::{ser, Serialize};

/// Section name reported in nesting errors for top-level keys.
const GLOBAL_SCOPE: &str = "";

/// The INI renderer.
///
/// Created via [`Serializer::new`]; feed it a document with
/// [`Serializer::serialize_document`] and take the text with
/// [`Serializer::into_inner`].
pub struct Serializer {
    lines: Vec<String>,
    options: StringifyOptions,
}

impl Serializer {
    pub fn new(options: StringifyOptions) -> Self {
        Serializer {
            lines: Vec::new(),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.lines.join("\n")
    }

    pub fn serialize_document(&mut self, doc: &IniDocument) -> Result<()> {
        if self.options.delimiter.is_empty() {
            return Err(Error::invalid_option("delimiter must not be empty"));
        }
        tracing::debug!(entries = doc.len(), "stringifying ini document");

        for (key, value) in doc.iter().filter(|(_, v)| !is_block(v)) {
            self.write_entry(GLOBAL_SCOPE, key, value)?;
        }

        for (name, value) in doc.iter() {
            match value {
                IniValue::Section(entries) => {
                    self.write_header(name)?;
                    for (key, value) in entries.iter() {
                        self.write_entry(name, key, value)?;
                    }
                }
                IniValue::Data(lines) => {
                    self.write_header(name)?;
                    for line in lines {
                        check_single_line("data line", line)?;
                        self.lines.push(line.clone());
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(lines = self.lines.len(), "stringified ini document");
        Ok(())
    }

    fn write_header(&mut self, name: &str) -> Result<()> {
        check_single_line("section name", name)?;
        if self.options.blank_line {
            self.lines.push(String::new());
        }
        self.lines.push(format!("[{}]", name));
        Ok(())
    }

    fn write_entry(&mut self, section: &str, key: &str, value: &IniValue) -> Result<()> {
        check_single_line("key", key)?;
        match value {
            IniValue::Array(items) if items.is_empty() => self.write_scalar(key, &IniValue::Empty),
            IniValue::Array(items) => {
                for item in items {
                    if !item.is_scalar() {
                        return Err(Error::nesting(section, key));
                    }
                    self.write_scalar(key, item)?;
                }
                Ok(())
            }
            IniValue::Section(_) | IniValue::Data(_) => Err(Error::nesting(section, key)),
            scalar => self.write_scalar(key, scalar),
        }
    }

    fn write_scalar(&mut self, key: &str, value: &IniValue) -> Result<()> {
        if value.is_empty_value() && self.options.skip_undefined {
            return Ok(());
        }
        let text = value.to_string();
        check_single_line("value", &text)?;
        let line = self.options.format_pair(key, &text);
        self.lines.push(line);
        Ok(())
    }
}

/// Line breaks would split one entry into several, so they have no INI form.
fn check_single_line(what: &str, text: &str) -> Result<()> {
    if text.contains(['\n', '\r']) {
        return Err(Error::unsupported_type(&format!(
            "line break in {} {:?}",
            what, text
        )));
    }
    Ok(())
}

fn is_block(value: &IniValue) -> bool {
    value.is_section() || value.is_data()
}

pub(crate) fn stringify_document(doc: &IniDocument, options: &StringifyOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_document(doc)?;
    Ok(serializer.into_inner())
}

/// Builds an [`IniValue`] from any `Serialize` type.
///
/// `None` becomes [`IniValue::Empty`] and `()` becomes [`IniValue::Null`]; unit enum
/// variants become their name. Enum variants carrying data have no INI form.
pub struct IniValueSerializer;

pub struct SerializeVec {
    vec: Vec<IniValue>,
}

pub struct SerializeMap {
    map: IniMap,
    current_key: Option<String>,
}

impl ser::Serializer for IniValueSerializer {
    type Ok = IniValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<IniValue, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<IniValue, Error>;

    fn serialize_bool(self, v: bool) -> Result<IniValue> {
        Ok(IniValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<IniValue> {
        Ok(IniValue::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<IniValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<IniValue> {
        match i64::try_from(v) {
            Ok(i) => self.serialize_i64(i),
            Err(_) => Ok(IniValue::Number(Number::Float(v as f64))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<IniValue> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<IniValue> {
        Ok(IniValue::Number(Number::from_f64(v)))
    }

    fn serialize_char(self, v: char) -> Result<IniValue> {
        Ok(IniValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<IniValue> {
        Ok(IniValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<IniValue> {
        Ok(IniValue::Array(
            v.iter().map(|&b| IniValue::from(u32::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<IniValue> {
        Ok(IniValue::Empty)
    }

    fn serialize_some<T>(self, value: &T) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<IniValue> {
        Ok(IniValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<IniValue> {
        Ok(IniValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<IniValue> {
        Ok(IniValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<IniValue>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("newtype variant {}::{}", name, variant)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("tuple variant {}::{}", name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("struct variant {}::{}", name, variant)))
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn with_capacity(capacity: usize) -> Self {
        SerializeMap {
            map: IniMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<IniValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<IniValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = IniValue;
    type Error = Error;

    /// Keys must be scalars; numbers and bools are keyed by their text.
    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_ini_value(key)? {
            IniValue::String(s) => self.current_key = Some(s),
            scalar @ (IniValue::Bool(_) | IniValue::Number(_)) => {
                self.current_key = Some(scalar.to_string())
            }
            other => {
                return Err(Error::custom(format!(
                    "map keys must be strings, found {}",
                    other.kind()
                )))
            }
        }
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::Section(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = IniValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_ini_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<IniValue> {
        Ok(IniValue::Section(self.map))
    }
}

pub(crate) fn to_ini_value<T: Serialize + ?Sized>(value: &T) -> Result<IniValue> {
    value.serialize(IniValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn doc(value: IniValue) -> IniDocument {
        IniDocument::try_from(value).unwrap()
    }

    fn section(pairs: &[(&str, IniValue)]) -> IniValue {
        IniValue::Section(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_globals_before_sections() {
        let doc = doc(section(&[
            ("s", section(&[("a", IniValue::from(1))])),
            ("top", IniValue::from("x")),
        ]));
        let text = stringify_document(&doc, &StringifyOptions::default()).unwrap();
        assert_eq!(text, "top=x\n\n[s]\na=1");
    }

    #[test]
    fn test_formatting_options() {
        let doc = doc(section(&[
            ("a", IniValue::from(1)),
            ("e", IniValue::Empty),
            ("s", section(&[("n", IniValue::Null)])),
        ]));
        let options = StringifyOptions::new()
            .with_delimiter(":")
            .with_blank_line(false)
            .with_space_before(true)
            .with_space_after(true)
            .with_skip_undefined(true);
        let text = stringify_document(&doc, &options).unwrap();
        assert_eq!(text, "a : 1\n[s]\nn : null");
    }

    #[test]
    fn test_empty_value_kept_by_default() {
        let doc = doc(section(&[("e", IniValue::Empty)]));
        assert_eq!(
            stringify_document(&doc, &StringifyOptions::default()).unwrap(),
            "e="
        );
    }

    #[test]
    fn test_arrays_repeat_key() {
        let doc = doc(section(&[(
            "s",
            section(&[(
                "k",
                IniValue::Array(vec![IniValue::from(1), IniValue::from("two")]),
            )]),
        )]));
        let text = stringify_document(&doc, &StringifyOptions::default()).unwrap();
        assert_eq!(text, "\n[s]\nk=1\nk=two");
    }

    #[test]
    fn test_empty_array_is_empty_value() {
        let doc = doc(section(&[("k", IniValue::Array(Vec::new()))]));
        assert_eq!(
            stringify_document(&doc, &StringifyOptions::default()).unwrap(),
            "k="
        );
    }

    #[test]
    fn test_data_lines_verbatim() {
        let doc = doc(section(&[(
            "raw",
            IniValue::Data(vec!["  a = b".to_string(), "[not header".to_string()]),
        )]));
        let text = stringify_document(&doc, &StringifyOptions::default()).unwrap();
        assert_eq!(text, "\n[raw]\n  a = b\n[not header");
    }

    #[test]
    fn test_nesting_errors() {
        let deep = doc(section(&[(
            "b",
            section(&[("d", section(&[("x", IniValue::from(1))]))]),
        )]));
        assert_eq!(
            stringify_document(&deep, &StringifyOptions::default()).unwrap_err(),
            Error::nesting("b", "d")
        );

        let array_of_sections = doc(section(&[(
            "list",
            IniValue::Array(vec![section(&[("x", IniValue::from(1))])]),
        )]));
        assert_eq!(
            stringify_document(&array_of_sections, &StringifyOptions::default()).unwrap_err(),
            Error::nesting("", "list")
        );
    }

    #[test]
    fn test_line_breaks_rejected() {
        let options = StringifyOptions::default();
        let cases = [
            section(&[("a", IniValue::from("x\ny=2"))]),
            section(&[("a", IniValue::from("x\r"))]),
            section(&[("a\nb", IniValue::from(1))]),
            section(&[("s", section(&[("k", IniValue::from("v\n[t]"))]))]),
            section(&[("s\n[t]", section(&[("k", IniValue::from(1))]))]),
            section(&[("list", IniValue::Array(vec![IniValue::from("a\nb")]))]),
            section(&[("raw", IniValue::Data(vec!["one\ntwo".to_string()]))]),
        ];
        for case in cases {
            let doc = doc(case);
            assert!(
                matches!(stringify_document(&doc, &options), Err(Error::UnsupportedType(_))),
                "{:?}",
                doc
            );
        }
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let doc = doc(section(&[("a", IniValue::from(1))]));
        let options = StringifyOptions::new().with_delimiter("");
        assert!(matches!(
            stringify_document(&doc, &options),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn test_value_serializer_scalars() {
        assert_eq!(to_ini_value(&None::<i32>).unwrap(), IniValue::Empty);
        assert_eq!(to_ini_value(&()).unwrap(), IniValue::Null);
        assert_eq!(to_ini_value(&7u8).unwrap(), IniValue::from(7));
        assert_eq!(
            to_ini_value(&u64::MAX).unwrap(),
            IniValue::Number(Number::Float(u64::MAX as f64))
        );
        assert!(to_ini_value(&f64::NAN).unwrap().as_number().unwrap().is_nan());
        assert_eq!(to_ini_value(&'c').unwrap(), IniValue::from("c"));
    }

    #[test]
    fn test_value_serializer_numeric_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let value = to_ini_value(&map).unwrap();
        assert_eq!(
            value.as_section().and_then(|s| s.get("2")),
            Some(&IniValue::from("two"))
        );
    }

    #[test]
    fn test_value_serializer_rejects_data_variants() {
        #[derive(Serialize)]
        enum Shape {
            Circle(f64),
        }
        assert!(matches!(
            to_ini_value(&Shape::Circle(1.0)),
            Err(Error::UnsupportedType(_))
        ));
    }
}
