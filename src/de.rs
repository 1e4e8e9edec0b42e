//! INI parsing and deserialization.
//!
//! The parser makes a single top-to-bottom pass over the input and classifies each
//! physical line, after trimming, as one of:
//!
//! - blank or comment: skipped;
//! - section header `[name]`: opens a section, or a data section when the name is
//!   listed in [`ParseOptions::data_sections`];
//! - data line: any line inside a data section, stored raw and untrimmed;
//! - assignment `key = value`: split at the first delimiter, typed and merged into
//!   the current section;
//! - anything else: a [`ParsingError`].
//!
//! ## Usage
//!
//! ```rust
//! use inikit::{parse, IniValue};
//!
//! let doc = parse("v5 = who is who = who\n[smbd]\nv1 = 5").unwrap();
//! assert_eq!(doc.get("v5"), Some(&IniValue::from("who is who = who")));
//! assert_eq!(doc.section("smbd").and_then(|s| s.get("v1")), Some(&IniValue::from(5)));
//! ```
//!
//! The [`Deserializer`] runs the same pass and then maps the document onto any
//! `Deserialize` type:
//!
//! ```rust
//! use inikit::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, server: Server }
//!
//! let config: Config = from_str("name = demo\n[server]\nhost = localhost\nport = 8080").unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```

use crate::typing::auto_type;
use crate::{
    AutoTyping, Error, IniDocument, IniMap, IniValue, KeyMergeStrategy, Number, ParseOptions,
    ParsingError, Result,
};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Section name that is kept out of the regular entries.
pub(crate) const PROTO_SECTION: &str = "__proto__";

/// The INI deserializer.
///
/// Parses INI text into an [`IniDocument`] and maps that document onto Rust values
/// implementing `Deserialize`. Created via [`Deserializer::from_str`] or
/// [`Deserializer::with_options`].
///
/// [`Deserializer::from_str`] keeps every value as its exact text and collects
/// repeated keys into sequences, so `Vec` fields written by [`crate::to_string`]
/// come back intact and a `String` field holding `007` is not turned into `7`.
/// Numeric and boolean fields are typed on demand.
pub struct Deserializer<'de> {
    input: &'de str,
    options: ParseOptions,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        let options = ParseOptions::new()
            .with_auto_typing(AutoTyping::Disabled)
            .with_key_merge_strategy(KeyMergeStrategy::JoinToArray);
        Deserializer::with_options(input, options)
    }

    pub fn with_options(input: &'de str, options: ParseOptions) -> Self {
        Deserializer { input, options }
    }

    /// Runs the parser without mapping the result onto a Rust type.
    pub fn parse_document(&self) -> Result<IniDocument> {
        parse_document(self.input, &self.options)
    }

    fn into_value(&self) -> Result<IniValue> {
        self.parse_document()
            .map(|doc| IniValue::Section(doc.into_entries()))
    }
}

pub(crate) fn parse_document(input: &str, options: &ParseOptions) -> Result<IniDocument> {
    options.validate()?;
    tracing::debug!(bytes = input.len(), "parsing ini document");

    let mut parser = LineParser::new(options);
    for (index, raw) in input.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        parser.parse_line(raw, index + 1)?;
    }
    let document = parser.finish();

    tracing::debug!(
        entries = document.len(),
        errors = document.errors().map_or(0, <[_]>::len),
        "parsed ini document"
    );
    Ok(document)
}

/// Where assignments currently land.
enum Scope {
    Global,
    Section { name: String, entries: IniMap },
    Data { name: String, lines: Vec<String> },
    Proto(IniMap),
}

impl Scope {
    fn name(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Section { name, .. } | Scope::Data { name, .. } => Some(name),
            Scope::Proto(_) => Some(PROTO_SECTION),
        }
    }
}

/// Single-pass line classifier.
///
/// The open section is held outside the document while its lines are read, and is
/// written back into its reserved slot when the next header or the end of input is
/// reached.
struct LineParser<'o> {
    options: &'o ParseOptions,
    document: IniDocument,
    scope: Scope,
}

impl<'o> LineParser<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        LineParser {
            options,
            document: IniDocument::new(),
            scope: Scope::Global,
        }
    }

    fn parse_line(&mut self, raw: &str, line_number: usize) -> Result<()> {
        let line = raw.trim();
        if line.is_empty() || self.options.is_comment(line) {
            return Ok(());
        }

        if line.starts_with('[') {
            return match section_name(line) {
                Some(name) => self.open_section(name, line_number),
                None => self.reject(line, line_number),
            };
        }

        let options = self.options;
        let (section, target) = match &mut self.scope {
            Scope::Data { lines, .. } => {
                lines.push(raw.to_string());
                return Ok(());
            }
            Scope::Global => (None, self.document.entries_mut()),
            Scope::Section { name, entries } => (Some(name.as_str()), entries),
            Scope::Proto(entries) => (Some(PROTO_SECTION), entries),
        };

        let delimiter = options.delimiter.as_str();
        let Some(pos) = line.find(delimiter) else {
            return self.reject(line, line_number);
        };

        let key = line[..pos].trim();
        let raw_value = line[pos + delimiter.len()..].trim();
        let value = options.auto_typing.coerce(raw_value, section, key);
        options.key_merge_strategy.merge(target, key, value);
        Ok(())
    }

    fn open_section(&mut self, name: &str, line_number: usize) -> Result<()> {
        if name == PROTO_SECTION && !self.options.proto_symbol {
            return Err(Error::proto(line_number));
        }

        self.close_scope();
        tracing::trace!(section = name, line_number, "opening section");

        self.scope = if name == PROTO_SECTION {
            Scope::Proto(self.document.take_proto().unwrap_or_default())
        } else {
            // Reserving the slot now fixes the section's position in document order.
            let previous = self.document.insert(name, IniValue::Empty);
            if self.options.is_data_section(name) {
                let lines = match previous {
                    Some(IniValue::Data(lines)) => lines,
                    _ => Vec::new(),
                };
                Scope::Data {
                    name: name.to_string(),
                    lines,
                }
            } else {
                let entries = match previous {
                    Some(IniValue::Section(entries)) => entries,
                    _ => IniMap::new(),
                };
                Scope::Section {
                    name: name.to_string(),
                    entries,
                }
            }
        };
        Ok(())
    }

    fn close_scope(&mut self) {
        match std::mem::replace(&mut self.scope, Scope::Global) {
            Scope::Global => {}
            Scope::Section { name, entries } => {
                self.document.insert(name, IniValue::Section(entries));
            }
            Scope::Data { name, lines } => {
                self.document.insert(name, IniValue::Data(lines));
            }
            Scope::Proto(entries) => self.document.set_proto(entries),
        }
    }

    fn reject(&mut self, line: &str, line_number: usize) -> Result<()> {
        let error = ParsingError::new(line, line_number);
        if !self.options.nothrow {
            return Err(error.into());
        }
        tracing::debug!(
            line_number,
            line,
            section = self.scope.name(),
            "skipping unsupported line"
        );
        self.document.push_error(error);
        Ok(())
    }

    fn finish(mut self) -> IniDocument {
        self.close_scope();
        self.document
    }
}

/// Text between the leading `[` and the trailing `]`, trimmed.
fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.into_value()?).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.into_value()?).deserialize_option(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<IniValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<IniValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }

    fn from_lines(lines: Vec<String>) -> Self {
        SeqDeserializer::new(lines.into_iter().map(IniValue::String).collect())
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, IniValue>,
    value: Option<IniValue>,
}

impl MapDeserializer {
    fn new(map: IniMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(IniValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Maps one [`IniValue`] onto a `Deserialize` type.
///
/// INI text carries no type annotations, so the mapping is lenient: scalars read as
/// strings through their textual form, strings are re-typed when a number or bool is
/// requested, and a single scalar reads as a one-element sequence.
pub(crate) struct ValueDeserializer {
    value: IniValue,
}

impl ValueDeserializer {
    pub(crate) fn new(value: IniValue) -> Self {
        ValueDeserializer { value }
    }

    fn retyped(self) -> Self {
        match self.value {
            IniValue::String(s) => ValueDeserializer::new(auto_type(&s)),
            value => ValueDeserializer::new(value),
        }
    }
}

macro_rules! deserialize_retyped {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.retyped().deserialize_any(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Empty => visitor.visit_none(),
            IniValue::Null => visitor.visit_unit(),
            IniValue::Bool(b) => visitor.visit_bool(b),
            IniValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            IniValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            IniValue::Number(Number::NaN) => visitor.visit_f64(f64::NAN),
            IniValue::String(s) => visitor.visit_string(s),
            IniValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            IniValue::Section(map) => visitor.visit_map(MapDeserializer::new(map)),
            IniValue::Data(lines) => visitor.visit_seq(SeqDeserializer::from_lines(lines)),
        }
    }

    deserialize_retyped! {
        deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::String(s) => visitor.visit_string(s),
            scalar if scalar.is_scalar() => visitor.visit_string(scalar.to_string()),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Empty | IniValue::Null => visitor.visit_none(),
            IniValue::String(s) if s.is_empty() => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Empty | IniValue::Null => visitor.visit_unit(),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            IniValue::Data(lines) => visitor.visit_seq(SeqDeserializer::from_lines(lines)),
            IniValue::Empty => visitor.visit_seq(SeqDeserializer::new(Vec::new())),
            IniValue::String(s) if s.is_empty() => {
                visitor.visit_seq(SeqDeserializer::new(Vec::new()))
            }
            IniValue::Section(map) => visitor.visit_map(MapDeserializer::new(map)),
            scalar => visitor.visit_seq(SeqDeserializer::new(vec![scalar])),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            IniValue::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected a unit variant name, found {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bytes byte_buf map struct identifier
    }
}
