//! The parsed INI document.
//!
//! An [`IniDocument`] is an ordered map of top-level keys to [`IniValue`]s plus two
//! side channels that never collide with user keys:
//!
//! - [`IniDocument::errors`]: lines skipped in tolerant mode, in encounter order;
//! - [`IniDocument::proto`]: the body of a `[__proto__]` section, kept aside when
//!   `proto_symbol` is enabled.
//!
//! ```rust
//! use inikit::{parse_with_options, ParseOptions};
//!
//! let text = "[ok]\na = 1\ntrash\n[__proto__]\npolluted = yes";
//! let options = ParseOptions::tolerant().with_proto_symbol(true);
//! let doc = parse_with_options(text, &options).unwrap();
//!
//! assert_eq!(doc.errors().map(<[_]>::len), Some(1));
//! assert!(doc.get("__proto__").is_none());
//! assert_eq!(doc.proto().and_then(|p| p.get("polluted")).and_then(|v| v.as_str()), Some("yes"));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, IniMap, IniValue, ParsingError};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniDocument {
    entries: IniMap,
    errors: Option<Vec<ParsingError>>,
    proto: Option<IniMap>,
}

impl IniDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the top-level value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IniValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut IniValue> {
        self.entries.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: IniValue) -> Option<IniValue> {
        self.entries.insert(key.into(), value)
    }

    /// Returns the section named `name`, if it exists and is a key/value section.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::parse;
    ///
    /// let doc = parse("[server]\nport = 80").unwrap();
    /// let server = doc.section("server").unwrap();
    /// assert_eq!(server.get("port").and_then(|v| v.as_i64()), Some(80));
    /// ```
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniMap> {
        self.entries.get(name).and_then(IniValue::as_section)
    }

    /// Returns the raw lines of the data section named `name`.
    #[must_use]
    pub fn data_section(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).and_then(IniValue::as_data)
    }

    /// All top-level entries, in document order.
    #[must_use]
    pub fn entries(&self) -> &IniMap {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut IniMap {
        &mut self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> IniMap {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, IniValue> {
        self.entries.iter()
    }

    /// Lines skipped in tolerant mode. `None` when nothing was skipped.
    #[must_use]
    pub fn errors(&self) -> Option<&[ParsingError]> {
        self.errors.as_deref()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Removes and returns the tolerant-mode error list.
    pub fn take_errors(&mut self) -> Option<Vec<ParsingError>> {
        self.errors.take()
    }

    pub(crate) fn push_error(&mut self, error: ParsingError) {
        self.errors.get_or_insert_with(Vec::new).push(error);
    }

    /// The `[__proto__]` section, present only when parsed with `proto_symbol`.
    #[must_use]
    pub fn proto(&self) -> Option<&IniMap> {
        self.proto.as_ref()
    }

    pub(crate) fn take_proto(&mut self) -> Option<IniMap> {
        self.proto.take()
    }

    pub(crate) fn set_proto(&mut self, section: IniMap) {
        self.proto = Some(section);
    }
}

impl From<IniMap> for IniDocument {
    fn from(entries: IniMap) -> Self {
        IniDocument {
            entries,
            errors: None,
            proto: None,
        }
    }
}

impl TryFrom<IniValue> for IniDocument {
    type Error = Error;

    /// Accepts a section value as the document's top level.
    fn try_from(value: IniValue) -> crate::Result<Self> {
        match value {
            IniValue::Section(entries) => Ok(IniDocument::from(entries)),
            other => Err(Error::unsupported_type(&format!(
                "a document must be built from a section, found {}",
                other.kind()
            ))),
        }
    }
}

impl FromIterator<(String, IniValue)> for IniDocument {
    fn from_iter<T: IntoIterator<Item = (String, IniValue)>>(iter: T) -> Self {
        IniDocument::from(IniMap::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a IniDocument {
    type Item = (&'a String, &'a IniValue);
    type IntoIter = indexmap::map::Iter<'a, String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializes the top-level entries as a map; the side channels are not part of it.
impl Serialize for IniDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut state = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in self.entries.iter() {
            state.serialize_entry(k, v)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for IniDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match IniValue::deserialize(deserializer)? {
            IniValue::Section(entries) => Ok(IniDocument::from(entries)),
            other => Err(serde::de::Error::custom(format!(
                "expected a map of sections and keys, found {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_accessors() {
        let mut doc = IniDocument::new();
        doc.insert("a", IniValue::from(1));
        let mut section = IniMap::new();
        section.insert("b".to_string(), IniValue::from(true));
        doc.insert("s", IniValue::Section(section));
        doc.insert("d", IniValue::Data(vec!["raw".to_string()]));

        assert_eq!(doc.len(), 3);
        assert!(doc.section("a").is_none());
        assert_eq!(
            doc.section("s").and_then(|s| s.get("b")),
            Some(&IniValue::Bool(true))
        );
        assert_eq!(doc.data_section("d"), Some(&["raw".to_string()][..]));
        assert!(doc.data_section("s").is_none());
    }

    #[test]
    fn test_error_side_channel() {
        let mut doc = IniDocument::new();
        assert!(doc.errors().is_none());

        doc.push_error(ParsingError::new("trash", 4));
        doc.push_error(ParsingError::new("only trash", 7));
        assert!(doc.has_errors());
        assert_eq!(doc.errors().map(<[_]>::len), Some(2));

        let errors = doc.take_errors().unwrap();
        assert_eq!(errors[1].line_number(), 7);
        assert!(!doc.has_errors());
    }

    #[test]
    fn test_try_from_value() {
        let mut map = IniMap::new();
        map.insert("k".to_string(), IniValue::from("v"));
        let doc = IniDocument::try_from(IniValue::Section(map)).unwrap();
        assert_eq!(doc.get("k"), Some(&IniValue::from("v")));

        assert!(IniDocument::try_from(IniValue::from(1)).is_err());
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let doc: IniDocument =
            serde_json::from_str(r#"{"a": 1, "s": {"b": "x"}}"#).unwrap();
        assert_eq!(doc.section("s").and_then(|s| s.get("b")), Some(&IniValue::from("x")));

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"a":1,"s":{"b":"x"}}"#);
    }
}
