//! Dynamic value representation for INI data.
//!
//! ## Core Types
//!
//! - [`IniValue`]: any value an INI document can hold (empty marker, null, bool,
//!   number, string, joined array, section, data section)
//! - [`Number`]: an integer, a float, or `NaN`
//!
//! ## Creating Values
//!
//! ```rust
//! use inikit::{ini, IniValue};
//!
//! let empty = IniValue::Empty;
//! let boolean = IniValue::from(true);
//! let number = IniValue::from(42);
//! let text = IniValue::from("hello");
//!
//! let section = ini!({
//!     "host": "localhost",
//!     "port": 8080
//! });
//! assert!(section.is_section());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use inikit::IniValue;
//! use std::convert::TryFrom;
//!
//! let value = IniValue::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::IniMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any value found in an INI document.
///
/// Scalars (`Empty`, `Null`, `Bool`, `Number`, `String`) are what the type coercion
/// step produces. `Array` appears when the `join-to-array` merge strategy sees a key
/// repeated. `Section` and `Data` only ever sit at the top level of a document.
///
/// # Examples
///
/// ```rust
/// use inikit::{IniValue, Number};
///
/// let num = IniValue::Number(Number::Integer(42));
/// let text = IniValue::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// assert!(IniValue::Empty.is_empty_value());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum IniValue {
    /// An explicit empty value (`key =`), distinct from an absent key.
    #[default]
    Empty,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<IniValue>),
    Section(IniMap),
    /// Raw lines of a data section, untrimmed and unparsed.
    Data(Vec<String>),
}

/// A numeric INI value.
///
/// # Examples
///
/// ```rust
/// use inikit::Number;
///
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
/// assert_eq!(Number::NaN.to_string(), "NaN");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    NaN,
}

impl Number {
    /// Wraps a float, mapping `f64::NAN` onto [`Number::NaN`].
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else {
            Number::Float(value)
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Number::NaN)
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Floats qualify when they have no fractional part and fit in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::Number;
    ///
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::NaN.as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            Number::NaN => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_infinite() => {
                if fl.is_sign_positive() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            Number::Float(fl) => write!(f, "{}", fl),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

impl IniValue {
    /// Returns `true` for the explicit empty-value marker.
    #[inline]
    #[must_use]
    pub const fn is_empty_value(&self) -> bool {
        matches!(self, IniValue::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, IniValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, IniValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, IniValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, IniValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, IniValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, IniValue::Section(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, IniValue::Data(_))
    }

    /// Returns `true` if the value fits on the right-hand side of a single
    /// `key=value` line.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            IniValue::Empty
                | IniValue::Null
                | IniValue::Bool(_)
                | IniValue::Number(_)
                | IniValue::String(_)
        )
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::IniValue;
    ///
    /// assert_eq!(IniValue::Bool(true).as_bool(), Some(true));
    /// assert_eq!(IniValue::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            IniValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IniValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            IniValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            IniValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IniValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<IniValue>> {
        match self {
            IniValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_section(&self) -> Option<&IniMap> {
        match self {
            IniValue::Section(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_section_mut(&mut self) -> Option<&mut IniMap> {
        match self {
            IniValue::Section(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a data section, returns its raw lines.
    #[inline]
    #[must_use]
    pub fn as_data(&self) -> Option<&[String]> {
        match self {
            IniValue::Data(lines) => Some(lines),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            IniValue::Empty => "empty value",
            IniValue::Null => "null",
            IniValue::Bool(_) => "boolean",
            IniValue::Number(_) => "number",
            IniValue::String(_) => "string",
            IniValue::Array(_) => "array",
            IniValue::Section(_) => "section",
            IniValue::Data(_) => "data section",
        }
    }
}

/// Scalars render the way they appear on the right of a `key=value` line.
impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniValue::Empty => Ok(()),
            IniValue::Null => write!(f, "null"),
            IniValue::Bool(b) => write!(f, "{}", b),
            IniValue::Number(n) => write!(f, "{}", n),
            IniValue::String(s) => write!(f, "{}", s),
            IniValue::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            IniValue::Section(map) => write!(f, "{{section of {}}}", map.len()),
            IniValue::Data(lines) => write!(f, "{{data of {} lines}}", lines.len()),
        }
    }
}

impl Serialize for IniValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            IniValue::Empty => serializer.serialize_none(),
            IniValue::Null => serializer.serialize_unit(),
            IniValue::Bool(b) => serializer.serialize_bool(*b),
            IniValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            IniValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            IniValue::Number(Number::NaN) => serializer.serialize_f64(f64::NAN),
            IniValue::String(s) => serializer.serialize_str(s),
            IniValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            IniValue::Section(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
            IniValue::Data(lines) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(lines.len()))?;
                for line in lines {
                    seq.serialize_element(line)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for IniValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IniValueVisitor;

        impl<'de> Visitor<'de> for IniValueVisitor {
            type Value = IniValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid INI value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(IniValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(IniValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(IniValue::Number(Number::Integer(value as i64)))
                } else {
                    Ok(IniValue::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(IniValue::Number(Number::from_f64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(IniValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(IniValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(IniValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(IniValue::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(IniValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = IniMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(IniValue::Section(values))
            }
        }

        deserializer.deserialize_any(IniValueVisitor)
    }
}

impl TryFrom<IniValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        match &value {
            IniValue::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<IniValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        match value {
            IniValue::Number(n) => Ok(n.as_f64()),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<IniValue> for bool {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        match value {
            IniValue::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<IniValue> for String {
    type Error = crate::Error;

    fn try_from(value: IniValue) -> crate::Result<Self> {
        match value {
            IniValue::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<bool> for IniValue {
    fn from(value: bool) -> Self {
        IniValue::Bool(value)
    }
}

impl From<i32> for IniValue {
    fn from(value: i32) -> Self {
        IniValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for IniValue {
    fn from(value: i64) -> Self {
        IniValue::Number(Number::Integer(value))
    }
}

impl From<u32> for IniValue {
    fn from(value: u32) -> Self {
        IniValue::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for IniValue {
    fn from(value: f64) -> Self {
        IniValue::Number(Number::from_f64(value))
    }
}

impl From<Number> for IniValue {
    fn from(value: Number) -> Self {
        IniValue::Number(value)
    }
}

impl From<String> for IniValue {
    fn from(value: String) -> Self {
        IniValue::String(value)
    }
}

impl From<&str> for IniValue {
    fn from(value: &str) -> Self {
        IniValue::String(value.to_string())
    }
}

impl From<Vec<IniValue>> for IniValue {
    fn from(value: Vec<IniValue>) -> Self {
        IniValue::Array(value)
    }
}

impl From<IniMap> for IniValue {
    fn from(value: IniMap) -> Self {
        IniValue::Section(value)
    }
}

impl<T: Into<IniValue>> From<Option<T>> for IniValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(IniValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let value = IniValue::Number(Number::Float(42.0));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        let value = IniValue::Number(Number::Float(42.5));
        assert!(i64::try_from(value).is_err());

        let value = IniValue::String("test".to_string());
        assert!(i64::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_scalars() {
        assert_eq!(f64::try_from(IniValue::from(2)).unwrap(), 2.0);
        assert!(bool::try_from(IniValue::Bool(true)).unwrap());
        assert!(bool::try_from(IniValue::from(1)).is_err());
        assert_eq!(String::try_from(IniValue::from("hi")).unwrap(), "hi");
        assert!(String::try_from(IniValue::Empty).is_err());
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(IniValue::Empty.to_string(), "");
        assert_eq!(IniValue::Null.to_string(), "null");
        assert_eq!(IniValue::Bool(false).to_string(), "false");
        assert_eq!(IniValue::from(2.5).to_string(), "2.5");
        assert_eq!(IniValue::from(5.0).to_string(), "5");
        assert_eq!(IniValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(IniValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(IniValue::from("who is who = who").to_string(), "who is who = who");
    }

    #[test]
    fn test_nan_is_normalized() {
        assert_eq!(IniValue::from(f64::NAN), IniValue::Number(Number::NaN));
        assert!(Number::from(f64::NAN).is_nan());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(IniValue::from(None::<i32>), IniValue::Empty);
        assert_eq!(IniValue::from(Some("x")), IniValue::from("x"));
    }

    #[test]
    fn test_scalar_classification() {
        assert!(IniValue::Empty.is_scalar());
        assert!(IniValue::Null.is_scalar());
        assert!(!IniValue::Array(vec![]).is_scalar());
        assert!(!IniValue::Section(IniMap::new()).is_scalar());
        assert!(!IniValue::Data(vec![]).is_scalar());
        assert_eq!(IniValue::Data(vec![]).kind(), "data section");
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({ "a": 1, "b": { "c": "x", "d": null } });
        let value: IniValue = serde_json::from_value(json).unwrap();
        let section = value.as_section().unwrap();
        assert_eq!(section.get("a"), Some(&IniValue::from(1)));
        let inner = section.get("b").and_then(IniValue::as_section).unwrap();
        assert_eq!(inner.get("d"), Some(&IniValue::Null));
    }
}
