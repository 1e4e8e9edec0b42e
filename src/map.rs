//! Ordered map type for INI sections.
//!
//! [`IniMap`] wraps an [`IndexMap`] so sections and keys keep the order in which the
//! parser met them. Order carries no meaning in INI, but it makes stringification
//! deterministic: a parsed document is written back in its original key order.
//!
//! ## Examples
//!
//! ```rust
//! use inikit::{IniMap, IniValue};
//!
//! let mut map = IniMap::new();
//! map.insert("name".to_string(), IniValue::from("Alice"));
//! map.insert("age".to_string(), IniValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::IniValue;

/// An insertion-ordered map of string keys to INI values.
///
/// # Examples
///
/// ```rust
/// use inikit::{IniMap, IniValue};
///
/// let mut map = IniMap::new();
/// map.insert("first".to_string(), IniValue::from(1));
/// map.insert("second".to_string(), IniValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniMap(IndexMap<String, IniValue>);

impl IniMap {
    #[must_use]
    pub fn new() -> Self {
        IniMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IniMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Re-inserting an existing key replaces its value in place and returns the old
    /// one; the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::{IniMap, IniValue};
    ///
    /// let mut map = IniMap::new();
    /// assert!(map.insert("key".to_string(), IniValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), IniValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: IniValue) -> Option<IniValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IniValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut IniValue> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<IniValue> {
        self.0.shift_remove(key)
    }

    /// Returns the entry for `key`, for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::{IniMap, IniValue};
    ///
    /// let mut map = IniMap::new();
    /// map.entry("hits".to_string()).or_insert(IniValue::from(0));
    /// assert_eq!(map.get("hits").and_then(|v| v.as_i64()), Some(0));
    /// ```
    pub fn entry(&mut self, key: String) -> indexmap::map::Entry<'_, String, IniValue> {
        self.0.entry(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, IniValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, IniValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, IniValue> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, IniValue> {
        self.0.iter_mut()
    }
}

impl From<HashMap<String, IniValue>> for IniMap {
    fn from(map: HashMap<String, IniValue>) -> Self {
        IniMap(map.into_iter().collect())
    }
}

impl From<IniMap> for HashMap<String, IniValue> {
    fn from(map: IniMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for IniMap {
    type Item = (String, IniValue);
    type IntoIter = indexmap::map::IntoIter<String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IniMap {
    type Item = (&'a String, &'a IniValue);
    type IntoIter = indexmap::map::Iter<'a, String, IniValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, IniValue)> for IniMap {
    fn from_iter<T: IntoIterator<Item = (String, IniValue)>>(iter: T) -> Self {
        IniMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut map = IniMap::new();
        map.insert("a".to_string(), IniValue::from(1));
        map.insert("b".to_string(), IniValue::from(2));
        map.insert("a".to_string(), IniValue::from(3));

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&IniValue::from(3)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: IniMap = vec![
            ("a".to_string(), IniValue::from(1)),
            ("b".to_string(), IniValue::from(2)),
            ("c".to_string(), IniValue::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove("a"), Some(IniValue::from(1)));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);
        assert!(!map.contains_key("a"));
    }
}
