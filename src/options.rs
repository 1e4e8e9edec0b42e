//! Configuration options for INI parsing and stringification.
//!
//! - [`ParseOptions`]: delimiter, comment prefixes, tolerant mode, value typing,
//!   data sections, key merge strategy and `__proto__` handling
//! - [`StringifyOptions`]: delimiter, padding, blank lines and empty-value handling
//! - [`AutoTyping`] and [`KeyMergeStrategy`]: the two pluggable policies
//!
//! ## Examples
//!
//! ```rust
//! use inikit::{parse_with_options, KeyMergeStrategy, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .with_delimiter(":")
//!     .with_comments(["#", ";"])
//!     .with_key_merge_strategy(KeyMergeStrategy::JoinToArray);
//!
//! let doc = parse_with_options("# hosts\nhost: a\nhost: b", &options).unwrap();
//! assert_eq!(doc.get("host").and_then(|v| v.as_array()).map(Vec::len), Some(2));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::typing::auto_type;
use crate::{Error, IniMap, IniValue};

/// Signature of a caller-supplied value coercer: `(raw value, section, key)`.
///
/// The section is `None` for keys above the first header.
pub type TypingFn = dyn Fn(&str, Option<&str>, &str) -> IniValue + Send + Sync;

/// Signature of a caller-supplied merge strategy: `(section, key, new value)`.
pub type MergeFn = dyn Fn(&mut IniMap, &str, IniValue) + Send + Sync;

/// How raw value strings are turned into [`IniValue`]s.
#[derive(Clone, Default)]
pub enum AutoTyping {
    /// Booleans, numbers and null are recognised; see [`auto_type`].
    #[default]
    Enabled,
    /// Every value stays the trimmed raw string.
    Disabled,
    /// A custom coercer replaces the built-in rules entirely.
    Custom(Arc<TypingFn>),
}

impl AutoTyping {
    /// Wraps a closure as a custom coercer.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&str>, &str) -> IniValue + Send + Sync + 'static,
    {
        AutoTyping::Custom(Arc::new(f))
    }

    /// Applies this policy to one raw value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::{AutoTyping, IniValue};
    ///
    /// assert_eq!(AutoTyping::Enabled.coerce("1", None, "k"), IniValue::from(1));
    /// assert_eq!(AutoTyping::Disabled.coerce("1", None, "k"), IniValue::from("1"));
    /// ```
    #[must_use]
    pub fn coerce(&self, raw: &str, section: Option<&str>, key: &str) -> IniValue {
        match self {
            AutoTyping::Enabled => auto_type(raw),
            AutoTyping::Disabled => IniValue::String(raw.to_string()),
            AutoTyping::Custom(f) => f(raw, section, key),
        }
    }
}

impl From<bool> for AutoTyping {
    fn from(enabled: bool) -> Self {
        if enabled {
            AutoTyping::Enabled
        } else {
            AutoTyping::Disabled
        }
    }
}

impl fmt::Debug for AutoTyping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoTyping::Enabled => write!(f, "Enabled"),
            AutoTyping::Disabled => write!(f, "Disabled"),
            AutoTyping::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Policy for a key assigned more than once within one section.
#[derive(Clone, Default)]
pub enum KeyMergeStrategy {
    /// The last assignment wins.
    #[default]
    Override,
    /// The first assignment is kept as a scalar; the second turns the slot into
    /// `[first, second]`; later ones append.
    JoinToArray,
    /// A custom function performs the write itself.
    Custom(Arc<MergeFn>),
}

impl KeyMergeStrategy {
    /// Wraps a closure as a custom merge strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::{parse_with_options, IniValue, KeyMergeStrategy, ParseOptions};
    ///
    /// let concat = KeyMergeStrategy::custom(|section, key, value| {
    ///     let joined = match section.get(key) {
    ///         Some(old) => format!("{}|{}", old, value),
    ///         None => value.to_string(),
    ///     };
    ///     section.insert(key.to_string(), IniValue::String(joined));
    /// });
    ///
    /// let options = ParseOptions::new().with_key_merge_strategy(concat);
    /// let doc = parse_with_options("v = 1\nv = 2", &options).unwrap();
    /// assert_eq!(doc.get("v").and_then(|v| v.as_str()), Some("1|2"));
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut IniMap, &str, IniValue) + Send + Sync + 'static,
    {
        KeyMergeStrategy::Custom(Arc::new(f))
    }

    /// Writes `key = value` into `section` according to this policy.
    pub fn merge(&self, section: &mut IniMap, key: &str, value: IniValue) {
        match self {
            KeyMergeStrategy::Override => {
                section.insert(key.to_string(), value);
            }
            KeyMergeStrategy::JoinToArray => match section.get_mut(key) {
                Some(IniValue::Array(values)) => values.push(value),
                Some(slot) => {
                    let first = std::mem::take(slot);
                    *slot = IniValue::Array(vec![first, value]);
                }
                None => {
                    section.insert(key.to_string(), value);
                }
            },
            KeyMergeStrategy::Custom(f) => f(section, key, value),
        }
    }
}

impl FromStr for KeyMergeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "override" => Ok(KeyMergeStrategy::Override),
            "join-to-array" => Ok(KeyMergeStrategy::JoinToArray),
            other => Err(Error::invalid_option(&format!(
                "unknown key merge strategy `{}`",
                other
            ))),
        }
    }
}

impl fmt::Debug for KeyMergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMergeStrategy::Override => write!(f, "Override"),
            KeyMergeStrategy::JoinToArray => write!(f, "JoinToArray"),
            KeyMergeStrategy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Configuration options for INI parsing.
///
/// # Examples
///
/// ```rust
/// use inikit::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert_eq!(options.delimiter, "=");
/// assert_eq!(options.comments, vec![";".to_string()]);
/// assert!(!options.nothrow);
///
/// let tolerant = ParseOptions::tolerant().with_data_section("blob");
/// assert!(tolerant.nothrow);
/// assert!(tolerant.is_data_section("blob"));
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub delimiter: String,
    pub comments: Vec<String>,
    pub nothrow: bool,
    pub auto_typing: AutoTyping,
    pub data_sections: Vec<String>,
    pub key_merge_strategy: KeyMergeStrategy,
    pub proto_symbol: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            delimiter: "=".to_string(),
            comments: vec![";".to_string()],
            nothrow: false,
            auto_typing: AutoTyping::default(),
            data_sections: Vec::new(),
            key_merge_strategy: KeyMergeStrategy::default(),
            proto_symbol: false,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that collect unrecognised lines instead of failing on the first.
    #[must_use]
    pub fn tolerant() -> Self {
        ParseOptions {
            nothrow: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Replaces the comment prefixes with a single one.
    #[must_use]
    pub fn with_comment(mut self, prefix: impl Into<String>) -> Self {
        self.comments = vec![prefix.into()];
        self
    }

    /// Replaces the comment prefixes; every one of them is active at once.
    #[must_use]
    pub fn with_comments<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = prefixes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_nothrow(mut self, nothrow: bool) -> Self {
        self.nothrow = nothrow;
        self
    }

    /// Sets the typing policy; `true`/`false` map to enabled/disabled.
    #[must_use]
    pub fn with_auto_typing(mut self, auto_typing: impl Into<AutoTyping>) -> Self {
        self.auto_typing = auto_typing.into();
        self
    }

    #[must_use]
    pub fn with_data_section(mut self, name: impl Into<String>) -> Self {
        self.data_sections.push(name.into());
        self
    }

    #[must_use]
    pub fn with_data_sections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_sections.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_key_merge_strategy(mut self, strategy: KeyMergeStrategy) -> Self {
        self.key_merge_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_proto_symbol(mut self, proto_symbol: bool) -> Self {
        self.proto_symbol = proto_symbol;
        self
    }

    /// Returns `true` if `line` starts with any non-empty comment prefix.
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        self.comments
            .iter()
            .any(|prefix| !prefix.is_empty() && line.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_data_section(&self, name: &str) -> bool {
        self.data_sections.iter().any(|s| s == name)
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_option("delimiter must not be empty"));
        }
        Ok(())
    }
}

/// Configuration options for INI stringification.
///
/// # Examples
///
/// ```rust
/// use inikit::StringifyOptions;
///
/// let options = StringifyOptions::new()
///     .with_delimiter(":")
///     .with_blank_line(false)
///     .with_space_after(true);
/// assert_eq!(options.format_pair("v1", "2"), "v1: 2");
/// ```
#[derive(Clone, Debug)]
pub struct StringifyOptions {
    pub delimiter: String,
    pub blank_line: bool,
    pub space_before: bool,
    pub space_after: bool,
    pub skip_undefined: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            delimiter: "=".to_string(),
            blank_line: true,
            space_before: false,
            space_after: false,
            skip_undefined: false,
        }
    }
}

impl StringifyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets whether a blank line precedes every section header.
    #[must_use]
    pub fn with_blank_line(mut self, blank_line: bool) -> Self {
        self.blank_line = blank_line;
        self
    }

    #[must_use]
    pub fn with_space_before(mut self, space_before: bool) -> Self {
        self.space_before = space_before;
        self
    }

    #[must_use]
    pub fn with_space_after(mut self, space_after: bool) -> Self {
        self.space_after = space_after;
        self
    }

    /// Sets whether empty values are left out instead of written as `key=`.
    #[must_use]
    pub fn with_skip_undefined(mut self, skip_undefined: bool) -> Self {
        self.skip_undefined = skip_undefined;
        self
    }

    /// Formats one `key<delimiter>value` line with the configured padding.
    #[must_use]
    pub fn format_pair(&self, key: &str, value: &str) -> String {
        let mut line = String::with_capacity(key.len() + self.delimiter.len() + value.len() + 2);
        line.push_str(key);
        if self.space_before {
            line.push(' ');
        }
        line.push_str(&self.delimiter);
        if self.space_after {
            line.push(' ');
        }
        line.push_str(value);
        line
    }
}
