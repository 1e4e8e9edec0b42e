//! Error types for INI parsing and stringification.
//!
//! ## Error Categories
//!
//! - **Parsing errors**: a line that is neither blank, a comment, a section header,
//!   a data-section line nor a `key=value` assignment. Carries the trimmed line and
//!   its 1-based line number.
//! - **Proto errors**: a `[__proto__]` header while `proto_symbol` is disabled.
//! - **Nesting errors**: a document that nests sections deeper than one level.
//! - **I/O errors**: reader, writer and file helper failures.
//!
//! ## Examples
//!
//! ```rust
//! use inikit::{parse, Error};
//!
//! let err = parse("a = 1\ntrash").unwrap_err();
//! match err {
//!     Error::Parsing(e) => {
//!         assert_eq!(e.line(), "trash");
//!         assert_eq!(e.line_number(), 2);
//!     }
//!     other => panic!("unexpected error: {}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// A line the parser could not classify.
///
/// In strict mode the first one aborts parsing as [`Error::Parsing`]. In tolerant
/// mode every one of them is collected in
/// [`IniDocument::errors`](crate::IniDocument::errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported type of line: [{line_number}] \"{line}\"")]
pub struct ParsingError {
    line: String,
    line_number: usize,
}

impl ParsingError {
    pub fn new(line: impl Into<String>, line_number: usize) -> Self {
        ParsingError {
            line: line.into(),
            line_number,
        }
    }

    /// The offending line, trimmed.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based number of the offending line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Represents all possible errors that can occur while reading or writing INI text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unrecognized line in strict mode
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// `[__proto__]` header without `proto_symbol`
    #[error("Unsupported section name \"__proto__\": [{line_number}]")]
    Proto { line_number: usize },

    /// A value nested deeper than a single section level
    #[error("Too much nesting: `{key}` in section `{section}` cannot be represented in INI")]
    Nesting { section: String, key: String },

    /// Options that cannot drive a parse or stringify pass
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A value with no INI form, such as a data-carrying enum variant or a string
    /// with a line break
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parsing error for `line` at the 1-based `line_number`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::Error;
    ///
    /// let err = Error::parsing("trash", 4);
    /// assert_eq!(err.to_string(), "Unsupported type of line: [4] \"trash\"");
    /// ```
    pub fn parsing(line: &str, line_number: usize) -> Self {
        Error::Parsing(ParsingError::new(line, line_number))
    }

    pub fn proto(line_number: usize) -> Self {
        Error::Proto { line_number }
    }

    /// Creates a nesting error for `key` found inside `section`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inikit::Error;
    ///
    /// let err = Error::nesting("b", "d");
    /// assert!(err.to_string().contains("Too much nesting"));
    /// ```
    pub fn nesting(section: &str, key: &str) -> Self {
        Error::Nesting {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub fn invalid_option(msg: &str) -> Self {
        Error::InvalidOption(msg.to_string())
    }

    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader, writer and file failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The 1-based line number this error points at, if it came from the parser.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Error::Parsing(e) => Some(e.line_number()),
            Error::Proto { line_number } => Some(*line_number),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
