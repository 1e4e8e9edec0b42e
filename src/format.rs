//! INI Format Reference
//!
//! This module documents the INI dialect read and written by this library. It
//! contains no code.
//!
//! # Lines
//!
//! Input is split on `\n`; a trailing `\r` on each line is dropped, so both LF and
//! CRLF files are accepted. Output always uses `\n` and has no trailing newline.
//!
//! Every line is trimmed and then classified:
//!
//! | Line | Meaning |
//! |------|---------|
//! | empty | skipped |
//! | starts with a comment prefix (`;` by default) | skipped |
//! | `[name]` | section header |
//! | anything inside a data section | raw data line |
//! | contains the delimiter (`=` by default) | assignment |
//! | anything else | unsupported line |
//!
//! Lines are numbered from 1, counting blank and comment lines.
//!
//! # Assignments
//!
//! ```text
//! v5 = who is who = who
//! ```
//!
//! The key is everything before the **first** delimiter and the value everything
//! after it, both trimmed. The line above sets `v5` to `who is who = who`.
//!
//! Assignments before the first header are top-level keys. After a header they
//! belong to that section.
//!
//! # Sections
//!
//! ```text
//! [smbd]
//! v1 = 5
//! ```
//!
//! The section name is the text between the leading `[` and the trailing `]`,
//! trimmed; `[]` is a section with an empty name. A line that starts with `[`
//! without ending in `]` is unsupported.
//!
//! Sections hold scalars only. A header that repeats an earlier name reopens that
//! section, and new keys are merged into it. A header that reuses the name of a
//! top-level key replaces that key.
//!
//! ## `[__proto__]`
//!
//! A section named `__proto__` is rejected with a line-numbered error, even in
//! tolerant mode. With `proto_symbol` enabled it is accepted and stored apart from
//! the regular entries, readable through `IniDocument::proto`.
//!
//! # Data Sections
//!
//! Sections named in `data_sections` keep their body as raw lines:
//!
//! ```text
//! [cert]
//!   -----BEGIN CERTIFICATE-----
//!   MIIB...
//! ```
//!
//! Lines are stored untrimmed and without interpretation, except that blank lines
//! and comment lines are still skipped.
//!
//! # Values
//!
//! With auto-typing enabled, the trimmed value text becomes:
//!
//! | Text | Value |
//! |------|-------|
//! | empty | the empty value |
//! | `true`, `FALSE`, ... | boolean |
//! | `5`, `-7`, `5.3`, `.5`, `1e3`, `0xFf0066`, `NaN` | number |
//! | `null`, `NULL`, ... | null |
//! | anything else | string, verbatim |
//!
//! Quotes have no meaning: `"a"` is the three-character string `"a"`. Values
//! cannot span lines.
//!
//! # Repeated Keys
//!
//! By default a repeated key keeps the last value. The `join-to-array` strategy
//! collects every value into an array instead:
//!
//! ```text
//! host = a
//! host = b      ; host = [a, b]
//! ```
//!
//! # Writing
//!
//! Documents are written top-level keys first, then each section in order:
//!
//! ```text
//! v1=2
//!
//! [smbd]
//! v2=true
//! ```
//!
//! - a blank line precedes every header unless `blank_line` is off;
//! - `space_before` / `space_after` pad the delimiter;
//! - an array is written as one line per element under the same key;
//! - the empty value is written as `key=`, or left out with `skip_undefined`;
//! - a section inside a section cannot be written.
//!
//! # Limitations
//!
//! - No escaping or quoting: keys cannot contain the delimiter, and nothing written
//!   can contain `\n` or `\r`. Stringifying such a document fails instead of
//!   emitting extra lines.
//! - No line continuations, includes or variable interpolation.
//! - One level of sections only.
