//! Reading and writing INI files.

use std::path::Path;

use crate::{
    parse_with_options, stringify_with_options, Error, IniDocument, ParseOptions, Result,
    StringifyOptions,
};

/// Reads the file at `path` and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read as UTF-8 text, and otherwise
/// the errors of [`parse_with_options`](crate::parse_with_options).
pub fn read_ini_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<IniDocument> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading ini file");
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    parse_with_options(&text, options)
}

/// Stringifies `doc` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written, and otherwise the errors of
/// [`stringify_with_options`](crate::stringify_with_options). Nothing is written
/// when stringification fails.
pub fn write_ini_file<P: AsRef<Path>>(
    path: P,
    doc: &IniDocument,
    options: &StringifyOptions,
) -> Result<()> {
    let path = path.as_ref();
    let text = stringify_with_options(doc, options)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "writing ini file");
    std::fs::write(path, text).map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ini, IniValue};

    const COLON_INI: &str = "v1 : 2
v-2:true
v 3 : string
[smbd]
v1:5
v2 : what
#comment
v5 : who is who = who

[test scope with spaces]
mgm*1  : 2.5";

    fn colon_doc() -> IniDocument {
        IniDocument::try_from(ini!({
            "v1": 2,
            "v-2": true,
            "v 3": "string",
            "smbd": { "v1": 5, "v2": "what", "v5": "who is who = who" },
            "test scope with spaces": { "mgm*1": 2.5 }
        }))
        .unwrap()
    }

    #[test]
    fn test_read_ini_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ini");
        std::fs::write(&path, COLON_INI).unwrap();

        let options = ParseOptions::new().with_comment("#").with_delimiter(":");
        let doc = read_ini_file(&path, &options).unwrap();
        assert_eq!(doc, colon_doc());
    }

    #[test]
    fn test_write_ini_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ini");

        let options = StringifyOptions::new()
            .with_blank_line(false)
            .with_delimiter(":")
            .with_space_after(true)
            .with_space_before(false);
        write_ini_file(&path, &colon_doc(), &options).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "v1: 2\nv-2: true\nv 3: string\n[smbd]\nv1: 5\nv2: what\nv5: who is who = who\n[test scope with spaces]\nmgm*1: 2.5"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            read_ini_file(dir.path().join("absent.ini"), &ParseOptions::default()).unwrap_err();
        match err {
            Error::Io(msg) => assert!(msg.contains("absent.ini")),
            other => panic!("Expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_stringify_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.ini");

        let mut inner = crate::IniMap::new();
        inner.insert("x".to_string(), IniValue::Section(crate::IniMap::new()));
        let mut doc = IniDocument::new();
        doc.insert("s", IniValue::Section(inner));

        assert!(write_ini_file(&path, &doc, &StringifyOptions::default()).is_err());
        assert!(!path.exists());
    }
}
