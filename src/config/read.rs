//! JSON document reading

use super::{Document, Origin};
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Read a file from disk and parse it as a JSON object.
///
/// A missing file is [`ConfigError::FileNotFound`]. Any other I/O failure is
/// [`ConfigError::Read`], and content that is not a JSON object is
/// [`ConfigError::Parse`] or [`ConfigError::NotAnObject`].
pub fn read_json(path: &Path) -> ConfigResult<Document> {
    let origin = Origin::External(path.to_path_buf());
    let bytes =
        read_bytes(path, &origin)?.ok_or_else(|| ConfigError::FileNotFound(path.to_path_buf()))?;
    parse_document(&bytes, origin)
}

/// Read `path`, returning `Ok(None)` when it does not exist.
///
/// Existence is decided by the read itself, so a file cannot vanish between
/// a check and the read.
pub(crate) fn read_bytes(path: &Path, origin: &Origin) -> ConfigResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read { path: origin.clone(), source }),
    }
}

/// Parse raw bytes into a top-level JSON object.
pub fn parse_document(bytes: &[u8], origin: Origin) -> ConfigResult<Document> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|source| ConfigError::Parse { path: origin.clone(), source })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(origin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::{EXIT_CONFIG_FILE, EXIT_CONFIG_FILE_NOT_EXIST};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_returns_parsed_object() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.default.json");
        fs::write(&path, r#"{"logger": {"level": "info"}, "port": 7070, "tags": ["a", null]}"#)
            .expect("write");

        let doc = read_json(&path).expect("read");
        assert_eq!(
            Value::Object(doc),
            json!({"logger": {"level": "info"}, "port": 7070, "tags": ["a", null]})
        );
    }

    #[test]
    fn test_read_json_missing_file() {
        let tmp = TempDir::new().expect("tmp");
        let err = read_json(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
        assert_eq!(err.exit_code(), EXIT_CONFIG_FILE_NOT_EXIST);
    }

    #[test]
    fn test_read_json_invalid_json() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{\"logger\": ").expect("write");

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.exit_code(), EXIT_CONFIG_FILE);
    }

    #[test]
    fn test_read_json_rejects_top_level_array() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("list.json");
        fs::write(&path, "[1, 2, 3]").expect("write");

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject(_)));
        assert_eq!(err.exit_code(), EXIT_CONFIG_FILE);
    }

    #[test]
    fn test_read_directory_is_read_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = read_json(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_read_bytes_absent_is_none() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("missing.json");
        let bytes = read_bytes(&path, &Origin::Dev(path.clone())).expect("no error");
        assert!(bytes.is_none());
    }
}
