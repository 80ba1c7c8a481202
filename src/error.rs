//! Configuration errors and their exit codes

use crate::config::{Origin, Section};
use crate::exit_codes::{
    EXIT_CONFIG_FILE, EXIT_CONFIG_FILE_NOT_EXIST, EXIT_CONFIG_HTTP, EXIT_CONFIG_LOGGER,
    EXIT_CONFIG_STATIC, EXIT_ERROR,
};
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while resolving or reading configuration.
///
/// None of these are retried by the loader. The binary maps each one to an
/// exit code through [`ConfigError::exit_code`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The config file does not exist: no tier provided both {defaults} and {environment}")]
    NoConfigSource { defaults: String, environment: String },

    #[error("File: {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Read file: {path} failed: {source}")]
    Read {
        path: Origin,
        #[source]
        source: std::io::Error,
    },

    #[error("Unmarshal file: {path} failed: {source}")]
    Parse {
        path: Origin,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file: {0} is not a JSON object")]
    NotAnObject(Origin),

    #[error("Get {0} config error: section is missing or not an object")]
    Section(Section),

    #[error("Invalid {key} config: {source}")]
    Extract {
        key: String,
        #[source]
        source: Box<figment::Error>,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// The process exit code this error terminates with at the binary boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::NoConfigSource { .. } | ConfigError::FileNotFound(_) => {
                EXIT_CONFIG_FILE_NOT_EXIST
            }
            ConfigError::Read { .. } | ConfigError::Parse { .. } | ConfigError::NotAnObject(_) => {
                EXIT_CONFIG_FILE
            }
            ConfigError::Section(Section::Logger) => EXIT_CONFIG_LOGGER,
            ConfigError::Section(Section::Http) => EXIT_CONFIG_HTTP,
            ConfigError::Section(Section::Static) => EXIT_CONFIG_STATIC,
            ConfigError::Extract { .. } => EXIT_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_section_has_its_own_code() {
        let codes = [Section::Logger, Section::Http, Section::Static]
            .map(|s| ConfigError::Section(s).exit_code());
        assert_eq!(codes, [EXIT_CONFIG_LOGGER, EXIT_CONFIG_HTTP, EXIT_CONFIG_STATIC]);
    }

    #[test]
    fn test_missing_file_and_no_source_share_code() {
        let missing = ConfigError::FileNotFound(PathBuf::from("nope.json"));
        let none = ConfigError::NoConfigSource {
            defaults: "a.json".to_string(),
            environment: "b.json".to_string(),
        };
        assert_eq!(missing.exit_code(), EXIT_CONFIG_FILE_NOT_EXIST);
        assert_eq!(none.exit_code(), EXIT_CONFIG_FILE_NOT_EXIST);
    }

    #[test]
    fn test_parse_error_message_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::Parse { path: Origin::External(PathBuf::from("x.json")), source };
        assert!(err.to_string().contains("x.json"));
        assert_eq!(err.exit_code(), EXIT_CONFIG_FILE);
    }
}
