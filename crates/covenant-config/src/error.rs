//! Failures while resolving a [`CovenantConfig`](crate::CovenantConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Why a settings source or the resolved settings were rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `with_file` was pointed at a path that does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was given.
        path: PathBuf,
    },

    /// The settings file exists but could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path that was given.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, or a key the config does not declare.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Malformed JSON, or a key the config does not declare.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A dotenv file was missing or malformed.
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),

    /// A resolved setting is out of range.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Dotted setting name, e.g. `dispatch.base_path`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `PREFIX__SECTION__KEY` override could not be parsed.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// Full variable name.
        var: String,
        /// Expected shape of the value.
        reason: String,
    },

    /// Anything else rejected while loading, such as an unknown format.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::FileNotFound`].
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Shorthand for [`ConfigError::ReadError`].
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ConfigError::EnvParseError`].
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ConfigError::ValidationError`].
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/covenant.toml");
        assert!(err.to_string().contains("/path/to/covenant.toml"));
    }

    #[test]
    fn test_read_error_keeps_io_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::read_error("covenant.toml", io);
        assert!(err.to_string().contains("covenant.toml"));
        assert_eq!(err.source().map(ToString::to_string), Some("denied".to_string()));
    }

        #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("dispatch.base_path", "must start with '/'");
        assert!(err.to_string().contains("dispatch.base_path"));
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("COVENANT__DISPATCH__JSON_QUERY", "expected boolean");
        assert!(err.to_string().contains("COVENANT__DISPATCH__JSON_QUERY"));
        assert!(err.to_string().contains("expected boolean"));
    }

    #[test]
    fn test_validation_error() {
        let err = ConfigError::validation_error("unsupported format");
        assert!(err.to_string().contains("unsupported format"));
    }
}
