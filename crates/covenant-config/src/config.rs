//! Configuration types.
//!
//! [`CovenantConfig`] is the root of the configuration tree. Every section
//! rejects unknown fields, so typos in a config file fail loudly.

use serde::{Deserialize, Serialize};

use covenant_telemetry::logging::create_env_filter;
use covenant_telemetry::{LogConfig, LogFormat};

use crate::ConfigError;

/// Complete Covenant configuration.
///
/// # Example
///
/// ```
/// use covenant_config::CovenantConfig;
///
/// let config = CovenantConfig::default();
/// assert_eq!(config.dispatch.base_path, "");
/// assert!(!config.dispatch.json_query);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CovenantConfig {
    /// Dispatcher settings.
    #[serde(default)]
    pub dispatch: DispatchSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl CovenantConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `dispatch.base_path` is not empty and does not start with `/`
    /// - `dispatch.base_path` ends with `/` (other than `/` itself)
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_path = &self.dispatch.base_path;
        if !base_path.is_empty() && !base_path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "dispatch.base_path",
                format!("must start with '/': {base_path}"),
            ));
        }
        if base_path.len() > 1 && base_path.ends_with('/') {
            return Err(ConfigError::invalid_value(
                "dispatch.base_path",
                format!("must not end with '/': {base_path}"),
            ));
        }

        if let Err(e) = create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Debug-level pretty logs, JSON query decoding and response validation
    /// enabled.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::CovenantConfig;
    ///
    /// let config = CovenantConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// assert!(config.dispatch.response_validation);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            dispatch: DispatchSection {
                base_path: String::new(),
                json_query: true,
                response_validation: true,
            },
            logging: LoggingSection {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

/// Dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct DispatchSection {
    /// Prefix stripped from every request path before route matching.
    pub base_path: String,

    /// Decode every query value as JSON.
    pub json_query: bool,

    /// Validate JSON responses against the contract.
    pub response_validation: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingSection {
    /// Filter directive (e.g., "info", "covenant_dispatch=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingSection {
    /// Converts this section into a logging configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::new(self.level.clone(), self.format)
    }
}
