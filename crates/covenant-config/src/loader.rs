//! Builds a [`CovenantConfig`] for a dispatcher.
//!
//! Settings for base path stripping, query decoding, response checking and
//! log output come from built-in defaults, a TOML or JSON file, a `.env` file
//! and prefixed environment variables.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use covenant_telemetry::LogFormat;

use crate::{ConfigError, CovenantConfig};

/// Chained builder that resolves dispatcher and logging settings.
///
/// A file or string replaces every earlier setting; sections it omits fall back
/// to their defaults. Variables from `.env` join the process environment,
/// and `PREFIX__SECTION__KEY` variables are applied last, by [`load`](Self::load).
///
/// # Example
///
/// ```no_run
/// use covenant_config::ConfigLoader;
///
/// # fn main() -> Result<(), covenant_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("covenant.toml")?
///     .with_dotenv()?
///     .with_env_prefix("COVENANT")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: CovenantConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader holding the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CovenantConfig::default(),
            env_prefix: None,
        }
    }

    /// Resets to the default settings: no base path, string query values,
    /// response checking off.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = CovenantConfig::default();
        self
    }

    /// Switches to the development preset with debug logs and response checking.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = CovenantConfig::development();
        self
    }

    /// Reads settings from a `.toml` or `.json` file, picked by extension.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or unreadable, when it does not parse,
    /// or when it names a field the config does not have.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file keeps the
    /// current settings.
    ///
    /// # Errors
    ///
    /// Fails when the file exists and cannot be used.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses settings from inline text; `format` is `"toml"` or `"json"`.
    ///
    /// # Errors
    ///
    /// Fails on any other format name or on a parse error.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [dispatch]
    ///     base_path = "/api"
    ///     json_query = true
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.dispatch.base_path, "/api");
    /// assert!(config.dispatch.json_query);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Enables overrides from `PREFIX__SECTION__KEY` variables.
    ///
    /// The prefix is upper-cased. With `"covenant"`:
    /// - `COVENANT__DISPATCH__BASE_PATH=/api`
    /// - `COVENANT__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Merges `./.env` into the process environment when it exists.
    ///
    /// Variables that are already set win over the file.
    ///
    /// # Errors
    ///
    /// Fails when `.env` exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Merges the given dotenv file into the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or malformed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Applies prefixed environment overrides, then checks the result.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable override value, on a malformed base path and
    /// on a log level the filter rejects.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().load().unwrap();
    /// assert!(!config.dispatch.response_validation);
    /// ```
    pub fn load(mut self) -> Result<CovenantConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Returns the settings as they stand, skipping overrides and checks.
    #[must_use]
    pub fn load_unvalidated(self) -> CovenantConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<CovenantConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        // Sorted so that failures are reported deterministically.
        let env_vars: BTreeMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["DISPATCH", "BASE_PATH"] => {
                self.config.dispatch.base_path = value.to_string();
            }
            ["DISPATCH", "JSON_QUERY"] => {
                self.config.dispatch.json_query = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["DISPATCH", "RESPONSE_VALIDATION"] => {
                self.config.dispatch.response_validation = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = value
                    .parse::<LogFormat>()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected 'json' or 'pretty'"))?;
            }

            // Unrecognized keys belong to other components.
            _ => {}
        }

        Ok(())
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
