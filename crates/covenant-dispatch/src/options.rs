//! Dispatcher options.
//!
//! # Example
//!
//! ```rust
//! use covenant_dispatch::DispatchOptions;
//!
//! let options = DispatchOptions::builder()
//!     .base_path("/api")
//!     .json_query(true)
//!     .response_validation(true)
//!     .error_handler(|err, req| eprintln!("{} {} failed: {err}", req.method, req.path()))
//!     .build();
//!
//! assert_eq!(options.base_path(), "/api");
//! assert!(options.json_query());
//! ```

use std::fmt;
use std::sync::Arc;

use covenant_config::DispatchSection;
use covenant_core::{DispatchError, RequestHead};
use covenant_extract::QueryMode;

/// Callback for failures after a handler was invoked.
///
/// Receives [`DispatchError::Handler`] or
/// [`DispatchError::ResponseSchemaMismatch`] together with the head of the
/// request that caused it. Used for reporting only; the dispatcher answers
/// with `500 Internal Server Error` after the callback returns.
pub type ErrorHandler = Arc<dyn Fn(&DispatchError, &RequestHead) + Send + Sync>;

/// Options for a [`Dispatcher`](crate::Dispatcher). Everything defaults to off.
#[derive(Clone, Default)]
pub struct DispatchOptions {
    base_path: String,
    json_query: bool,
    response_validation: bool,
    error_handler: Option<ErrorHandler>,
}

impl DispatchOptions {
    /// Creates a builder with default values.
    #[must_use]
    pub fn builder() -> DispatchOptionsBuilder {
        DispatchOptionsBuilder::default()
    }

    /// Builds options from the `[dispatch]` configuration section.
    ///
    /// The error handler cannot be configured from a file and stays unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use covenant_config::ConfigLoader;
    /// use covenant_dispatch::DispatchOptions;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[dispatch]\nbase_path = \"/api\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// let options = DispatchOptions::from_config(&config.dispatch);
    /// assert_eq!(options.base_path(), "/api");
    /// ```
    #[must_use]
    pub fn from_config(section: &DispatchSection) -> Self {
        Self::builder()
            .base_path(section.base_path.clone())
            .json_query(section.json_query)
            .response_validation(section.response_validation)
            .build()
    }

    /// Returns the prefix stripped from request paths before resolution.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns whether query values are decoded as JSON.
    #[must_use]
    pub fn json_query(&self) -> bool {
        self.json_query
    }

    /// Returns the query decoding mode implied by [`Self::json_query`].
    #[must_use]
    pub fn query_mode(&self) -> QueryMode {
        QueryMode::from_flag(self.json_query)
    }

    /// Returns whether handler responses are validated.
    #[must_use]
    pub fn response_validation(&self) -> bool {
        self.response_validation
    }

    /// Returns the configured error handler.
    #[must_use]
    pub fn error_handler(&self) -> Option<&ErrorHandler> {
        self.error_handler.as_ref()
    }

    /// Returns a copy of these options with a different base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

impl fmt::Debug for DispatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchOptions")
            .field("base_path", &self.base_path)
            .field("json_query", &self.json_query)
            .field("response_validation", &self.response_validation)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// Builder for [`DispatchOptions`].
#[derive(Default)]
pub struct DispatchOptionsBuilder {
    options: DispatchOptions,
}

impl DispatchOptionsBuilder {
    /// Sets the prefix stripped from request paths.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.options.base_path = base_path.into();
        self
    }

    /// Decodes query values as JSON (`?take=5` yields a number).
    #[must_use]
    pub fn json_query(mut self, enabled: bool) -> Self {
        self.options.json_query = enabled;
        self
    }

    /// Validates JSON response bodies against the declared response schemas.
    #[must_use]
    pub fn response_validation(mut self, enabled: bool) -> Self {
        self.options.response_validation = enabled;
        self
    }

    /// Sets the callback for handler failures.
    ///
    /// With a callback set, failures become `500` responses; without one,
    /// they are returned to the caller of
    /// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
    #[must_use]
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&DispatchError, &RequestHead) + Send + Sync + 'static,
    {
        self.options.error_handler = Some(Arc::new(handler));
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> DispatchOptions {
        self.options
    }
}

impl fmt::Debug for DispatchOptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchOptionsBuilder")
            .field("options", &self.options)
            .finish()
    }
}
