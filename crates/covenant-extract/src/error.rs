//! Extraction error types.

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Where data was being extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Path parameters (e.g., `/posts/:id`)
    Path,
    /// Query string parameters
    Query,
    /// Request body
    Body,
    /// HTTP headers
    Header,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// Error that occurs while normalizing a request part.
///
/// # Example
///
/// ```rust
/// use covenant_extract::{normalize_query, ExtractionSource, QueryMode};
///
/// // Query decoding is lenient; well-formed input never fails.
/// assert!(normalize_query(Some("a=1&b=%20"), QueryMode::Plain).is_ok());
/// # let _ = ExtractionSource::Query;
/// ```
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] serde_urlencoded::de::Error),
}

impl ExtractionError {
    /// Returns the request part the error came from.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        match self {
            Self::MalformedQuery(_) => ExtractionSource::Query,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
