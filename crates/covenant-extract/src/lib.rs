//! # Covenant Extract
//!
//! Request normalization for the Covenant dispatcher.
//!
//! Each structured part of a request is turned into a JSON value before it
//! is validated against the route contract:
//!
//! | Function | Source | Result |
//! |----------|--------|--------|
//! | [`params_to_map`] | Path placeholders | Object of strings |
//! | [`normalize_query`] | Query string | Object of strings, or JSON values in [`QueryMode::Json`] |
//! | [`normalize_headers`] | Headers | Object of strings, lower-case names |
//! | [`parse_body`] | Request body | [`RequestBody::Json`](covenant_core::RequestBody) or raw bytes |

#![doc(html_root_url = "https://docs.rs/covenant-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod error;
mod header;
mod path;
mod query;

pub use body::parse_body;
pub use error::{ExtractionError, ExtractionSource};
pub use header::{normalize_headers, HEADER_VALUE_SEPARATOR};
pub use path::params_to_map;
pub use query::{decode_json_value, normalize_query, QueryMode};
