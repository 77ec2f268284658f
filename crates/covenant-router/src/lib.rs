//! Path template matching for Covenant.
//!
//! Route contracts declare their paths as templates made of literal segments
//! and `:name` placeholders. This crate parses those templates, matches
//! concrete request paths against them and extracts the placeholder values.
//!
//! # Matching rules
//!
//! - Template and path are split on `/`; empty segments are discarded
//! - Segment counts must be equal (no wildcard or variadic segments)
//! - A placeholder matches any non-empty segment
//! - A literal matches only the identical segment (case-sensitive)
//!
//! # Example
//!
//! ```rust
//! use covenant_router::{PathTemplate, matches};
//!
//! assert!(matches("/posts/:id", "/posts/1"));
//! assert!(!matches("/posts/:id", "/posts"));
//!
//! let template = PathTemplate::parse("/posts/:id");
//! let params = template.extract_params("/posts/1");
//! assert_eq!(params.get("id"), Some("1"));
//! ```

mod params;
mod template;

pub use params::Params;
pub use template::{
    extract_params, matches, PathTemplate, Segment, TemplateShape, PLACEHOLDER_MARKER,
};
