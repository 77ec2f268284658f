//! Path templates with `:name` placeholder segments.
//!
//! A template such as `/posts/:id/comments` is split into segments on `/`.
//! Empty segments (leading, trailing or doubled separators) are discarded on
//! both the template and the request path, so `/posts/1/` and `posts//1`
//! both match `/posts/:id`.

use crate::Params;
use std::fmt;

/// Marker that introduces a placeholder segment.
pub const PLACEHOLDER_MARKER: char = ':';

/// A single segment of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal segment that must match exactly (case-sensitive).
    Literal(String),
    /// A named placeholder (`:name`) matching any non-empty segment.
    Placeholder(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(PLACEHOLDER_MARKER) {
            Some(name) => Self::Placeholder(name.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }

    fn accepts(&self, actual: &str) -> bool {
        match self {
            Self::Literal(lit) => lit == actual,
            Self::Placeholder(_) => !actual.is_empty(),
        }
    }
}

/// The placeholder-name-free pattern of a template.
///
/// Two templates with equal shapes match exactly the same set of paths:
/// `/posts/:id` and `/posts/:slug` share a shape, `/posts/new` does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateShape(Vec<Option<String>>);

impl TemplateShape {
    /// Returns the number of segments in the shape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root shape (`/`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed path template.
///
/// # Example
///
/// ```rust
/// use covenant_router::PathTemplate;
///
/// let template = PathTemplate::parse("/posts/:id/comments/:commentId");
///
/// assert!(template.matches("/posts/1/comments/7"));
/// assert!(!template.matches("/posts/1/comments"));
///
/// let params = template.extract_params("/posts/1/comments/7");
/// assert_eq!(params.get("id"), Some("1"));
/// assert_eq!(params.get("commentId"), Some("7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template string.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        Self {
            raw: template.to_string(),
            segments: split_segments(template).map(Segment::parse).collect(),
        }
    }

    /// Returns the template as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the placeholder names in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the request path matches this template.
    ///
    /// Segment counts must be equal; there are no wildcard segments.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut actual = split_segments(path);
        for segment in &self.segments {
            match actual.next() {
                Some(value) if segment.accepts(value) => {}
                _ => return false,
            }
        }
        actual.next().is_none()
    }

    /// Pairs every placeholder with the corresponding request segment.
    ///
    /// Only meaningful after [`matches`](Self::matches) succeeded for the
    /// same path. On a mismatched path the segments are paired positionally
    /// and extraction stops at the shorter side.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> Params {
        let mut params = Params::with_capacity(self.segments.len());
        for (segment, value) in self.segments.iter().zip(split_segments(path)) {
            if let Segment::Placeholder(name) = segment {
                params.bind(name.as_str(), value);
            }
        }
        params
    }

    /// Returns the shape used to detect duplicate routes.
    #[must_use]
    pub fn shape(&self) -> TemplateShape {
        TemplateShape(
            self.segments
                .iter()
                .map(|s| match s {
                    Segment::Literal(lit) => Some(lit.clone()),
                    Segment::Placeholder(_) => None,
                })
                .collect(),
        )
    }

    /// Returns true if some path would match both templates.
    ///
    /// Templates with equal shapes always overlap. `/posts/:id` and
    /// `/posts/new` overlap as well, which makes resolution depend on
    /// declaration order.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

/// Returns true if `path` matches `template`.
#[must_use]
pub fn matches(template: &str, path: &str) -> bool {
    PathTemplate::parse(template).matches(path)
}

/// Extracts the placeholder values of `path` for `template`.
#[must_use]
pub fn extract_params(template: &str, path: &str) -> Params {
    PathTemplate::parse(template).extract_params(path)
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
