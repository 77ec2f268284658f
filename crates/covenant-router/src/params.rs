//! Placeholder bindings produced by a template match.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

/// Values bound to a template's placeholders, in declaration order.
///
/// Binding a name twice keeps its first position and replaces the value,
/// so `/a/:id/b/:id` matched against `/a/1/b/2` yields `id = "2"`.
/// Serializes as a map whose keys follow the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    bindings: SmallVec<[(String, String); 4]>,
}

impl Params {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: SmallVec::with_capacity(capacity),
        }
    }

    /// Binds `value` to the placeholder `name`.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.bindings.iter_mut().find(|(bound, _)| *bound == name) {
            Some((_, slot)) => *slot = value,
            None => self.bindings.push((name, value)),
        }
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value.as_str())
    }

    /// Placeholder names in the order they first appear in the template.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of distinct placeholder names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// `true` for templates without placeholders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        for (name, value) in &self.bindings {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_keeps_template_order() {
        let mut params = Params::new();
        params.bind("userId", "42");
        params.bind("postId", "7");

        assert_eq!(params.names().collect::<Vec<_>>(), vec!["userId", "postId"]);
        assert_eq!(params.get("postId"), Some("7"));
        assert_eq!(params.get("commentId"), None);
    }

    #[test]
    fn test_rebinding_replaces_value_in_place() {
        let mut params = Params::new();
        params.bind("id", "1");
        params.bind("slug", "intro");
        params.bind("id", "2");

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("id", "2"), ("slug", "intro")]
        );
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut params = Params::new();
        params.bind("zone", "eu");
        params.bind("account", "acme");

        let text = serde_json::to_string(&params).unwrap();
        assert_eq!(text, r#"{"zone":"eu","account":"acme"}"#);
    }

    #[test]
    fn test_empty_serializes_as_empty_object() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");
    }
}
