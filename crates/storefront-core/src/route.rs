//! Matched route tree with translation-namespace declarations.

use serde::{Deserialize, Serialize};

/// A single matched route level.
///
/// Routes declare up front which translation namespaces their markup
/// needs, so bundles can be loaded before rendering begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMatch {
    /// Stable route identifier (e.g., "routes/products").
    pub id: String,
    /// Route pattern (e.g., "/products/:id").
    pub pattern: String,
    /// Translation namespaces this route requires.
    #[serde(default)]
    pub namespaces: Vec<String>,
}

impl RouteMatch {
    /// Create a new route match.
    pub fn new(id: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            namespaces: Vec::new(),
        }
    }

    /// Declare required translation namespaces.
    pub fn with_namespaces(mut self, namespaces: &[&str]) -> Self {
        self.namespaces = namespaces.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// The route chain matched for one request, ordered outer-to-inner
/// (root layout first, leaf route last).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTree {
    /// Matched route levels.
    pub matches: Vec<RouteMatch>,
}

impl RouteTree {
    /// Create an empty route tree (unmatched request).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matched route level.
    pub fn with_match(mut self, route: RouteMatch) -> Self {
        self.matches.push(route);
        self
    }

    /// Whether any route matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Union of declared namespaces across all matched levels,
    /// first-seen order, deduplicated.
    pub fn namespaces(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for route in &self.matches {
            for ns in &route.namespaces {
                if !out.contains(ns) {
                    out.push(ns.clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_union_first_seen_order() {
        let tree = RouteTree::new()
            .with_match(RouteMatch::new("root", "/").with_namespaces(&["a", "b"]))
            .with_match(RouteMatch::new("leaf", "/products").with_namespaces(&["b", "c"]));
        assert_eq!(tree.namespaces(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_namespaces_empty_tree() {
        assert!(RouteTree::new().namespaces().is_empty());
    }

    #[test]
    fn test_duplicate_namespace_within_route() {
        let tree = RouteTree::new()
            .with_match(RouteMatch::new("root", "/").with_namespaces(&["common", "common"]));
        assert_eq!(tree.namespaces(), vec!["common"]);
    }
}
