//! Per-request CSS rule collection.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Rules {
    pending: Vec<String>,
    seen: HashSet<String>,
}

/// Collects CSS rules registered while a request renders.
///
/// Cloning shares the underlying collector: the render backend holds
/// one handle and registers rules as components emit them; the body
/// stream holds the other and drains pending rules ahead of each
/// markup chunk. Both handles die with the request.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    inner: Arc<Mutex<Rules>>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a CSS rule. A rule is emitted at most once per
    /// request, even when re-registered after a drain (two sections
    /// sharing a class must not duplicate its block in the output).
    pub fn register(&self, rule: impl Into<String>) {
        let rule = rule.into();
        let mut rules = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if rules.seen.insert(rule.clone()) {
            rules.pending.push(rule);
        }
    }

    /// Take every rule registered since the last drain.
    pub fn drain_pending(&self) -> Vec<String> {
        let mut rules = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut rules.pending)
    }

    /// Whether any rules are pending.
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending
            .is_empty()
    }

    /// Wrap rules in an inline `<style>` block for interleaving.
    pub fn wrap(rules: &[String]) -> String {
        format!("<style data-storefront=\"ssr\">{}</style>", rules.join(""))
    }

    /// Prefix a markup chunk with any rules registered since the last
    /// drain.
    pub fn interleave(&self, chunk: Vec<u8>) -> Vec<u8> {
        let pending = self.drain_pending();
        if pending.is_empty() {
            return chunk;
        }
        let mut out = Self::wrap(&pending).into_bytes();
        out.extend_from_slice(&chunk);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_registry() {
        let styles = StyleRegistry::new();
        styles.register(".hero{color:red}");
        assert!(!styles.is_empty());
        assert_eq!(styles.drain_pending(), vec![".hero{color:red}"]);
        assert!(styles.is_empty());
        assert!(styles.drain_pending().is_empty());
    }

    #[test]
    fn test_duplicates_kept_once() {
        let styles = StyleRegistry::new();
        styles.register(".a{}");
        styles.register(".a{}");
        styles.register(".b{}");
        assert_eq!(styles.drain_pending(), vec![".a{}", ".b{}"]);
    }

    #[test]
    fn test_duplicates_suppressed_across_drains() {
        let styles = StyleRegistry::new();
        styles.register(".card{margin:0}");
        assert_eq!(styles.drain_pending(), vec![".card{margin:0}"]);
        // Same class from a later section: already in the output.
        styles.register(".card{margin:0}");
        assert!(styles.is_empty());
        assert!(styles.drain_pending().is_empty());
        styles.register(".footer{}");
        assert_eq!(styles.drain_pending(), vec![".footer{}"]);
    }

    #[test]
    fn test_clones_share_rules() {
        let styles = StyleRegistry::new();
        let other = styles.clone();
        other.register(".shared{}");
        assert_eq!(styles.drain_pending(), vec![".shared{}"]);
    }

    #[test]
    fn test_interleave_prefixes_pending_rules() {
        let styles = StyleRegistry::new();
        styles.register(".a{}");
        let chunk = styles.interleave(b"<div>x</div>".to_vec());
        assert_eq!(
            String::from_utf8(chunk).unwrap(),
            "<style data-storefront=\"ssr\">.a{}</style><div>x</div>"
        );
        // Nothing pending: chunk passes through untouched.
        assert_eq!(styles.interleave(b"<p>y</p>".to_vec()), b"<p>y</p>".to_vec());
    }

    #[test]
    fn test_wrap() {
        let block = StyleRegistry::wrap(&[".a{}".to_string(), ".b{}".to_string()]);
        assert_eq!(block, "<style data-storefront=\"ssr\">.a{}.b{}</style>");
    }
}
