//! File-backed translation bundle store.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::I18nError;

/// Message keys to template strings for one `(locale, namespace)` pair.
pub type MessageMap = HashMap<String, String>;

/// Loads translation bundles from disk, addressed by a path template
/// with `{locale}` and `{namespace}` placeholders.
///
/// The template is fixed at process start; reads are asynchronous and
/// happen once per request before rendering begins.
#[derive(Debug, Clone)]
pub struct FsBackend {
    load_path: String,
}

impl FsBackend {
    /// Create a backend from a path template, e.g.
    /// `public/locales/{locale}/{namespace}.json`.
    pub fn new(load_path: impl Into<String>) -> Self {
        Self {
            load_path: load_path.into(),
        }
    }

    /// Resolve the on-disk path for a bundle.
    pub fn bundle_path(&self, locale: &str, namespace: &str) -> PathBuf {
        PathBuf::from(
            self.load_path
                .replace("{locale}", locale)
                .replace("{namespace}", namespace),
        )
    }

    /// Load and parse one bundle. A missing or malformed file is a hard
    /// failure; there is no fallback-locale retry.
    pub async fn load(&self, locale: &str, namespace: &str) -> Result<MessageMap, I18nError> {
        let path = self.bundle_path(locale, namespace);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| I18nError::BundleLoad {
                locale: locale.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| I18nError::BundleParse {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_backend() -> FsBackend {
        FsBackend::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/locales/{locale}/{namespace}.json"
        ))
    }

    #[test]
    fn test_path_template_substitution() {
        let backend = FsBackend::new("public/locales/{locale}/{namespace}.json");
        assert_eq!(
            backend.bundle_path("ar", "auth"),
            PathBuf::from("public/locales/ar/auth.json")
        );
    }

    #[tokio::test]
    async fn test_load_bundle() {
        let messages = fixture_backend().load("en", "common").await.unwrap();
        assert_eq!(messages.get("nav.products").map(|s| s.as_str()), Some("Products"));
    }

    #[tokio::test]
    async fn test_missing_bundle_is_hard_failure() {
        let err = fixture_backend().load("en", "nope").await.unwrap_err();
        assert!(matches!(err, I18nError::BundleLoad { .. }));
    }
}
