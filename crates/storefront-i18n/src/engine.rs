//! Request-scoped translation engines.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{FsBackend, MessageMap};
use crate::config::I18nConfig;
use crate::error::I18nError;
use crate::locale::LocaleContext;

/// Factory producing a fresh [`I18nEngine`] per request.
///
/// Engines are never shared or reused across requests; each render
/// gets its own instance so concurrent requests with different locales
/// cannot bleed into one another.
#[derive(Debug, Clone)]
pub struct I18nFactory {
    config: Arc<I18nConfig>,
    backend: Arc<FsBackend>,
}

impl I18nFactory {
    /// Create a factory from process-wide configuration.
    pub fn new(config: I18nConfig) -> Self {
        let backend = Arc::new(FsBackend::new(config.load_path.clone()));
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// The shared, read-only configuration.
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Create a new, unloaded engine scoped to one request.
    pub fn new_engine(&self) -> I18nEngine {
        I18nEngine {
            backend: Arc::clone(&self.backend),
            default_namespace: self.config.default_namespace.clone(),
            locale: None,
            bundles: HashMap::new(),
        }
    }
}

/// A translation engine holding the bundles for one request.
#[derive(Debug)]
pub struct I18nEngine {
    backend: Arc<FsBackend>,
    default_namespace: String,
    locale: Option<String>,
    bundles: HashMap<String, MessageMap>,
}

impl I18nEngine {
    /// Load every `(locale, namespace)` bundle required by the request.
    ///
    /// Must complete before rendering begins; a load failure aborts the
    /// request (no fallback-bundle retry).
    pub async fn init(&mut self, ctx: &LocaleContext) -> Result<(), I18nError> {
        for namespace in &ctx.namespaces {
            let messages = self.backend.load(&ctx.locale, namespace).await?;
            self.bundles.insert(namespace.clone(), messages);
        }
        self.locale = Some(ctx.locale.clone());
        Ok(())
    }

    /// The locale this engine was initialized with.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Look up a message in a namespace. Missing namespaces and missing
    /// keys both degrade to the key itself so markup never loses text.
    pub fn translate(&self, namespace: &str, key: &str) -> String {
        self.bundles
            .get(namespace)
            .and_then(|messages| messages.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up a message in the default namespace.
    pub fn t(&self, key: &str) -> String {
        self.translate(&self.default_namespace, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> I18nFactory {
        I18nFactory::new(I18nConfig::new().with_supported_locales(&["en", "ar"]).with_load_path(
            concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/tests/fixtures/locales/{locale}/{namespace}.json"
            ),
        ))
    }

    fn locale_ctx(locale: &str, namespaces: &[&str]) -> LocaleContext {
        LocaleContext {
            locale: locale.to_string(),
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_engine_loads_and_translates() {
        let mut engine = factory().new_engine();
        engine.init(&locale_ctx("en", &["common", "auth"])).await.unwrap();
        assert_eq!(engine.locale(), Some("en"));
        assert_eq!(engine.translate("common", "nav.products"), "Products");
        assert_eq!(engine.translate("auth", "sign_in.title"), "Sign in");
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_key() {
        let mut engine = factory().new_engine();
        engine.init(&locale_ctx("en", &["common"])).await.unwrap();
        assert_eq!(engine.translate("common", "no.such.key"), "no.such.key");
        assert_eq!(engine.translate("no_such_ns", "k"), "k");
    }

    #[tokio::test]
    async fn test_engines_are_isolated_per_request() {
        let factory = factory();
        let mut en = factory.new_engine();
        let mut ar = factory.new_engine();
        en.init(&locale_ctx("en", &["common"])).await.unwrap();
        ar.init(&locale_ctx("ar", &["common"])).await.unwrap();
        assert_eq!(en.translate("common", "nav.products"), "Products");
        assert_eq!(ar.translate("common", "nav.products"), "المنتجات");
    }

    #[tokio::test]
    async fn test_load_failure_propagates() {
        let mut engine = factory().new_engine();
        let err = engine.init(&locale_ctx("de", &["common"])).await.unwrap_err();
        assert!(matches!(err, I18nError::BundleLoad { .. }));
    }

    #[test]
    fn test_uninitialized_engine_degrades_to_keys() {
        let engine = factory().new_engine();
        assert_eq!(engine.t("nav.products"), "nav.products");
        assert!(engine.locale().is_none());
    }
}
