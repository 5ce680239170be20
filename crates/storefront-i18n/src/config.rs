//! Translation configuration, fixed at process start.

/// Locale tag used when neither a hint nor a configured default applies.
pub const FALLBACK_LOCALE: &str = "en";

/// Configuration for locale resolution and bundle loading.
#[derive(Debug, Clone)]
pub struct I18nConfig {
    /// Default locale when the request carries no usable hint.
    pub default_locale: String,
    /// Locales the application ships bundles for.
    pub supported_locales: Vec<String>,
    /// Namespace used when no matched route declares any.
    pub default_namespace: String,
    /// Cookie name carrying an explicit locale hint.
    pub locale_cookie: String,
    /// Bundle path template with `{locale}` and `{namespace}` placeholders.
    pub load_path: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: FALLBACK_LOCALE.to_string(),
            supported_locales: vec![FALLBACK_LOCALE.to_string()],
            default_namespace: "common".to_string(),
            locale_cookie: "lng".to_string(),
            load_path: "public/locales/{locale}/{namespace}.json".to_string(),
        }
    }
}

impl I18nConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Set the supported locales.
    pub fn with_supported_locales(mut self, locales: &[&str]) -> Self {
        self.supported_locales = locales.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the default namespace.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Set the bundle path template.
    pub fn with_load_path(mut self, template: impl Into<String>) -> Self {
        self.load_path = template.into();
        self
    }

    /// Whether a locale tag is in the supported set.
    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = I18nConfig::default();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.default_namespace, "common");
        assert!(config.is_supported("en"));
        assert!(!config.is_supported("fr"));
    }

    #[test]
    fn test_builder() {
        let config = I18nConfig::new()
            .with_default_locale("ar")
            .with_supported_locales(&["en", "ar"])
            .with_default_namespace("translation");
        assert_eq!(config.default_locale, "ar");
        assert!(config.is_supported("ar"));
        assert_eq!(config.default_namespace, "translation");
    }
}
