//! Per-request locale and namespace resolution.

use storefront_core::{RequestContext, RouteTree};

use crate::config::{I18nConfig, FALLBACK_LOCALE};

/// Resolved language tag plus the translation namespaces required by
/// the matched routes, in outer-to-inner first-seen order.
///
/// Built once per request; immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    /// Resolved language tag (e.g., "en").
    pub locale: String,
    /// Ordered, deduplicated namespace identifiers.
    pub namespaces: Vec<String>,
}

/// Resolve the active locale and required namespaces for a request.
///
/// Locale selection order: cookie hint, then `Accept-Language` header,
/// then the configured default, then the fallback constant. Resolution
/// never fails; an unmatched route tree yields the default namespace.
/// Pure computation, no I/O.
pub fn resolve_locale(
    request: &RequestContext,
    routes: &RouteTree,
    config: &I18nConfig,
) -> LocaleContext {
    let locale = cookie_hint(request, config)
        .or_else(|| accept_language_hint(request, config))
        .unwrap_or_else(|| {
            if config.default_locale.is_empty() {
                FALLBACK_LOCALE.to_string()
            } else {
                config.default_locale.clone()
            }
        });

    let mut namespaces = routes.namespaces();
    if namespaces.is_empty() {
        namespaces.push(config.default_namespace.clone());
    }

    LocaleContext { locale, namespaces }
}

fn cookie_hint(request: &RequestContext, config: &I18nConfig) -> Option<String> {
    let tag = normalize_tag(request.cookie(&config.locale_cookie)?)?;
    config.is_supported(&tag).then_some(tag)
}

fn accept_language_hint(request: &RequestContext, config: &I18nConfig) -> Option<String> {
    // First supported tag wins; q-values are ignored since clients
    // already order entries by preference.
    request
        .header("accept-language")?
        .split(',')
        .filter_map(|entry| normalize_tag(entry.split(';').next()?))
        .find(|tag| config.is_supported(tag))
}

/// Lowercase the primary subtag of a language tag ("en-US" -> "en").
fn normalize_tag(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "*" {
        return None;
    }
    let primary = raw.split(['-', '_']).next()?;
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}
