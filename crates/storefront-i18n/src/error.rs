//! Error types for locale and translation handling.

use thiserror::Error;

/// Errors raised while preparing a request-scoped translation engine.
#[derive(Error, Debug)]
pub enum I18nError {
    /// A translation bundle file could not be read.
    #[error("failed to load bundle {locale}/{namespace}: {source}")]
    BundleLoad {
        locale: String,
        namespace: String,
        #[source]
        source: std::io::Error,
    },

    /// A translation bundle file is not valid JSON.
    #[error("failed to parse bundle {locale}/{namespace}: {source}")]
    BundleParse {
        locale: String,
        namespace: String,
        #[source]
        source: serde_json::Error,
    },
}
