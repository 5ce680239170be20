//! Error types for the render dispatcher.

use std::time::Duration;

use thiserror::Error;

/// Canonical message for faults that carry no usable payload.
pub const UNKNOWN_ERROR: &str = "an unknown error occurred";

/// Errors surfaced to the transport layer by the render dispatcher.
///
/// Every fault crossing this boundary is normalized into one of these
/// variants; raw panic payloads never escape.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The render failed before any emittable content existed.
    #[error("{0}")]
    Render(String),

    /// The abort deadline fired before a readiness signal.
    #[error("render aborted after {0:?}")]
    Timeout(Duration),

    /// A translation bundle failed to load or parse.
    #[error(transparent)]
    BundleLoad(#[from] storefront_i18n::I18nError),

    /// The render backend ended without a readiness signal or an error.
    #[error("render ended before a readiness signal")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_message_is_verbatim() {
        assert_eq!(RenderError::Render("boom".into()).to_string(), "boom");
    }

    #[test]
    fn test_timeout_message_names_deadline() {
        let err = RenderError::Timeout(Duration::from_millis(5000));
        assert!(err.to_string().contains("5s"));
    }
}
