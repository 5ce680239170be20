//! Structured per-request logging for the storefront SSR platform.
//!
//! This crate provides `RenderLogger`, a request-scoped structured
//! logger used by the render dispatcher. Stream-phase failures (after
//! the response has already resolved) have no caller left to notify,
//! so the logger is their only signal.

mod logging;

pub use logging::*;

// Re-export RequestId for convenience
pub use storefront_core::RequestId;
