//! Streaming server-render dispatcher for the storefront SSR platform.
//!
//! This crate owns the request-to-response render path:
//! - `ClientClassifier` / `RenderStrategy` - Crawler vs. browser split
//! - `RenderBackend` - Pluggable UI-tree rendering interface
//! - `SectionBackend` - Built-in shell-first section renderer
//! - `StyleRegistry` / `HtmlBody` - Style-interleaved body stream
//! - `RenderDispatcher` - Locale-aware dispatch with an abort deadline
//!
//! The dispatcher settles exactly once per request: either with an
//! `SsrResponse` whose body is a live stream, or with a normalized
//! `RenderError`. Failures after settlement are logged, never thrown.

mod backend;
mod body;
mod client;
mod dispatch;
mod error;
mod section_backend;
mod shell;
mod style;

pub use backend::*;
pub use body::*;
pub use client::*;
pub use dispatch::*;
pub use error::*;
pub use section_backend::*;
pub use shell::*;
pub use style::*;
