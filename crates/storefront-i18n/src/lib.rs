//! Locale negotiation and translation bundles for the storefront SSR platform.
//!
//! This crate provides:
//! - `resolve_locale` - Per-request locale and namespace resolution
//! - `I18nFactory` / `I18nEngine` - Request-scoped translation engines
//! - `FsBackend` - File-backed translation bundle store
//! - `localize_path` - Locale-prefixed link helper

mod backend;
mod config;
mod engine;
mod error;
mod link;
mod locale;

pub use backend::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use link::*;
pub use locale::*;
