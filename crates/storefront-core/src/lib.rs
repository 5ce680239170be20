//! Core abstractions for the storefront SSR platform.
//!
//! This crate provides the fundamental types shared by the render
//! dispatcher and its collaborators:
//! - `RequestContext` - Typed, immutable view of an inbound request
//! - `RouteTree` - Matched route chain with translation namespaces
//! - `RenderPhase` - Per-request render lifecycle tracking
//! - `SsrConfig` - Process-wide dispatcher configuration

mod config;
mod context;
mod lifecycle;
mod route;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
pub use route::*;
