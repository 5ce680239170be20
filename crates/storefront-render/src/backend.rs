//! Render backend interface and event protocol.

use std::any::Any;

use storefront_core::RouteTree;
use storefront_i18n::I18nEngine;
use tokio::sync::mpsc;

use crate::error::{RenderError, UNKNOWN_ERROR};
use crate::style::StyleRegistry;

/// Events emitted by a render backend, in stream order.
#[derive(Debug)]
pub enum RenderEvent {
    /// The initial visible shell is complete.
    ShellReady,
    /// A markup chunk is available.
    Chunk(Vec<u8>),
    /// The entire tree has finished rendering.
    AllReady,
    /// Rendering failed; no further events follow.
    Error(RenderFault),
}

/// A fault raised inside a render backend, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFault {
    /// A fault with a usable message.
    Message(String),
    /// A fault whose payload carried no message.
    Unknown,
}

impl RenderFault {
    /// Normalize a panic payload. String payloads keep their message;
    /// anything else becomes the generic unknown fault.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(s) = payload.downcast_ref::<&str>() {
            Self::Message((*s).to_string())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Self::Message(s.clone())
        } else {
            Self::Unknown
        }
    }

    /// The normalized message.
    pub fn message(&self) -> &str {
        match self {
            Self::Message(m) => m,
            Self::Unknown => UNKNOWN_ERROR,
        }
    }
}

impl From<RenderFault> for RenderError {
    fn from(fault: RenderFault) -> Self {
        RenderError::Render(fault.message().to_string())
    }
}

/// Everything a backend needs to render one request.
///
/// The engine and style registry are request-scoped; the backend takes
/// ownership for the duration of the render.
pub struct RenderJob {
    /// Request path, for backends that render URL-dependent markup.
    pub request_path: String,
    /// Matched route chain, outer-to-inner.
    pub routes: RouteTree,
    /// Loaded, request-scoped translation engine.
    pub engine: I18nEngine,
    /// Collector for CSS rules produced during this render.
    pub styles: StyleRegistry,
    /// Capacity of the event channel.
    pub channel_capacity: usize,
}

/// Handle to an in-flight render: the event stream plus an abort lever.
pub struct RenderHandle {
    /// Render events, in emission order.
    pub events: mpsc::Receiver<RenderEvent>,
    /// Aborts the underlying render task. Idempotent; a no-op once the
    /// task has finished.
    pub abort: tokio::task::AbortHandle,
}

/// A pluggable renderer for the route-resolved UI tree.
///
/// `start` must not block: implementations spawn the actual render and
/// return immediately. The dispatcher drives the event stream and owns
/// cancellation through the returned abort handle.
pub trait RenderBackend: Send + Sync + 'static {
    /// Begin rendering a request.
    fn start(&self, job: RenderJob) -> RenderHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch(f: impl FnOnce() + std::panic::UnwindSafe) -> RenderFault {
        let payload = std::panic::catch_unwind(f).unwrap_err();
        RenderFault::from_panic(payload)
    }

    #[test]
    fn test_str_panic_keeps_message() {
        assert_eq!(catch(|| panic!("boom")), RenderFault::Message("boom".into()));
    }

    #[test]
    fn test_string_panic_keeps_message() {
        let fault = catch(|| std::panic::panic_any("boom".to_string()));
        assert_eq!(fault.message(), "boom");
    }

    #[test]
    fn test_non_string_panic_is_unknown() {
        let fault = catch(|| std::panic::panic_any(42_i32));
        assert_eq!(fault, RenderFault::Unknown);
        assert_eq!(fault.message(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_fault_converts_to_render_error() {
        let err: RenderError = RenderFault::Message("boom".into()).into();
        assert_eq!(err.to_string(), "boom");
        let err: RenderError = RenderFault::Unknown.into();
        assert_eq!(err.to_string(), UNKNOWN_ERROR);
    }
}
