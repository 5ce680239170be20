//! Render lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle phases of a dispatched render.
///
/// `Complete`, `Error`, `StreamError`, and `Aborted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPhase {
    /// Request received, nothing started.
    Idle,
    /// Render backend running, no readiness signal yet.
    Rendering,
    /// Readiness signal fired, response envelope finalized.
    ShellReady,
    /// Response handed over, remainder still streaming.
    Streaming,
    /// Body fully drained.
    Complete,
    /// Failed before any emittable content existed.
    Error(String),
    /// Failed after the response started streaming.
    StreamError(String),
    /// Abort deadline fired before a readiness signal.
    Aborted,
}

impl RenderPhase {
    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete | Self::Error(_) | Self::StreamError(_) | Self::Aborted
        )
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: &RenderPhase) -> bool {
        use RenderPhase::*;
        match (self, next) {
            (Idle, Rendering) => true,
            (Rendering, ShellReady) | (Rendering, Error(_)) | (Rendering, Aborted) => true,
            (ShellReady, Streaming) => true,
            (Streaming, Complete) | (Streaming, StreamError(_)) => true,
            _ => false,
        }
    }
}

/// Timing context for observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Get elapsed time since request start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from request start to a recorded mark.
    pub fn time_to(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Time from request start to the readiness signal.
    pub fn time_to_ready(&self) -> Option<Duration> {
        self.time_to("ready")
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(RenderPhase::Complete.is_terminal());
        assert!(RenderPhase::Aborted.is_terminal());
        assert!(RenderPhase::Error("x".into()).is_terminal());
        assert!(RenderPhase::StreamError("x".into()).is_terminal());
        assert!(!RenderPhase::Rendering.is_terminal());
        assert!(!RenderPhase::ShellReady.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        use RenderPhase::*;
        assert!(Idle.can_transition_to(&Rendering));
        assert!(Rendering.can_transition_to(&ShellReady));
        assert!(Rendering.can_transition_to(&Aborted));
        assert!(ShellReady.can_transition_to(&Streaming));
        assert!(Streaming.can_transition_to(&Complete));
        assert!(Streaming.can_transition_to(&StreamError("x".into())));
    }

    #[test]
    fn test_illegal_transitions() {
        use RenderPhase::*;
        assert!(!Complete.can_transition_to(&Rendering));
        assert!(!ShellReady.can_transition_to(&Aborted));
        assert!(!Idle.can_transition_to(&Streaming));
        assert!(!Aborted.can_transition_to(&ShellReady));
    }

    #[test]
    fn test_timing_marks() {
        let mut timing = TimingContext::new();
        assert!(timing.time_to_ready().is_none());
        timing.mark("ready");
        assert!(timing.time_to_ready().is_some());
    }
}
