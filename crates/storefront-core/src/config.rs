//! Process-wide dispatcher configuration.

use std::time::Duration;

/// Configuration for the render dispatcher, fixed at process start.
#[derive(Debug, Clone)]
pub struct SsrConfig {
    /// Deadline after which an in-flight render is forcibly aborted.
    pub abort_deadline: Duration,
    /// Capacity of the render-event channel between backend and body.
    pub channel_capacity: usize,
}

impl Default for SsrConfig {
    fn default() -> Self {
        Self {
            abort_deadline: Duration::from_millis(5000),
            channel_capacity: 32,
        }
    }
}

impl SsrConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the abort deadline.
    pub fn with_abort_deadline(mut self, deadline: Duration) -> Self {
        self.abort_deadline = deadline;
        self
    }

    /// Set the render-event channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}
