//! Style-interleaved response body stream.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use storefront_core::{RenderPhase, TimingContext};
use storefront_observability::RenderLogger;
use tokio::sync::mpsc;

use crate::backend::RenderEvent;
use crate::error::RenderError;
use crate::style::StyleRegistry;

/// The live response body: render chunks with collected CSS rules
/// interleaved into the markup stream.
///
/// This is the second of the two owned stream stages. It exclusively
/// consumes the render backend's event stream; dropping it releases
/// the channel and, through the closed channel, stops the render task
/// on its next send. Errors observed here arrive after the caller has
/// already received the response, so they are logged and terminate the
/// stream instead of rejecting anything.
///
/// Interleaving happens at emission: pending rules are flushed ahead
/// of each chunk, except the first, which carries the document head
/// (a style block may not precede the doctype) and gets them appended
/// instead. A rule is always registered before the chunk using it is
/// sent, so rules never trail their markup.
#[derive(Debug)]
pub struct HtmlBody {
    events: mpsc::Receiver<RenderEvent>,
    buffered: VecDeque<Vec<u8>>,
    styles: StyleRegistry,
    logger: RenderLogger,
    phase: RenderPhase,
    timing: TimingContext,
    started: bool,
    done: bool,
}

impl HtmlBody {
    pub(crate) fn new(
        events: mpsc::Receiver<RenderEvent>,
        buffered: VecDeque<Vec<u8>>,
        styles: StyleRegistry,
        logger: RenderLogger,
        timing: TimingContext,
    ) -> Self {
        Self {
            events,
            buffered,
            styles,
            logger,
            phase: RenderPhase::ShellReady,
            timing,
            started: false,
            done: false,
        }
    }

    /// Current lifecycle phase of this body.
    pub fn phase(&self) -> &RenderPhase {
        &self.phase
    }

    /// Timing marks measured from dispatch start: `"ready"` when the
    /// envelope finalized, `"first_chunk"`, `"drained"`.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Merge pending styles into an outgoing chunk.
    fn emit(&mut self, chunk: Vec<u8>) -> Vec<u8> {
        if self.started {
            return self.styles.interleave(chunk);
        }
        self.started = true;
        self.phase = RenderPhase::Streaming;
        self.timing.mark("first_chunk");
        let mut out = chunk;
        let pending = self.styles.drain_pending();
        if !pending.is_empty() {
            out.extend_from_slice(StyleRegistry::wrap(&pending).as_bytes());
        }
        out
    }

    /// Drain the whole body into one buffer. Stops at the first stream
    /// fault, which has already been logged.
    pub async fn collect(mut self) -> Result<Vec<u8>, RenderError> {
        use futures::StreamExt;
        let mut out = Vec::new();
        while let Some(chunk) = self.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }
}

impl Stream for HtmlBody {
    type Item = Result<Vec<u8>, RenderError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if this.done {
                return Poll::Ready(None);
            }
            if let Some(chunk) = this.buffered.pop_front() {
                return Poll::Ready(Some(Ok(this.emit(chunk))));
            }
            match this.events.poll_recv(cx) {
                Poll::Ready(Some(RenderEvent::Chunk(chunk))) => {
                    let chunk = this.emit(chunk);
                    return Poll::Ready(Some(Ok(chunk)));
                }
                // Readiness signals already did their job in the dispatcher.
                Poll::Ready(Some(RenderEvent::ShellReady | RenderEvent::AllReady)) => continue,
                Poll::Ready(Some(RenderEvent::Error(fault))) => {
                    this.done = true;
                    this.phase = RenderPhase::StreamError(fault.message().to_string());
                    this.logger
                        .error_with("render failed while streaming", &[("fault", &fault)]);
                    return Poll::Ready(Some(Err(fault.into())));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    this.phase = RenderPhase::Complete;
                    this.timing.mark("drained");
                    this.logger.debug("body drained");
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
