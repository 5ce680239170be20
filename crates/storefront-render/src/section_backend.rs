//! Built-in shell-first render backend.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use storefront_core::RouteMatch;
use storefront_i18n::{I18nEngine, FALLBACK_LOCALE};
use tokio::sync::mpsc;

use crate::backend::{RenderBackend, RenderEvent, RenderFault, RenderHandle, RenderJob};
use crate::shell::DocumentShell;
use crate::style::StyleRegistry;

/// What a section renderer sees: the matched route it renders for,
/// the request's translation engine, and the style collector.
pub struct SectionScope<'a> {
    /// The route level being rendered.
    pub route: &'a RouteMatch,
    /// Request path, for URL-dependent markup.
    pub request_path: &'a str,
    /// Loaded translation engine.
    pub engine: &'a I18nEngine,
    /// CSS rule collector for this render pass.
    pub styles: &'a StyleRegistry,
}

type SectionRenderer = Arc<dyn Fn(&SectionScope<'_>) -> String + Send + Sync>;

/// Renders the document shell first, then one section per matched
/// route, inner renderers registered by route id.
///
/// Event order per request: shell chunk, `ShellReady`, one chunk per
/// section, closing chunk, `AllReady`. A panicking renderer is caught,
/// normalized, and ends the stream with a single `Error` event. Routes
/// without a registered renderer are skipped.
#[derive(Clone, Default)]
pub struct SectionBackend {
    shell: DocumentShell,
    renderers: HashMap<String, SectionRenderer>,
}

impl SectionBackend {
    /// Create a backend around a document shell.
    pub fn new(shell: DocumentShell) -> Self {
        Self {
            shell,
            renderers: HashMap::new(),
        }
    }

    /// Register the renderer for a route id.
    pub fn with_renderer(
        mut self,
        route_id: impl Into<String>,
        renderer: impl Fn(&SectionScope<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.renderers.insert(route_id.into(), Arc::new(renderer));
        self
    }
}

impl RenderBackend for SectionBackend {
    fn start(&self, job: RenderJob) -> RenderHandle {
        let (tx, events) = mpsc::channel(job.channel_capacity);
        let shell = self.shell.clone();
        let renderers = self.renderers.clone();

        let task = tokio::spawn(async move {
            let RenderJob {
                request_path,
                routes,
                engine,
                styles,
                ..
            } = job;

            let lang = engine.locale().unwrap_or(FALLBACK_LOCALE).to_string();
            let opening = shell.render_opening(&lang);
            if tx.send(RenderEvent::Chunk(opening.into_bytes())).await.is_err() {
                return; // receiver gone, stop rendering
            }
            if tx.send(RenderEvent::ShellReady).await.is_err() {
                return;
            }

            for route in &routes.matches {
                let Some(renderer) = renderers.get(&route.id) else {
                    continue;
                };
                let scope = SectionScope {
                    route,
                    request_path: &request_path,
                    engine: &engine,
                    styles: &styles,
                };
                match catch_unwind(AssertUnwindSafe(|| renderer(&scope))) {
                    Ok(html) => {
                        if tx.send(RenderEvent::Chunk(html.into_bytes())).await.is_err() {
                            return;
                        }
                    }
                    Err(payload) => {
                        let fault = RenderFault::from_panic(payload);
                        let _ = tx.send(RenderEvent::Error(fault)).await;
                        return;
                    }
                }
            }

            let closing = shell.render_closing();
            if tx.send(RenderEvent::Chunk(closing.into_bytes())).await.is_err() {
                return;
            }
            let _ = tx.send(RenderEvent::AllReady).await;
        });

        RenderHandle {
            events,
            abort: task.abort_handle(),
        }
    }
}
