//! The render dispatcher.

use std::collections::VecDeque;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};
use storefront_core::{RequestContext, RouteTree, SsrConfig, TimingContext};
use storefront_i18n::{resolve_locale, I18nFactory};
use storefront_observability::RenderLogger;

use crate::backend::{RenderBackend, RenderEvent, RenderHandle, RenderJob};
use crate::body::HtmlBody;
use crate::client::ClientClassifier;
use crate::error::RenderError;
use crate::style::StyleRegistry;

/// The finalized response envelope: status and headers are set exactly
/// once, before the transport receives the (still live) body.
#[derive(Debug)]
pub struct SsrResponse {
    /// Response status code, as supplied by the caller.
    pub status: StatusCode,
    /// Response headers, with `Content-Type: text/html` applied.
    pub headers: HeaderMap,
    /// Style-interleaved body stream.
    pub body: HtmlBody,
}

/// Dispatches one render per request: negotiates the locale, loads
/// translation bundles, classifies the client, and races the render
/// against an abort deadline.
///
/// All shared state is immutable after construction, so one dispatcher
/// serves concurrent requests; everything mutable (translation engine,
/// style registry, event channel, deadline) is created per call.
pub struct RenderDispatcher<B> {
    backend: Arc<B>,
    i18n: I18nFactory,
    classifier: ClientClassifier,
    config: SsrConfig,
}

impl<B: RenderBackend> RenderDispatcher<B> {
    /// Create a dispatcher with default classification and config.
    pub fn new(backend: B, i18n: I18nFactory) -> Self {
        Self {
            backend: Arc::new(backend),
            i18n,
            classifier: ClientClassifier::default(),
            config: SsrConfig::default(),
        }
    }

    /// Replace the dispatcher configuration.
    pub fn with_config(mut self, config: SsrConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the client classifier.
    pub fn with_classifier(mut self, classifier: ClientClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Render one request. Settles exactly once: `Ok` with a response
    /// whose body is a live stream, or `Err` with a normalized error.
    ///
    /// The response resolves when the client's strategy says the render
    /// is ready: at full-tree completion for crawlers, at shell
    /// readiness for interactive browsers. Rendering continues feeding
    /// the body after resolution.
    ///
    /// Both strategies run the identical render path; the strategy only
    /// selects which readiness signal ends the wait, so the bot/browser
    /// split costs one parameter instead of two code paths.
    pub async fn render(
        &self,
        request: &RequestContext,
        status: StatusCode,
        mut headers: HeaderMap,
        routes: &RouteTree,
    ) -> Result<SsrResponse, RenderError> {
        let mut timing = TimingContext::new();

        // Fresh engine per request; sharing one would bleed locales
        // across concurrent renders.
        let mut engine = self.i18n.new_engine();
        let locale_ctx = resolve_locale(request, routes, self.i18n.config());
        engine.init(&locale_ctx).await?;

        let strategy = self.classifier.classify(request.header("user-agent"));
        let logger = RenderLogger::new(request.request_id.clone())
            .with_route(request.path.clone())
            .with_locale(locale_ctx.locale.clone())
            .with_strategy(strategy.as_str());

        let styles = StyleRegistry::new();
        let RenderHandle { mut events, abort } = self.backend.start(RenderJob {
            request_path: request.path.clone(),
            routes: routes.clone(),
            engine,
            styles: styles.clone(),
            channel_capacity: self.config.channel_capacity,
        });

        // The only cancellation path. Dropped (and thereby inert) as
        // soon as the readiness signal settles the operation.
        let deadline = tokio::time::sleep(self.config.abort_deadline);
        tokio::pin!(deadline);

        let mut buffered: VecDeque<Vec<u8>> = VecDeque::new();
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) if strategy.is_ready(&event) => break,
                    Some(RenderEvent::Chunk(chunk)) => buffered.push_back(chunk),
                    // Crawlers sit out the shell signal and keep
                    // waiting for the full tree.
                    Some(RenderEvent::ShellReady) => {}
                    Some(RenderEvent::AllReady) => {}
                    Some(RenderEvent::Error(fault)) => {
                        abort.abort();
                        logger.error_with("render failed before shell", &[("fault", &fault)]);
                        return Err(fault.into());
                    }
                    None => {
                        logger.error("render ended before a readiness signal");
                        return Err(RenderError::Closed);
                    }
                },
                _ = &mut deadline => {
                    abort.abort();
                    logger.error("render aborted at deadline");
                    return Err(RenderError::Timeout(self.config.abort_deadline));
                }
            }
        }

        timing.mark("ready");
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        logger.info("response envelope finalized");
        Ok(SsrResponse {
            status,
            headers,
            body: HtmlBody::new(events, buffered, styles, logger, timing),
        })
    }
}
