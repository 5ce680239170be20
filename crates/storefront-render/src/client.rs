//! Client classification and render strategy selection.

use crate::backend::RenderEvent;

/// Policy governing when a render is complete enough to emit a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Wait for the entire tree; crawlers may not run deferred work.
    Crawler,
    /// Emit as soon as the initial shell is ready, stream the rest.
    Interactive,
}

impl RenderStrategy {
    /// Strategy name, for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawler => "crawler",
            Self::Interactive => "interactive",
        }
    }

    /// Whether this event is the readiness signal for this strategy.
    ///
    /// A full tree is always sufficient, so `AllReady` satisfies both
    /// strategies; `ShellReady` satisfies only the interactive one.
    pub fn is_ready(&self, event: &RenderEvent) -> bool {
        match self {
            Self::Crawler => matches!(event, RenderEvent::AllReady),
            Self::Interactive => {
                matches!(event, RenderEvent::ShellReady | RenderEvent::AllReady)
            }
        }
    }
}

/// User-agent signatures treated as automated crawlers.
///
/// Substring matches, lowercase. The generic "bot"/"crawler"/"spider"
/// entries cover the long tail of self-identifying crawlers.
const DEFAULT_SIGNATURES: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "slurp",
    "bingpreview",
    "baiduspider",
    "yandex",
    "facebookexternalhit",
    "ia_archiver",
    "mediapartners-google",
    "lighthouse",
    "whatsapp",
];

/// Classifies requesting clients from the `User-Agent` header.
///
/// The signature list is fixed at process start.
#[derive(Debug, Clone)]
pub struct ClientClassifier {
    signatures: Vec<String>,
}

impl Default for ClientClassifier {
    fn default() -> Self {
        Self {
            signatures: DEFAULT_SIGNATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClientClassifier {
    /// Create a classifier with the default signature list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the signature list.
    pub fn with_signatures(mut self, signatures: &[&str]) -> Self {
        self.signatures = signatures.iter().map(|s| s.to_ascii_lowercase()).collect();
        self
    }

    /// Add a signature to the list.
    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signatures.push(signature.to_ascii_lowercase());
        self
    }

    /// Whether a user-agent string matches a crawler signature.
    pub fn is_crawler(&self, user_agent: &str) -> bool {
        let ua = user_agent.to_ascii_lowercase();
        self.signatures.iter().any(|sig| ua.contains(sig.as_str()))
    }

    /// Choose the render strategy for a request. A missing or
    /// unmatched user-agent is treated as an interactive browser.
    pub fn classify(&self, user_agent: Option<&str>) -> RenderStrategy {
        match user_agent {
            Some(ua) if self.is_crawler(ua) => RenderStrategy::Crawler,
            _ => RenderStrategy::Interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crawlers() {
        let classifier = ClientClassifier::new();
        for ua in [
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
            "Mozilla/5.0 (compatible; bingbot/2.0)",
            "Mozilla/5.0 (compatible; YandexBot/3.0)",
            "Twitterbot/1.0",
        ] {
            assert_eq!(classifier.classify(Some(ua)), RenderStrategy::Crawler, "{ua}");
        }
    }

    #[test]
    fn test_browsers_are_interactive() {
        let classifier = ClientClassifier::new();
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
        assert_eq!(classifier.classify(Some(ua)), RenderStrategy::Interactive);
    }

    #[test]
    fn test_missing_user_agent_is_interactive() {
        assert_eq!(
            ClientClassifier::new().classify(None),
            RenderStrategy::Interactive
        );
    }

    #[test]
    fn test_custom_signatures() {
        let classifier = ClientClassifier::new().with_signatures(&["MyCrawler"]);
        assert!(classifier.is_crawler("mycrawler/1.0"));
        assert!(!classifier.is_crawler("Googlebot/2.1"));
    }

    #[test]
    fn test_readiness_signals() {
        assert!(RenderStrategy::Crawler.is_ready(&RenderEvent::AllReady));
        assert!(!RenderStrategy::Crawler.is_ready(&RenderEvent::ShellReady));
        assert!(RenderStrategy::Interactive.is_ready(&RenderEvent::ShellReady));
        assert!(RenderStrategy::Interactive.is_ready(&RenderEvent::AllReady));
        assert!(!RenderStrategy::Interactive.is_ready(&RenderEvent::Chunk(Vec::new())));
    }
}
