//! The analyze flow: extract, send, normalize. At most one request in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::backend::AnalysisClient;
use crate::config::Config;
use crate::error::{ConsiaError, Result};
use crate::extract::{extract_payload, Extraction};
use crate::page::PageHandle;
use crate::platform::SiteClassifier;
use crate::result::{normalize_result, CanonicalResult};
use crate::strategy::ExtractionPayload;

/// What one analysis produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub extraction: Extraction,
    pub result: CanonicalResult,
}

pub struct Analyzer {
    client: AnalysisClient,
    classifier: SiteClassifier,
    allow_any_site: bool,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on drop, whatever path the analysis left by
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Analyzer {
    pub fn new(client: AnalysisClient, classifier: SiteClassifier) -> Self {
        Self {
            client,
            classifier,
            allow_any_site: false,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AnalysisClient::from_config(config), SiteClassifier::new())
            .allow_any_site(config.allow_any_site)
    }

    /// Also analyze pages only the generic strategy matches
    pub fn allow_any_site(mut self, allow: bool) -> Self {
        self.allow_any_site = allow;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| ConsiaError::AnalysisInProgress)
    }

    /// Full flow for one page.
    ///
    /// Pages outside the supported marketplaces are refused before anything is
    /// read unless any site is allowed. A page with no reviews is never sent.
    pub fn run(&self, page: &mut dyn PageHandle) -> Result<AnalysisReport> {
        let _guard = self.begin()?;

        let strategy = self.classifier.classify(page.url());
        if strategy.id() == "generic" && !self.allow_any_site {
            return Err(ConsiaError::UnsupportedSite(page.url().to_string()));
        }

        let extraction = extract_payload(page, &self.classifier);
        if extraction.payload.reviews.is_empty() {
            tracing::info!(url = page.url(), "no reviews found, not contacting the service");
            return Err(ConsiaError::NoReviews);
        }

        let result = self.send(&extraction.payload)?;
        Ok(AnalysisReport { extraction, result })
    }

    fn send(&self, payload: &ExtractionPayload) -> Result<CanonicalResult> {
        let raw = self.client.analyze(payload)?;
        let result = normalize_result(&raw);
        tracing::info!(
            recommendation = %result.recommendation,
            schema = ?result.schema,
            failed = result.failed,
            "analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;
    use std::time::Duration;

    fn analyzer() -> Analyzer {
        // Nothing listens on the discard port; none of these tests should get that far
        let client = AnalysisClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2)));
        Analyzer::new(client, SiteClassifier::new())
    }

    #[test]
    fn test_second_request_while_busy_is_refused() {
        let analyzer = analyzer();
        let guard = analyzer.begin().unwrap();
        assert!(analyzer.is_busy());

        let mut page = HtmlPage::parse("https://www.amazon.in/dp/B0", "<body></body>");
        let err = analyzer.run(&mut page).unwrap_err();
        assert!(matches!(err, ConsiaError::AnalysisInProgress));

        drop(guard);
        assert!(!analyzer.is_busy());
    }

    #[test]
    fn test_flag_released_after_error() {
        let analyzer = analyzer();
        let mut page = HtmlPage::parse("https://www.amazon.in/dp/B0", "<body><p>Hi</p></body>");

        assert!(matches!(analyzer.run(&mut page), Err(ConsiaError::NoReviews)));
        assert!(!analyzer.is_busy());
        assert!(matches!(analyzer.run(&mut page), Err(ConsiaError::NoReviews)));
    }

    #[test]
    fn test_generic_page_refused_unless_allowed() {
        let html = "<body><p>This kettle boils water quickly and quietly</p></body>";

        let mut page = HtmlPage::parse("https://shop.example.com/kettle", html);
        let err = analyzer().run(&mut page).unwrap_err();
        assert!(matches!(err, ConsiaError::UnsupportedSite(url) if url.contains("example.com")));

        // Allowed: extraction runs and the send fails at the transport instead
        let mut page = HtmlPage::parse("https://shop.example.com/kettle", html);
        let err = analyzer().allow_any_site(true).run(&mut page).unwrap_err();
        assert!(matches!(err, ConsiaError::BackendUnreachable { .. }));
    }
}
