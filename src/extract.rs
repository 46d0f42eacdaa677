//! Page extraction: classify → expand → title/price → review cascade.

use serde::{Deserialize, Serialize};

use crate::cascade::ReviewSource;
use crate::expand::expand;
use crate::page::PageHandle;
use crate::platform::SiteClassifier;
use crate::strategy::ExtractionPayload;

/// Payload plus how it was obtained
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub payload: ExtractionPayload,
    pub strategy: &'static str,
    pub expanded: usize,
    pub source: ReviewSource,
}

impl Extraction {
    pub fn is_generic(&self) -> bool {
        self.strategy == "generic"
    }
}

/// Extract title, price and reviews from `page` with the strategy its URL selects.
///
/// Expansion runs exactly once, before anything is read. Never fails: an empty
/// `reviews` list is how "nothing found" is reported.
pub fn extract_payload(page: &mut dyn PageHandle, classifier: &SiteClassifier) -> Extraction {
    let url = page.url().to_string();
    let strategy = classifier.classify(&url);
    let profile = strategy.profile();

    let expanded = expand(page, profile.expand_patterns);

    let page: &dyn PageHandle = page;
    let title = strategy.extract_title(page);
    let price = strategy.extract_price(page);
    let outcome = strategy.review_cascade(page);

    tracing::info!(
        url = %url,
        strategy = strategy.id(),
        reviews = outcome.reviews.len(),
        price,
        "extracted page"
    );

    Extraction {
        payload: ExtractionPayload {
            title,
            price,
            reviews: outcome.reviews,
        },
        strategy: strategy.id(),
        expanded,
        source: outcome.source,
    }
}

/// Message delivered to the page context
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageCommand {
    Extract,
}

/// Answer a raw page message. Unknown actions get no reply.
pub fn handle_message(
    page: &mut dyn PageHandle,
    classifier: &SiteClassifier,
    raw: &str,
) -> Option<ExtractionPayload> {
    match serde_json::from_str::<PageCommand>(raw) {
        Ok(PageCommand::Extract) => Some(extract_payload(page, classifier).payload),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring page message");
            None
        }
    }
}
