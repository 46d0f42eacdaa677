//! Site strategies - interchangeable extraction variants.
//!
//! A strategy is a URL predicate plus a [`StrategyProfile`]: ordered tables of
//! selectors for the title, price, expansion controls and review containers, and
//! the filter, cap and threshold its review cascade runs with. Variants differ only
//! in those tables; filtering and cascading are shared.

mod amazon;
mod flipkart;
mod generic;

pub use amazon::{Amazon, AmazonReviews};
pub use flipkart::{Flipkart, FlipkartReviews};
pub use generic::Generic;

use serde::{Deserialize, Serialize};

use crate::cascade::{self, CascadeOutcome};
use crate::filter::CandidateFilter;
use crate::normalize::normalize_text;
use crate::page::PageHandle;
use crate::platform::SiteUrl;
use crate::price::{has_currency, parse_price};

/// Longest fragment the generic currency scan treats as a price label
const MAX_PRICE_LABEL_CHARS: usize = 40;

/// Where a title candidate comes from
#[derive(Debug, Clone, Copy)]
pub enum TitleSource {
    /// `content` attribute of a matching meta tag
    Meta(&'static str),
    /// Text of the first matching element
    Text(&'static str),
    /// The document's `<title>`
    DocumentTitle,
}

/// Where a price candidate comes from
#[derive(Debug, Clone, Copy)]
pub enum PriceSource {
    /// An attribute on the matching element (e.g. `content` on itemprop tags)
    Attr(&'static str, &'static str),
    /// Text of each matching element
    Text(&'static str),
}

/// Declarative extraction tables for one strategy
#[derive(Debug, Clone, Copy)]
pub struct StrategyProfile {
    pub title_chain: &'static [TitleSource],
    pub price_chain: &'static [PriceSource],
    pub expand_patterns: &'static [&'static str],
    pub review_groups: &'static [&'static str],
    pub filter: CandidateFilter,
    /// Hard upper bound on returned reviews
    pub cap: usize,
    /// "Good enough" count that ends the group cascade early
    pub threshold: usize,
    /// Sentences kept by the full-page fallback
    pub fallback_limit: usize,
}

/// Title, price and reviews for one page; what the analysis service receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionPayload {
    pub title: String,
    /// 0 means unknown
    pub price: f64,
    pub reviews: Vec<String>,
}

pub trait SiteStrategy: Send + Sync {
    /// Stable identifier used in logs and JSON output
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn matches(&self, url: &SiteUrl) -> bool;

    fn profile(&self) -> &'static StrategyProfile;

    /// First non-empty candidate from the title chain, or ""
    fn extract_title(&self, page: &dyn PageHandle) -> String {
        resolve_title(page, self.profile().title_chain)
    }

    /// First positive price from the price chain, then the generic currency scan
    fn extract_price(&self, page: &dyn PageHandle) -> f64 {
        let price = resolve_price(page, self.profile().price_chain);
        if price > 0.0 {
            return price;
        }
        scan_currency_price(page)
    }

    /// Run the review cascade and keep the diagnostics
    fn review_cascade(&self, page: &dyn PageHandle) -> CascadeOutcome {
        cascade::run(page, self.profile())
    }

    fn extract_reviews(&self, page: &dyn PageHandle) -> Vec<String> {
        self.review_cascade(page).reviews
    }

    fn extract(&self, page: &dyn PageHandle) -> ExtractionPayload {
        ExtractionPayload {
            title: self.extract_title(page),
            price: self.extract_price(page),
            reviews: self.extract_reviews(page),
        }
    }
}

pub fn resolve_title(page: &dyn PageHandle, chain: &[TitleSource]) -> String {
    for source in chain {
        let candidate = match source {
            TitleSource::Meta(selector) => page.select_attr(selector, "content").into_iter().next(),
            TitleSource::Text(selector) => page.select_text(selector).into_iter().next(),
            TitleSource::DocumentTitle => page.document_title(),
        };
        if let Some(title) = candidate.map(|t| normalize_text(&t)).filter(|t| !t.is_empty()) {
            return title;
        }
    }
    String::new()
}

pub fn resolve_price(page: &dyn PageHandle, chain: &[PriceSource]) -> f64 {
    for source in chain {
        let values = match source {
            PriceSource::Attr(selector, attr) => page.select_attr(selector, attr),
            PriceSource::Text(selector) => page.select_text(selector),
        };
        if let Some(price) = values.iter().map(|v| parse_price(v)).find(|p| *p > 0.0) {
            return price;
        }
    }
    0.0
}

/// First short `span`/`div` label carrying a currency marker
pub fn scan_currency_price(page: &dyn PageHandle) -> f64 {
    page.select_text("span, div")
        .iter()
        .map(|t| normalize_text(t))
        .filter(|t| t.chars().count() <= MAX_PRICE_LABEL_CHARS && has_currency(t))
        .map(|t| parse_price(&t))
        .find(|p| *p > 0.0)
        .unwrap_or(0.0)
}
