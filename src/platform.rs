//! Site classification - picks the extraction strategy for a page address.
//!
//! Predicates overlap: every review-listing URL of a marketplace is also a URL of
//! that marketplace. The registry is therefore an explicit ranking, most specific
//! first, with the generic strategy as the catch-all at the bottom.

use url::Url;

use crate::strategy::{Amazon, AmazonReviews, Flipkart, FlipkartReviews, Generic, SiteStrategy};

/// A page address prepared for predicate matching.
///
/// Addresses that fail to parse keep only the raw text; predicates then fall back
/// to substring checks on it.
#[derive(Debug, Clone)]
pub struct SiteUrl {
    raw: String,
    host: Option<String>,
    segments: Vec<String>,
}

impl SiteUrl {
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw.trim()) {
            Ok(url) => Self {
                raw: raw.to_string(),
                host: url.host_str().map(|h| h.to_lowercase()),
                segments: url
                    .path_segments()
                    .map(|segs| segs.filter(|s| !s.is_empty()).map(String::from).collect())
                    .unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!(url = raw, error = %e, "unparsable page address");
                Self {
                    raw: raw.to_lowercase(),
                    host: None,
                    segments: Vec::new(),
                }
            }
        }
    }

    /// True when one dot-separated label of the host equals `label`
    /// (`www.amazon.co.uk` has the label `amazon`)
    pub fn host_has_label(&self, label: &str) -> bool {
        match &self.host {
            Some(host) => host.split('.').any(|l| l == label),
            None => self.raw.contains(&format!("{}.", label)),
        }
    }

    /// True when one path segment equals `segment`
    pub fn path_has_segment(&self, segment: &str) -> bool {
        match &self.host {
            Some(_) => self.segments.iter().any(|s| s == segment),
            None => self.raw.contains(&format!("/{}", segment)),
        }
    }
}

/// Ordered strategy registry
pub struct SiteClassifier {
    strategies: Vec<Box<dyn SiteStrategy>>,
}

impl SiteClassifier {
    /// The built-in ranking: listings before their marketplaces, generic last
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(AmazonReviews),
                Box::new(Amazon),
                Box::new(FlipkartReviews),
                Box::new(Flipkart),
                Box::new(Generic),
            ],
        }
    }

    /// A custom ranking; the generic strategy is appended so classification
    /// always succeeds
    pub fn with_strategies(mut strategies: Vec<Box<dyn SiteStrategy>>) -> Self {
        strategies.push(Box::new(Generic));
        Self { strategies }
    }

    /// First strategy in ranking order whose predicate matches `url`
    pub fn classify(&self, url: &str) -> &dyn SiteStrategy {
        let site = SiteUrl::parse(url);
        for strategy in &self.strategies {
            if strategy.matches(&site) {
                tracing::debug!(url, strategy = strategy.id(), "classified page");
                return strategy.as_ref();
            }
        }
        &Generic
    }

    /// Strategy identifiers in ranking order
    pub fn ranking(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }
}

impl Default for SiteClassifier {
    fn default() -> Self {
        Self::new()
    }
}
