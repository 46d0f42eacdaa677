use super::{PriceSource, SiteStrategy, StrategyProfile, TitleSource};
use crate::filter::{CandidateFilter, SHARED_EXCLUSIONS};
use crate::platform::SiteUrl;

// Flipkart ships obfuscated class names and rotates them between layout versions,
// so each slot lists the current names first and older ones after.

const PRICE_CHAIN: &[PriceSource] = &[
    PriceSource::Text("div.Nx9bqj.CxhGGd"),
    PriceSource::Text("div.Nx9bqj"),
    PriceSource::Text("div._30jeq3._16Jk6d"),
    PriceSource::Text("div._30jeq3"),
];

const EXPAND_PATTERNS: &[&str] = &["span.b4x-fr", "span._1BWGvX", "span.wTYmpv"];

// Review text sits in a nested div next to a "READ MORE" span
const REVIEW_GROUPS: &[&str] = &[
    "div.ZmyHeo > div > div",
    "div.t-ZTKy > div > div",
    "div._6K-7Co",
    "div.qwjRop > div",
];

/// Flipkart product pages
pub struct Flipkart;

static PRODUCT_PROFILE: StrategyProfile = StrategyProfile {
    title_chain: &[
        TitleSource::Text("span.VU-ZEz"),
        TitleSource::Text("span.B_NuCI"),
        TitleSource::Text("h1"),
        TitleSource::Meta(r#"meta[property="og:title"]"#),
        TitleSource::DocumentTitle,
    ],
    price_chain: PRICE_CHAIN,
    expand_patterns: EXPAND_PATTERNS,
    review_groups: REVIEW_GROUPS,
    filter: CandidateFilter::new(30, 1000, SHARED_EXCLUSIONS),
    cap: 30,
    threshold: 10,
    fallback_limit: 15,
};

impl SiteStrategy for Flipkart {
    fn id(&self) -> &'static str {
        "flipkart"
    }

    fn name(&self) -> &'static str {
        "Flipkart product page"
    }

    fn matches(&self, url: &SiteUrl) -> bool {
        url.host_has_label("flipkart")
    }

    fn profile(&self) -> &'static StrategyProfile {
        &PRODUCT_PROFILE
    }
}

/// Flipkart "all reviews" listing pages; every one of these also matches [`Flipkart`]
pub struct FlipkartReviews;

static LISTING_PROFILE: StrategyProfile = StrategyProfile {
    title_chain: &[
        TitleSource::Text("div._2s4DIt"),
        TitleSource::Text("div.Vu3-9u"),
        TitleSource::Text("h1"),
        TitleSource::Meta(r#"meta[property="og:title"]"#),
        TitleSource::DocumentTitle,
    ],
    price_chain: PRICE_CHAIN,
    expand_patterns: EXPAND_PATTERNS,
    review_groups: REVIEW_GROUPS,
    filter: CandidateFilter::new(30, 1000, SHARED_EXCLUSIONS),
    cap: 40,
    threshold: 15,
    fallback_limit: 15,
};

impl SiteStrategy for FlipkartReviews {
    fn id(&self) -> &'static str {
        "flipkart-reviews"
    }

    fn name(&self) -> &'static str {
        "Flipkart review listing"
    }

    fn matches(&self, url: &SiteUrl) -> bool {
        url.host_has_label("flipkart") && url.path_has_segment("product-reviews")
    }

    fn profile(&self) -> &'static StrategyProfile {
        &LISTING_PROFILE
    }
}
