use super::{PriceSource, SiteStrategy, StrategyProfile, TitleSource};
use crate::filter::{CandidateFilter, SHARED_EXCLUSIONS};
use crate::platform::SiteUrl;

const PRICE_CHAIN: &[PriceSource] = &[
    PriceSource::Text(".a-price .a-offscreen"),
    PriceSource::Text("#corePrice_feature_div .a-price-whole"),
    PriceSource::Text("#priceblock_dealprice"),
    PriceSource::Text("#priceblock_ourprice"),
    PriceSource::Text(".a-price-whole"),
];

const EXPAND_PATTERNS: &[&str] = &[
    r#"a[data-hook="expand-collapse-read-more-less"]"#,
    ".a-expander-prompt",
    r#"[data-action="a-expander-toggle"] a"#,
];

/// Amazon product detail pages
pub struct Amazon;

static PRODUCT_PROFILE: StrategyProfile = StrategyProfile {
    title_chain: &[
        TitleSource::Text("#productTitle"),
        TitleSource::Meta(r#"meta[property="og:title"]"#),
        TitleSource::Text("h1"),
        TitleSource::DocumentTitle,
    ],
    price_chain: PRICE_CHAIN,
    expand_patterns: EXPAND_PATTERNS,
    review_groups: &[
        r#"[data-hook="review-body"] span"#,
        r#"[data-hook="review-collapsed"] span"#,
        ".review-text-content span",
        "#cm-cr-dp-review-list .a-expander-content",
    ],
    filter: CandidateFilter::new(20, 1000, SHARED_EXCLUSIONS),
    cap: 30,
    threshold: 10,
    fallback_limit: 15,
};

impl SiteStrategy for Amazon {
    fn id(&self) -> &'static str {
        "amazon"
    }

    fn name(&self) -> &'static str {
        "Amazon product page"
    }

    fn matches(&self, url: &SiteUrl) -> bool {
        url.host_has_label("amazon")
    }

    fn profile(&self) -> &'static StrategyProfile {
        &PRODUCT_PROFILE
    }
}

/// Amazon "all reviews" listing pages; every one of these also matches [`Amazon`]
pub struct AmazonReviews;

static LISTING_PROFILE: StrategyProfile = StrategyProfile {
    title_chain: &[
        TitleSource::Text(r#"[data-hook="product-link"]"#),
        TitleSource::Meta(r#"meta[property="og:title"]"#),
        TitleSource::Text("h1"),
        TitleSource::DocumentTitle,
    ],
    price_chain: PRICE_CHAIN,
    expand_patterns: EXPAND_PATTERNS,
    review_groups: &[
        r#"#cm_cr-review_list [data-hook="review-body"] span"#,
        r#"[data-hook="review-body"] span"#,
        ".review-text-content span",
    ],
    filter: CandidateFilter::new(20, 1000, SHARED_EXCLUSIONS),
    cap: 40,
    threshold: 15,
    fallback_limit: 15,
};

impl SiteStrategy for AmazonReviews {
    fn id(&self) -> &'static str {
        "amazon-reviews"
    }

    fn name(&self) -> &'static str {
        "Amazon review listing"
    }

    fn matches(&self, url: &SiteUrl) -> bool {
        url.host_has_label("amazon") && url.path_has_segment("product-reviews")
    }

    fn profile(&self) -> &'static StrategyProfile {
        &LISTING_PROFILE
    }
}
