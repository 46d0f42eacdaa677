use super::{PriceSource, SiteStrategy, StrategyProfile, TitleSource};
use crate::filter::{CandidateFilter, PRICE_ADJACENT_EXCLUSIONS};
use crate::platform::SiteUrl;

/// Heuristic strategy for any page; always matches, so it sits last in the ranking
pub struct Generic;

static PROFILE: StrategyProfile = StrategyProfile {
    title_chain: &[
        TitleSource::Meta(r#"meta[property="og:title"]"#),
        TitleSource::Text("h1"),
        TitleSource::DocumentTitle,
    ],
    price_chain: &[
        PriceSource::Attr(r#"meta[property="product:price:amount"]"#, "content"),
        PriceSource::Attr(r#"[itemprop="price"]"#, "content"),
        PriceSource::Text(r#"[itemprop="price"]"#),
    ],
    expand_patterns: &[
        r#"button[class*="read-more"]"#,
        r#"a[class*="read-more"]"#,
        r#"[aria-expanded="false"][class*="more"]"#,
    ],
    review_groups: &[
        r#"[itemprop="reviewBody"]"#,
        r#"[class*="review"] p, [class*="review"] span"#,
        "p, span",
    ],
    // Broad scans pick up price blocks, so currency text is excluded here
    filter: CandidateFilter::new(20, 300, PRICE_ADJACENT_EXCLUSIONS),
    cap: 30,
    threshold: 10,
    fallback_limit: 15,
};

impl SiteStrategy for Generic {
    fn id(&self) -> &'static str {
        "generic"
    }

    fn name(&self) -> &'static str {
        "Generic page"
    }

    fn matches(&self, _url: &SiteUrl) -> bool {
        true
    }

    fn profile(&self) -> &'static StrategyProfile {
        &PROFILE
    }
}
