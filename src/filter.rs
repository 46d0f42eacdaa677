//! Candidate filter - decides whether a normalized text fragment reads like a review.
//!
//! The rules are data: a length window plus an ordered list of [`Exclusion`]s. A
//! fragment is accepted only when it sits inside the window and trips none of the
//! exclusions. Short genuine reviews get dropped and some product prose gets through.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::price::has_currency;

/// Star glyphs and "4.5 out of 5 stars" style rating text
static RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[★☆⭐]|\b\d(\.\d)?\s*out of\s*5\b").expect("Invalid rating regex")
});

/// Relative posting times: "3 months ago", "a day ago", "an hour ago"
static TIME_AGO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+|a|an)\s+(second|minute|hour|day|week|month|year)s?\s+ago\b")
        .expect("Invalid time-ago regex")
});

/// Moderation and widget boilerplate that surrounds review bodies
static BOILERPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)helpful|verified purchase|report abuse|certified buyer")
        .expect("Invalid boilerplate regex")
});

/// One exclusion rule. A fragment matching any configured rule is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    RatingMarker,
    TimeAgo,
    Boilerplate,
    /// Only used where price blocks sit next to review text
    Currency,
}

impl Exclusion {
    pub fn matches(&self, fragment: &str) -> bool {
        match self {
            Exclusion::RatingMarker => RATING_RE.is_match(fragment),
            Exclusion::TimeAgo => TIME_AGO_RE.is_match(fragment),
            Exclusion::Boilerplate => BOILERPLATE_RE.is_match(fragment),
            Exclusion::Currency => has_currency(fragment),
        }
    }
}

/// Exclusions applied by every strategy
pub const SHARED_EXCLUSIONS: &[Exclusion] = &[
    Exclusion::RatingMarker,
    Exclusion::TimeAgo,
    Exclusion::Boilerplate,
];

/// Shared exclusions plus the currency guard for price-adjacent scans
pub const PRICE_ADJACENT_EXCLUSIONS: &[Exclusion] = &[
    Exclusion::RatingMarker,
    Exclusion::TimeAgo,
    Exclusion::Boilerplate,
    Exclusion::Currency,
];

/// Length window (inclusive, in characters) plus exclusion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateFilter {
    pub min_len: usize,
    pub max_len: usize,
    pub exclusions: &'static [Exclusion],
}

impl CandidateFilter {
    pub const fn new(min_len: usize, max_len: usize, exclusions: &'static [Exclusion]) -> Self {
        Self {
            min_len,
            max_len,
            exclusions,
        }
    }

    /// Pure predicate over an already-normalized fragment
    pub fn is_review_like(&self, fragment: &str) -> bool {
        let len = fragment.chars().count();
        if len < self.min_len || len > self.max_len {
            return false;
        }
        !self.exclusions.iter().any(|rule| rule.matches(fragment))
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(20, 300, SHARED_EXCLUSIONS)
    }
}
