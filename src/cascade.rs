//! Review extraction cascade.
//!
//! Query groups are tried in priority order and their accepted fragments pooled
//! until the strategy's threshold is reached. Only when no group yields anything
//! does the cascade drop to splitting the page's visible text into sentences.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::dedupe::Deduper;
use crate::filter::CandidateFilter;
use crate::normalize::normalize_text;
use crate::page::PageHandle;
use crate::strategy::StrategyProfile;

/// Sentence terminators (including the Devanagari danda) and line breaks
static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?।]+|\n").expect("Invalid sentence split regex")
});

/// Which level of the cascade produced the reviews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewSource {
    /// Structured query groups; `groups_tried` counts how many ran before stopping
    Structured { groups_tried: usize },
    SentenceFallback,
    /// Nothing found at any level
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeOutcome {
    pub reviews: Vec<String>,
    pub source: ReviewSource,
}

/// Limits the group loop runs under
#[derive(Debug, Clone, Copy)]
pub struct CascadeLimits {
    pub cap: usize,
    pub threshold: usize,
}

impl From<&StrategyProfile> for CascadeLimits {
    fn from(profile: &StrategyProfile) -> Self {
        Self {
            cap: profile.cap,
            threshold: profile.threshold,
        }
    }
}

/// Run the full cascade for one strategy profile against a page
pub fn run(page: &dyn PageHandle, profile: &StrategyProfile) -> CascadeOutcome {
    let (reviews, groups_tried) = run_groups(
        profile.review_groups,
        |group| page.select_text(group),
        &profile.filter,
        CascadeLimits::from(profile),
    );

    if !reviews.is_empty() {
        tracing::debug!(count = reviews.len(), groups_tried, "structured review groups matched");
        return CascadeOutcome {
            reviews,
            source: ReviewSource::Structured { groups_tried },
        };
    }

    let limit = profile.fallback_limit.min(profile.cap);
    let reviews = sentence_fallback(&page.visible_text(), &profile.filter, limit);
    let source = if reviews.is_empty() {
        ReviewSource::Empty
    } else {
        ReviewSource::SentenceFallback
    };
    tracing::debug!(count = reviews.len(), ?source, "structured groups empty, used sentence fallback");

    CascadeOutcome { reviews, source }
}

/// Try each group in order, pooling accepted fragments without repeats.
///
/// Stops after a group once `threshold` fragments are held, and mid-group as soon
/// as `cap` is reached. Returns the fragments and the number of groups queried.
pub fn run_groups<F>(
    groups: &[&str],
    mut query: F,
    filter: &CandidateFilter,
    limits: CascadeLimits,
) -> (Vec<String>, usize)
where
    F: FnMut(&str) -> Vec<String>,
{
    let mut pool = Deduper::with_cap(limits.cap);
    let mut tried = 0;

    for group in groups {
        if pool.is_full() || pool.len() >= limits.threshold {
            break;
        }
        tried += 1;

        for raw in query(group) {
            let fragment = normalize_text(&raw);
            if filter.is_review_like(&fragment) {
                pool.push(fragment);
                if pool.is_full() {
                    break;
                }
            }
        }
    }

    (pool.into_vec(), tried)
}

/// Split text into sentence-like segments, normalized, empty ones dropped
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(normalize_text)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Last-resort extraction: the first `limit` distinct sentences that pass the filter
pub fn sentence_fallback(text: &str, filter: &CandidateFilter, limit: usize) -> Vec<String> {
    let mut pool = Deduper::with_cap(limit);
    for sentence in split_sentences(text) {
        if pool.is_full() {
            break;
        }
        if filter.is_review_like(&sentence) {
            pool.push(sentence);
        }
    }
    pool.into_vec()
}
