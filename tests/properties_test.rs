//! Properties that must hold for every input, not just the sample pages

use proptest::prelude::*;
use serde_json::json;

use consia::cascade::{run_groups, sentence_fallback, CascadeLimits};
use consia::dedupe::dedupe;
use consia::extract::extract_payload;
use consia::filter::{CandidateFilter, SHARED_EXCLUSIONS};
use consia::normalize::normalize_text;
use consia::page::HtmlPage;
use consia::platform::SiteClassifier;
use consia::price::parse_price;
use consia::result::normalize_result;

const FILTER: CandidateFilter = CandidateFilter::new(20, 300, SHARED_EXCLUSIONS);

/// 1234567 -> "1,234,567"
fn with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn clean_sentence() -> impl Strategy<Value = String> {
    "[a-z]{3,8}( [a-z]{3,8}){4,10}".prop_filter("no excluded words", |s| {
        !s.contains("helpful") && !s.contains("ago")
    })
}

proptest! {
    #[test]
    fn dedupe_has_no_repeats_and_respects_cap(
        items in prop::collection::vec("[abc]{1,2}", 0..40),
        cap in 0usize..20,
    ) {
        let out = dedupe(items.clone(), cap);
        prop_assert!(out.len() <= cap);

        let mut seen = std::collections::HashSet::new();
        for item in &out {
            prop_assert!(seen.insert(item.clone()));
        }

        let mut firsts: Vec<String> = Vec::new();
        for item in items {
            if !firsts.contains(&item) {
                firsts.push(item);
            }
        }
        prop_assert_eq!(&out[..], &firsts[..out.len()]);
    }

    #[test]
    fn price_with_currency_parses_separated_digits(n in 1u64..100_000_000) {
        let text = format!("₹{}", with_separators(n));
        prop_assert_eq!(parse_price(&text), n as f64);
    }

    #[test]
    fn price_without_digits_is_zero(s in "[a-zA-Z ₹$.,]{0,30}") {
        prop_assert_eq!(parse_price(&s), 0.0);
    }

    #[test]
    fn fragments_with_markers_are_rejected(
        head in "[a-z ]{10,40}",
        marker in prop::sample::select(vec![
            "★", "⭐", "4 out of 5", "Verified Purchase", "helpful", "3 months ago", "a day ago",
        ]),
        tail in "[a-z ]{10,40}",
    ) {
        let fragment = format!("{} {} {}", head, marker, tail);
        prop_assert!(!FILTER.is_review_like(&fragment));
    }

    #[test]
    fn normalize_is_idempotent(s in "\\PC*") {
        let once = normalize_text(&s);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }

    #[test]
    fn cascade_falls_back_to_sentences(sentence in clean_sentence()) {
        prop_assume!(sentence.chars().count() >= 20);

        let (structured, tried) = run_groups(
            &["div.none", "span.none"],
            |_| Vec::new(),
            &FILTER,
            CascadeLimits { cap: 30, threshold: 10 },
        );
        prop_assert!(structured.is_empty());
        prop_assert_eq!(tried, 2);

        let text = format!("Menu\n{}. Ok", sentence);
        let fallback = sentence_fallback(&text, &FILTER, 15);
        prop_assert_eq!(fallback, vec![sentence.clone()]);

        let html = format!("<html><body><div class=\"x\">{}.</div></body></html>", sentence);
        let mut page = HtmlPage::parse("https://www.amazon.in/dp/B0", &html);
        let extraction = extract_payload(&mut page, &SiteClassifier::new());
        prop_assert_eq!(extraction.payload.reviews, vec![sentence]);
    }

    #[test]
    fn nested_sentiment_wins(nested in 0.0f64..100.0, flat in 0.0f64..100.0) {
        let raw = json!({
            "sentiment": {"positive": flat},
            "metrics": {"sentiment": {"positive_percent": nested}}
        });
        prop_assert_eq!(normalize_result(&raw).sentiment.positive, nested);
    }

    #[test]
    fn failure_message_becomes_recommendation(message in "[a-zA-Z ]{1,40}") {
        let result = normalize_result(&json!({"success": false, "error": message, "value_score": 90}));
        prop_assert!(result.failed);
        prop_assert_eq!(&result.recommendation, &message);
        prop_assert_eq!(result.value_score, 0.0);
        prop_assert_eq!(result.fake_percent, 0.0);
        prop_assert_eq!(result.sentiment.positive, 0.0);
    }

    #[test]
    fn normalizer_accepts_any_field_types(
        value in prop_oneof![
            Just(json!(null)),
            any::<bool>().prop_map(|b| json!(b)),
            any::<i64>().prop_map(|n| json!(n)),
            "\\PC{0,10}".prop_map(|s| json!(s)),
            Just(json!([1, "a", null])),
            Just(json!({"nested": true})),
        ],
    ) {
        let raw = json!({
            "recommendation": value,
            "sentiment": value,
            "metrics": {"value_score": value, "true_rating": value},
            "pros": value,
            "product": value,
        });
        let result = normalize_result(&raw);
        prop_assert!(result.value_score.is_finite());
        prop_assert!(!result.recommendation.is_empty());
    }
}
