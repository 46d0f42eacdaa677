//! Display model for an analysis result.
//!
//! Everything here is formatting: the numbers were settled by the result
//! normalizer and are only rounded and labelled.

use serde::Serialize;

use crate::result::CanonicalResult;

const STAR_SLOTS: u8 = 5;

/// Overall verdict read from the recommendation text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommended,
    Caution,
    NotRecommended,
    Unknown,
}

impl Verdict {
    /// Markers are checked in this order; the first hit wins
    pub fn classify(recommendation: &str) -> Self {
        if recommendation.contains('✅') || recommendation.contains("Worth Buying") {
            Verdict::Recommended
        } else if recommendation.contains('⚠') || recommendation.contains("Consider") {
            Verdict::Caution
        } else if recommendation.contains('❌') || recommendation.contains("Not Recommended") {
            Verdict::NotRecommended
        } else {
            Verdict::Unknown
        }
    }
}

/// Five star slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Whole stars for the integer part, one half star when the fraction is at
    /// least 0.5, the rest empty. Ratings are clamped to 0..=5.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, f64::from(STAR_SLOTS))
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = full < STAR_SLOTS && rating.fract() >= 0.5;
        let empty = STAR_SLOTS - full - u8::from(half);
        Self { full, half, empty }
    }

    /// Render with ★ for full, ⯪ for half and ☆ for empty slots
    pub fn render(&self) -> String {
        let mut out = "★".repeat(self.full as usize);
        if self.half {
            out.push('⯪');
        }
        out.push_str(&"☆".repeat(self.empty as usize));
        out
    }
}

/// A [`CanonicalResult`] with every field turned into display text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub recommendation: String,
    pub verdict: Verdict,
    pub title: String,
    pub price: String,
    pub positive: String,
    pub negative: String,
    pub neutral: String,
    pub fake_reviews: String,
    pub value_score: String,
    /// `x/5`, absent when the service gave no rating
    pub true_rating: Option<String>,
    pub stars: Option<StarRating>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub summary: Option<String>,
    pub failed: bool,
}

impl From<&CanonicalResult> for ResultView {
    fn from(result: &CanonicalResult) -> Self {
        let rating = result.true_rating.filter(|r| *r > 0.0);

        Self {
            recommendation: result.recommendation.clone(),
            verdict: Verdict::classify(&result.recommendation),
            title: result.title.clone(),
            price: format_price(result.price),
            positive: format_percent(result.sentiment.positive),
            negative: format_percent(result.sentiment.negative),
            neutral: format_percent(result.sentiment.neutral),
            fake_reviews: format_percent(result.fake_percent),
            value_score: format!("{:.0}", result.value_score),
            true_rating: rating.map(|r| format!("{}/5", r)),
            stars: rating.map(StarRating::from_rating),
            pros: result.pros.clone(),
            cons: result.cons.clone(),
            summary: result.summary.clone(),
            failed: result.failed,
        }
    }
}

/// One decimal and a percent sign
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `₹<n>` for a known price, `-` otherwise
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 => format!("₹{}", p),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::normalize_result;
    use serde_json::json;

    #[test]
    fn test_verdict_markers() {
        assert_eq!(Verdict::classify("✅ Worth Buying"), Verdict::Recommended);
        assert_eq!(Verdict::classify("⚠️ Consider Alternatives"), Verdict::Caution);
        assert_eq!(Verdict::classify("❌ Not Recommended"), Verdict::NotRecommended);
        assert_eq!(Verdict::classify("Worth Buying"), Verdict::Recommended);
        assert_eq!(Verdict::classify("Not Enough Data ❓"), Verdict::Unknown);
        assert_eq!(Verdict::classify("Analysis Failed"), Verdict::Unknown);
    }

    #[test]
    fn test_star_rating_slots() {
        assert_eq!(
            StarRating::from_rating(3.7),
            StarRating { full: 3, half: true, empty: 1 }
        );
        assert_eq!(
            StarRating::from_rating(4.2),
            StarRating { full: 4, half: false, empty: 1 }
        );
        assert_eq!(
            StarRating::from_rating(5.0),
            StarRating { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(9.0),
            StarRating { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(f64::NAN),
            StarRating { full: 0, half: false, empty: 5 }
        );
        assert_eq!(StarRating::from_rating(2.5).render(), "★★⯪☆☆");
    }

    #[test]
    fn test_view_formats_metrics() {
        let result = normalize_result(&json!({
            "success": true,
            "recommendation": "✅ Worth Buying",
            "product": {"title": "Widget", "price": 999},
            "metrics": {
                "sentiment": {"positive": 66.66, "negative": 33.34, "neutral": 0},
                "fake_reviews_percent": 5,
                "value_score": 79.6,
                "true_rating": 4.2
            }
        }));
        let view = ResultView::from(&result);

        assert_eq!(view.verdict, Verdict::Recommended);
        assert_eq!(view.price, "₹999");
        assert_eq!(view.positive, "66.7%");
        assert_eq!(view.neutral, "0.0%");
        assert_eq!(view.fake_reviews, "5.0%");
        assert_eq!(view.value_score, "80");
        assert_eq!(view.true_rating.as_deref(), Some("4.2/5"));
        assert!(view.stars.is_some());
    }

    #[test]
    fn test_view_of_missing_values() {
        let view = ResultView::from(&normalize_result(&json!({})));
        assert_eq!(view.price, "-");
        assert_eq!(view.value_score, "0");
        assert!(view.true_rating.is_none());
        assert!(view.stars.is_none());
        assert_eq!(view.verdict, Verdict::Unknown);
    }
}
