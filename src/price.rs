use once_cell::sync::Lazy;
use regex::Regex;

/// Currency markers that flag a price-bearing fragment
static CURRENCY_MARK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[₹$€£]|\bRs\.?|\bINR\b").expect("Invalid currency marker regex")
});

/// First run of digits with optional thousands separators and decimals
static NUMBER_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?").expect("Invalid number regex")
});

/// Does the fragment carry a currency marker?
pub fn has_currency(text: &str) -> bool {
    CURRENCY_MARK_RE.is_match(text)
}

/// Parse a price out of a fragment like "₹1,299" or "Rs. 1,299.00".
///
/// The first numeric run after the first currency marker (or the first run anywhere,
/// when there is no marker) is stripped of everything but digits and '.' and parsed.
/// Missing or unparseable numbers give 0.0, meaning "unknown".
pub fn parse_price(text: &str) -> f64 {
    let start = CURRENCY_MARK_RE.find(text).map(|m| m.end()).unwrap_or(0);
    let Some(run) = NUMBER_RUN_RE.find(&text[start..]) else {
        return 0.0;
    };

    let digits: String = run
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}
