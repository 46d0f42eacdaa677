use once_cell::sync::Lazy;
use regex::Regex;

// Unicode-aware, so NBSP and line separators collapse too
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Collapse every whitespace run (spaces, tabs, line breaks, NBSP) into one space
/// and trim both ends. Running it on its own output is a no-op.
pub fn normalize_text(content: &str) -> String {
    WHITESPACE_RE.replace_all(content.trim(), " ").into_owned()
}
