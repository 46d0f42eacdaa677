//! Page handle - read access to the loaded document plus the one side effect
//! extraction is allowed to have (activating "read more" style controls).

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{ConsiaError, Result};
use crate::normalize::normalize_text;

/// Elements whose content is never visible text
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of visible text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Tags that respond to activation without extra attributes
const INTERACTIVE_TAGS: &[&str] = &["a", "button", "summary", "input", "label"];

/// Query-by-pattern access to a document. Selectors are CSS.
pub trait PageHandle {
    /// Address the document was loaded from
    fn url(&self) -> &str;

    /// Text content of every element matching `selector`, in document order
    fn select_text(&self, selector: &str) -> Vec<String>;

    /// Value of `attr` on every matching element that has it
    fn select_attr(&self, selector: &str, attr: &str) -> Vec<String>;

    /// The document's own `<title>`
    fn document_title(&self) -> Option<String>;

    /// All visible text, one line per block element
    fn visible_text(&self) -> String;

    /// Activate every element matching `selector`; one result per element
    fn activate(&mut self, selector: &str) -> Vec<Result<()>>;
}

/// A static HTML document parsed with `scraper`
#[derive(Debug)]
pub struct HtmlPage {
    url: String,
    document: Html,
    activated: Vec<String>,
}

impl HtmlPage {
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
            activated: Vec::new(),
        }
    }

    /// Descriptions of the elements activated so far, in order
    pub fn activations(&self) -> &[String] {
        &self.activated
    }

    fn selector(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid selector, treating as no match");
                None
            }
        }
    }
}

/// Non-empty trimmed text nodes under `root`, skipping hidden subtrees
fn text_nodes(root: ElementRef<'_>) -> Vec<String> {
    let mut parts = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .map(|e| HIDDEN_TAGS.contains(&e.name()))
                .unwrap_or(false)
        });
        let trimmed = text.trim();
        if !hidden && !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    parts
}

/// Rendered-text walk: inline elements flow into the surrounding line, block
/// elements break it. Whitespace inside text nodes collapses to spaces.
fn push_rendered_text(root: ElementRef<'_>, out: &mut String) {
    for child in root.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(el) if HIDDEN_TAGS.contains(&el.name()) => {}
            Node::Element(el) => {
                let block = BLOCK_TAGS.contains(&el.name());
                if block {
                    out.push('\n');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    push_rendered_text(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn is_interactive(el: &ElementRef<'_>) -> bool {
    let value = el.value();
    INTERACTIVE_TAGS.contains(&value.name())
        || value.attr("role") == Some("button")
        || value.attr("onclick").is_some()
        || value.attr("tabindex").is_some()
}

fn describe(el: &ElementRef<'_>) -> String {
    let value = el.value();
    match (value.id(), value.classes().next()) {
        (Some(id), _) => format!("{}#{}", value.name(), id),
        (None, Some(class)) => format!("{}.{}", value.name(), class),
        (None, None) => value.name().to_string(),
    }
}

impl PageHandle for HtmlPage {
    fn url(&self) -> &str {
        &self.url
    }

    fn select_text(&self, selector: &str) -> Vec<String> {
        let Some(selector) = Self::selector(selector) else {
            return Vec::new();
        };
        self.document
            .select(&selector)
            .map(|el| text_nodes(el).join(" "))
            .collect()
    }

    fn select_attr(&self, selector: &str, attr: &str) -> Vec<String> {
        let Some(selector) = Self::selector(selector) else {
            return Vec::new();
        };
        self.document
            .select(&selector)
            .filter_map(|el| el.value().attr(attr).map(String::from))
            .collect()
    }

    fn document_title(&self) -> Option<String> {
        let selector = Self::selector("title")?;
        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn visible_text(&self) -> String {
        let Some(body) = Self::selector("body").and_then(|s| self.document.select(&s).next()) else {
            return String::new();
        };

        let mut rendered = String::new();
        push_rendered_text(body, &mut rendered);
        rendered
            .lines()
            .map(normalize_text)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn activate(&mut self, selector: &str) -> Vec<Result<()>> {
        let Some(parsed) = Self::selector(selector) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        for el in self.document.select(&parsed) {
            let label = describe(&el);
            if is_interactive(&el) {
                self.activated.push(label);
                results.push(Ok(()));
            } else {
                results.push(Err(ConsiaError::NotInteractive(label)));
            }
        }
        results
    }
}
