//! Loading product pages: over HTTP, or from a saved HTML file.

use std::path::Path;
use std::time::Duration;

use ureq::ResponseExt;

use crate::config::Config;
use crate::error::{ConsiaError, Result};
use crate::page::HtmlPage;

/// Downloads pages with a browser-like User-Agent
pub struct PageFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_secs(config.fetch_timeout_secs),
            config.user_agent.clone(),
        )
    }

    /// GET `url` and parse it. The page keeps the address it was requested
    /// under, since that is what selects the strategy; redirects are logged.
    pub fn fetch(&self, url: &str) -> Result<HtmlPage> {
        check_page_url(url)?;

        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml")
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => {
                    ConsiaError::FetchError(format!("{} returned HTTP {}", url, code))
                }
                other => ConsiaError::HttpError(other),
            })?;

        let final_url = response.get_uri().to_string();
        if final_url != url {
            tracing::debug!(requested = url, final_url = %final_url, "page redirected");
        }
        let html = response.into_body().read_to_string()?;
        tracing::info!(url, bytes = html.len(), "fetched page");

        Ok(HtmlPage::parse(url, &html))
    }
}

/// Parse a saved page, attributing it to `url`
pub fn load_page_file(path: &Path, url: &str) -> Result<HtmlPage> {
    let html = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), url, bytes = html.len(), "loaded saved page");
    Ok(HtmlPage::parse(url, &html))
}

/// A saved file when one is given, otherwise a download
pub fn load_page(url: &str, file: Option<&Path>, config: &Config) -> Result<HtmlPage> {
    match file {
        Some(path) => load_page_file(path, url),
        None => PageFetcher::from_config(config).fetch(url),
    }
}

fn check_page_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConsiaError::FetchError(format!(
            "cannot fetch {} pages, only http and https",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageHandle;

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(matches!(
            check_page_url("file:///etc/passwd"),
            Err(ConsiaError::FetchError(_))
        ));
        assert!(matches!(
            check_page_url("www.amazon.in/dp/B0"),
            Err(ConsiaError::UrlParseError(_))
        ));
        assert!(check_page_url("https://www.flipkart.com/p/itm1").is_ok());
    }

    #[test]
    fn test_load_page_file_keeps_given_url() {
        let path = std::env::temp_dir().join(format!("consia-fetch-{}.html", std::process::id()));
        std::fs::write(&path, "<html><head><title>Saved</title></head></html>").unwrap();

        let page = load_page_file(&path, "https://www.amazon.in/dp/B0").unwrap();
        assert_eq!(page.url(), "https://www.amazon.in/dp/B0");
        assert_eq!(page.document_title().as_deref(), Some("Saved"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_page_file(Path::new("/nonexistent/page.html"), "https://a.example").unwrap_err();
        assert!(matches!(err, ConsiaError::IoError(_)));
    }
}
