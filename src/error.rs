use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsiaError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Page fetch failed: {0}")]
    FetchError(String),

    #[error("Element is not interactive: {0}")]
    NotInteractive(String),

    #[error("No reviews found on this page")]
    NoReviews,

    #[error("Not a supported marketplace page: {0}")]
    UnsupportedSite(String),

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("Analysis service not reachable at {url}: {reason}")]
    BackendUnreachable { url: String, reason: String },

    #[error("Analysis service returned {status}: {message}")]
    BackendStatus { status: u16, message: String },

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Analysis service sent an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ConsiaError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConsiaError::BackendUnreachable { .. } => Some(
                "Start the analysis service first:\n  python app.py\nOr point consia at it: CONSIA_BACKEND_URL=http://host:port"
            ),
            ConsiaError::BackendStatus { .. } => Some(
                "Check the analysis service logs, then retry:\n  consia doctor"
            ),
            ConsiaError::InvalidResponse(_) => Some(
                "Make sure backend_url points at the analysis service, not another server"
            ),
            ConsiaError::NoReviews => Some(
                "Open the product's review page, or save the page after expanding reviews:\n  consia analyze <url> --file page.html"
            ),
            ConsiaError::UnsupportedSite(_) => Some(
                "Open an Amazon or Flipkart product page, or force it:\n  consia analyze <url> --any-site"
            ),
            ConsiaError::AnalysisInProgress => Some(
                "Wait for the running analysis to finish"
            ),
            ConsiaError::FetchError(_) | ConsiaError::HttpError(_) => Some(
                "Check your internet connection, or save the page and use:\n  consia extract <url> --file page.html"
            ),
            ConsiaError::ConfigError(_) | ConsiaError::TomlError(_) => Some(
                "Inspect the active configuration with `consia config`"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsiaError>;
