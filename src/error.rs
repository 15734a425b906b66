use thiserror::Error;

/// Result alias used across the scraping library
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// A required element was absent from a parsed page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no full-resolution image element on page")]
    MissingImage,
    #[error("no heading element on page")]
    MissingTitle,
    #[error("no element matching `{0}`")]
    MissingElement(String),
}

/// Errors surfaced by the session, the extractors and the aggregate run
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The session could not reach a URL or read back its markup.
    /// Fatal for the operation that hit it.
    #[error("navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// No WebDriver session could be created
    #[error("failed to connect to WebDriver: {0}")]
    Connect(String),

    /// Recovered locally by every extractor
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Direct (non-session) fetch or table parse failure
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn navigation(url: &str, reason: impl ToString) -> Self {
        ScrapeError::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for faults that leave the session unusable for further navigation
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScrapeError::Navigation { .. } | ScrapeError::Connect(_)
        )
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        ScrapeError::Fetch(e.to_string())
    }
}
