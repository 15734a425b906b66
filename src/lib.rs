// Re-export modules
pub mod aggregate;
pub mod config;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use error::{ExtractionError, Result, ScrapeError};
pub use results::{AggregateResult, HemisphereRecord, ResultCollection};
pub use session::Session;

/// Main builder for a full Mars scrape run
pub struct Scraper {
    config: ScrapeConfig,
    webdriver_url: Option<String>,
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new()
    }
}

impl Scraper {
    /// Create a new Scraper with the default configuration
    pub fn new() -> Self {
        Self {
            config: ScrapeConfig::default(),
            webdriver_url: None,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config = ScrapeConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(
        self,
        config_str: &str,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config = ScrapeConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the WebDriver URL, taking precedence over `WEBDRIVER_URL`
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.webdriver_url = Some(webdriver_url.to_string());
        self
    }

    /// Run the browser with or without a window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// The configuration a run would use
    pub fn resolved_config(&self) -> ScrapeConfig {
        let mut config = self.config.clone();
        config.apply_env();
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }
        config
    }

    /// Connect to the browser and run every extractor
    pub async fn run(self) -> Result<AggregateResult> {
        let config = self.resolved_config();
        ::log::info!("Starting Mars scrape via WebDriver at {}", config.webdriver_url);
        aggregate::scrape_all(&config).await
    }
}
