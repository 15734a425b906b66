use crate::filter::LinkFilterConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for one scrape run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Page listing the latest news articles
    #[serde(default = "default_news_url")]
    pub news_url: String,

    /// Page with the featured image gallery
    #[serde(default = "default_featured_image_url")]
    pub featured_image_url: String,

    /// Base for relative featured image paths
    #[serde(default = "default_featured_image_base_url")]
    pub featured_image_base_url: String,

    /// Page holding the Mars/Earth comparison table
    #[serde(default = "default_facts_url")]
    pub facts_url: String,

    /// Listing page linking to each hemisphere
    #[serde(default = "default_hemispheres_url")]
    pub hemispheres_url: String,

    /// Base for relative hemisphere image paths
    #[serde(default = "default_hemisphere_image_base_url")]
    pub hemisphere_image_base_url: String,

    /// Advisory wait for dynamic elements to render, in seconds
    #[serde(default = "default_render_wait_secs")]
    pub render_wait_secs: u64,

    /// Timeout for direct HTTP fetches, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Extra rules for skipping hemisphere links
    #[serde(default)]
    pub link_filter: LinkFilterConfig,
}

impl ScrapeConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                ::log::debug!("Using WebDriver URL from environment: {}", webdriver_url);
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            news_url: default_news_url(),
            featured_image_url: default_featured_image_url(),
            featured_image_base_url: default_featured_image_base_url(),
            facts_url: default_facts_url(),
            hemispheres_url: default_hemispheres_url(),
            hemisphere_image_base_url: default_hemisphere_image_base_url(),
            render_wait_secs: default_render_wait_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            link_filter: LinkFilterConfig::default(),
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_news_url() -> String {
    "https://data-class-mars.s3.amazonaws.com/Mars/index.html".to_string()
}

fn default_featured_image_url() -> String {
    "https://data-class-jpl-space.s3.amazonaws.com/JPL_Space/index.html".to_string()
}

fn default_featured_image_base_url() -> String {
    "https://data-class-jpl-space.s3.amazonaws.com/JPL_Space/".to_string()
}

fn default_facts_url() -> String {
    "https://data-class-mars-facts.s3.amazonaws.com/Mars_Facts/index.html".to_string()
}

fn default_hemispheres_url() -> String {
    "https://marshemispheres.com/".to_string()
}

fn default_hemisphere_image_base_url() -> String {
    "https://marshemispheres.com/".to_string()
}

fn default_render_wait_secs() -> u64 {
    1
}

fn default_request_timeout_secs() -> u64 {
    30
}
