use crate::error::{Result, ScrapeError};
use crate::session::{ElementHandle, Session};
use async_trait::async_trait;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Endpoints tried when the configured WebDriver URL refuses the connection
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A [`Session`] backed by a WebDriver browser
pub struct WebDriverSession {
    client: Client,
    closed: bool,
}

impl WebDriverSession {
    /// Connects to the WebDriver instance, falling back to common local endpoints
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let capabilities = browser_capabilities(headless);

        match new_client(webdriver_url, &capabilities).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self::from_client(client));
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    webdriver_url,
                    e
                );
            }
        }

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = new_client(url, &capabilities).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self::from_client(client));
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect(format!(
            "no WebDriver server reachable at {} or fallbacks",
            webdriver_url
        )))
    }

    /// Wrap an already connected client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            closed: false,
        }
    }

    async fn current_url(&self) -> String {
        match self.client.current_url().await {
            Ok(url) => url.to_string(),
            Err(_) => "<unknown>".to_string(),
        }
    }
}

async fn new_client(
    webdriver_url: &str,
    capabilities: &Capabilities,
) -> std::result::Result<Client, fantoccini::error::NewSessionError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder.connect(webdriver_url).await
}

/// Chrome and Firefox options for a (possibly headless) browser
fn browser_capabilities(headless: bool) -> Capabilities {
    let mut capabilities = Capabilities::new();
    if headless {
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless", "--disable-gpu", "--no-sandbox"] }),
        );
        capabilities.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    capabilities
}

/// Converts a WebDriver command error into a navigation fault
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> ScrapeError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, error);
    }
    ScrapeError::navigation(url, format!("{}: {}", context, error))
}

#[async_trait]
impl Session for WebDriverSession {
    async fn visit(&mut self, url: &str) -> Result<()> {
        ::log::debug!("VISIT: {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))
    }

    async fn back(&mut self) -> Result<()> {
        if let Err(e) = self.client.back().await {
            let url = self.current_url().await;
            return Err(navigation_error(e, "going back from", &url));
        }
        Ok(())
    }

    async fn current_markup(&mut self) -> Result<String> {
        match self.client.source().await {
            Ok(source) => Ok(source),
            Err(e) => {
                let url = self.current_url().await;
                Err(navigation_error(e, "getting source for", &url))
            }
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> bool {
        let found = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .is_ok();

        if !found {
            ::log::debug!(
                "Element {} did not appear within {:.1}s, continuing",
                selector,
                timeout.as_secs_f64()
            );
        }
        found
    }

    async fn locate_all(&mut self, selector: &str) -> Result<Vec<ElementHandle>> {
        match self.client.find_all(Locator::Css(selector)).await {
            Ok(elements) => Ok((0..elements.len())
                .map(|index| ElementHandle {
                    selector: selector.to_string(),
                    index,
                })
                .collect()),
            Err(e) => {
                let url = self.current_url().await;
                Err(navigation_error(e, "locating elements on", &url))
            }
        }
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<()> {
        let url = self.current_url().await;
        let elements = self
            .client
            .find_all(Locator::Css(&element.selector))
            .await
            .map_err(|e| navigation_error(e, "locating elements on", &url))?;

        let target = elements.get(element.index).ok_or_else(|| {
            ScrapeError::navigation(
                &url,
                format!("element {}[{}] is gone", element.selector, element.index),
            )
        })?;

        target
            .click()
            .await
            .map_err(|e| navigation_error(e, "clicking on", &url))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.client.clone().close().await.map_err(|e| {
            ::log::warn!("Failed to close WebDriver session: {}", e);
            ScrapeError::Connect(format!("closing session: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let capabilities = browser_capabilities(true);
        let args = &capabilities["goog:chromeOptions"]["args"];
        assert!(args.as_array().unwrap().iter().any(|a| a == "--headless"));
        assert!(capabilities.contains_key("moz:firefoxOptions"));
    }

    #[test]
    fn test_windowed_capabilities() {
        assert!(browser_capabilities(false).is_empty());
    }
}
