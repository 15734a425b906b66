use crate::error::{Result, ScrapeError};
use crate::parsers::Document;
use crate::session::{ElementHandle, Session};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Scripted in-memory session for tests.
///
/// Pages are served from a URL → markup map; unknown URLs render an empty
/// page the way a browser shows a 404 body.
#[derive(Debug, Default)]
pub struct MockSession {
    pages: HashMap<String, String>,
    clicks: HashMap<(String, usize), String>,
    failing: HashSet<String>,
    failing_markup: HashSet<String>,
    history: Vec<String>,
    pub visits: Vec<String>,
    pub backs: usize,
    pub close_calls: usize,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// Clicking element `index` of `selector` navigates to `target`
    pub fn with_click(mut self, selector: &str, index: usize, target: &str) -> Self {
        self.clicks
            .insert((selector.to_string(), index), target.to_string());
        self
    }

    /// Visiting `url` fails at the driver level
    pub fn with_failing_visit(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Visiting `url` succeeds but reading its markup fails
    pub fn with_failing_markup(mut self, url: &str) -> Self {
        self.failing_markup.insert(url.to_string());
        self
    }

    pub fn current_url(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    fn current_page(&self) -> &str {
        self.current_url()
            .and_then(|url| self.pages.get(url))
            .map(String::as_str)
            .unwrap_or("<html><body></body></html>")
    }
}

#[async_trait]
impl Session for MockSession {
    async fn visit(&mut self, url: &str) -> Result<()> {
        self.visits.push(url.to_string());
        if self.failing.contains(url) {
            return Err(ScrapeError::navigation(url, "connection refused"));
        }
        self.history.push(url.to_string());
        Ok(())
    }

    async fn back(&mut self) -> Result<()> {
        self.backs += 1;
        if self.history.len() > 1 {
            self.history.pop();
        }
        Ok(())
    }

    async fn current_markup(&mut self) -> Result<String> {
        if let Some(url) = self.current_url() {
            if self.failing_markup.contains(url) {
                return Err(ScrapeError::navigation(url, "no such window"));
            }
        }
        Ok(self.current_page().to_string())
    }

    async fn wait_for_selector(&mut self, selector: &str, _timeout: Duration) -> bool {
        Document::parse(self.current_page())
            .select_one(selector)
            .map(|found| found.is_some())
            .unwrap_or(false)
    }

    async fn locate_all(&mut self, selector: &str) -> Result<Vec<ElementHandle>> {
        let count = Document::parse(self.current_page())
            .select_all(selector)?
            .len();

        Ok((0..count)
            .map(|index| ElementHandle {
                selector: selector.to_string(),
                index,
            })
            .collect())
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<()> {
        let key = (element.selector.clone(), element.index);
        if let Some(target) = self.clicks.get(&key).cloned() {
            self.history.push(target);
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}
