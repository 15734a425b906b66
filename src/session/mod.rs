//! Browser session seam.
//!
//! Extractors drive a [`Session`] through an exclusive `&mut` borrow, so only
//! one navigation can be in flight at a time. [`WebDriverSession`] is the
//! real implementation; tests script an in-memory session instead.

pub mod webdriver;

#[cfg(test)]
pub mod mock;

pub use webdriver::WebDriverSession;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Reference to an interactive element found by [`Session::locate_all`].
///
/// Handles are positional: they stay valid only while the page they were
/// located on is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub selector: String,
    pub index: usize,
}

/// A single navigable browsing session
#[async_trait]
pub trait Session: Send {
    /// Navigate to `url` and wait for the load to finish
    async fn visit(&mut self, url: &str) -> Result<()>;

    /// Navigate one step back in history
    async fn back(&mut self) -> Result<()>;

    /// Rendered markup of the current page
    async fn current_markup(&mut self) -> Result<String>;

    /// Best-effort wait for `selector` to match; `false` if the timeout elapsed.
    /// Callers proceed either way.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> bool;

    /// Every element on the current page matching a CSS selector
    async fn locate_all(&mut self, selector: &str) -> Result<Vec<ElementHandle>>;

    async fn click(&mut self, element: &ElementHandle) -> Result<()>;

    /// End the session. Further calls after the first are no-ops.
    async fn close(&mut self) -> Result<()>;
}
