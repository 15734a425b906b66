use crate::results::DetailLinkRef;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder link target that must never be navigated
pub const SENTINEL_HREF: &str = "#";

/// Configuration for filtering candidate detail links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkFilterConfig {
    /// Regex patterns for hrefs to skip, in addition to the sentinel
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Decides which discovered links are worth visiting
#[derive(Debug, Default)]
pub struct LinkFilter {
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: &LinkFilterConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self { exclude_regexes })
    }

    /// Determine if a link should be visited
    pub fn should_visit(&self, href: &str) -> bool {
        if href == SENTINEL_HREF {
            return false;
        }

        !self.exclude_regexes.iter().any(|regex| regex.is_match(href))
    }

    /// Produce the visitable subset of `candidates`, preserving order.
    ///
    /// The input is left untouched.
    pub fn filter(&self, candidates: &[DetailLinkRef]) -> Vec<DetailLinkRef> {
        candidates
            .iter()
            .filter(|link| {
                let keep = self.should_visit(&link.href);
                if !keep {
                    ::log::debug!("Link filter rejected: {}", link.href);
                }
                keep
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(hrefs: &[&str]) -> Vec<DetailLinkRef> {
        hrefs.iter().map(|h| DetailLinkRef::new(*h)).collect()
    }

    #[test]
    fn test_sentinel_removed() {
        let filter = LinkFilter::default();
        let candidates = links(&["/page1", "#", "/page2"]);
        assert_eq!(filter.filter(&candidates), links(&["/page1", "/page2"]));
    }

    #[test]
    fn test_adjacent_sentinels_all_removed() {
        // Removing in place while iterating would skip the second "#"
        let filter = LinkFilter::default();
        let candidates = links(&["#", "#", "a.html", "#", "#", "b.html", "#"]);
        let kept = filter.filter(&candidates);
        assert_eq!(kept, links(&["a.html", "b.html"]));
        assert_eq!(candidates.len(), 7);
    }

    #[test]
    fn test_only_exact_sentinel_removed() {
        let filter = LinkFilter::default();
        let candidates = links(&["#top", "page.html#section"]);
        assert_eq!(filter.filter(&candidates), candidates);
    }

    #[test]
    fn test_exclude_patterns() {
        let config = LinkFilterConfig {
            exclude_patterns: vec![r"^javascript:".to_string(), r"\.pdf$".to_string()],
        };
        let filter = LinkFilter::new(&config).unwrap();
        assert!(!filter.should_visit("javascript:void(0)"));
        assert!(!filter.should_visit("report.pdf"));
        assert!(!filter.should_visit("#"));
        assert!(filter.should_visit("cerberus.html"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = LinkFilterConfig {
            exclude_patterns: vec!["(".to_string()],
        };
        assert!(LinkFilter::new(&config).is_err());
    }
}
