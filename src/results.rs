use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A link to one detail page, as found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLinkRef {
    /// Raw href attribute value (relative or absolute)
    pub href: String,
}

impl DetailLinkRef {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Title and full-resolution image of one hemisphere detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HemisphereRecord {
    /// Trimmed heading text
    pub title: String,

    /// Absolute URL of the full-resolution image
    pub image_url: String,
}

impl HemisphereRecord {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}

/// Records in visitation order, deduplicated against the last entry on append
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCollection {
    records: Vec<HemisphereRecord>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless it equals the most recently appended one.
    ///
    /// Only the last element is compared, so a repeat separated by a
    /// different record is kept. Returns whether the record was appended.
    pub fn push_unless_duplicate(&mut self, record: HemisphereRecord) -> bool {
        if self.records.last() == Some(&record) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HemisphereRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[HemisphereRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<HemisphereRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a HemisphereRecord;
    type IntoIter = std::slice::Iter<'a, HemisphereRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Headline and teaser of the latest news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
    pub paragraph: String,
}

/// Everything one scrape run produced.
///
/// Each optional field is independently absent when its extractor failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub news_title: Option<String>,
    pub news_paragraph: Option<String>,
    pub featured_image: Option<String>,

    /// Facts table rendered as an HTML fragment
    pub facts: Option<String>,

    /// Hemisphere records
    pub data: ResultCollection,

    /// When the run finished
    pub last_modified: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> HemisphereRecord {
        HemisphereRecord::new(title, format!("https://example.com/{}.jpg", title))
    }

    #[test]
    fn test_adjacent_duplicate_dropped() {
        let mut collection = ResultCollection::new();
        assert!(collection.push_unless_duplicate(record("a")));
        assert!(!collection.push_unless_duplicate(record("a")));
        assert!(collection.push_unless_duplicate(record("b")));
        assert_eq!(collection.as_slice(), &[record("a"), record("b")]);
    }

    #[test]
    fn test_non_adjacent_duplicate_kept() {
        let mut collection = ResultCollection::new();
        collection.push_unless_duplicate(record("a"));
        collection.push_unless_duplicate(record("b"));
        collection.push_unless_duplicate(record("a"));
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_equality_needs_both_fields() {
        let mut collection = ResultCollection::new();
        collection.push_unless_duplicate(HemisphereRecord::new("Cerberus", "https://x/1.jpg"));
        assert!(
            collection.push_unless_duplicate(HemisphereRecord::new("Cerberus", "https://x/2.jpg"))
        );
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_aggregate_serializes_fixed_keys() {
        let mut data = ResultCollection::new();
        data.push_unless_duplicate(HemisphereRecord::new("Cerberus", "https://x/c.jpg"));
        let result = AggregateResult {
            news_title: Some("Title".to_string()),
            news_paragraph: None,
            featured_image: None,
            facts: None,
            data,
            last_modified: Local::now(),
        };

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "newsTitle",
            "newsParagraph",
            "featuredImage",
            "facts",
            "data",
            "lastModified",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
        assert!(object["newsParagraph"].is_null());
        assert_eq!(object["data"][0]["title"], "Cerberus");
        assert_eq!(object["data"][0]["imageUrl"], "https://x/c.jpg");
    }
}
