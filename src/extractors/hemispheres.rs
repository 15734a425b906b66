//! Hemisphere image harvesting.
//!
//! Visits the listing page, follows every detail link in turn and collects
//! one [`HemisphereRecord`] per detail page. Failures on a single detail page
//! skip that page only; a driver-level navigation fault ends the run.

use crate::error::{ExtractionError, Result};
use crate::filter::LinkFilter;
use crate::parsers::Document;
use crate::results::{DetailLinkRef, HemisphereRecord, ResultCollection};
use crate::session::Session;
use crate::utils::join_url;

/// Where to find links and fields on the listing and detail pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HemisphereOptions {
    /// Tag of detail links on the listing page
    pub link_tag: String,

    /// Space separated marker classes every detail link carries
    pub link_classes: String,

    /// CSS selector of the full-resolution image on a detail page
    pub image_selector: String,

    /// Tag of the heading holding the record title
    pub title_tag: String,

    /// Base joined with the relative image path
    pub image_base_url: String,
}

impl HemisphereOptions {
    pub fn new(image_base_url: &str) -> Self {
        Self {
            image_base_url: image_base_url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for HemisphereOptions {
    fn default() -> Self {
        Self {
            link_tag: "a".to_string(),
            link_classes: "itemLink product-item".to_string(),
            image_selector: "img.wide-image[src]".to_string(),
            title_tag: "h2".to_string(),
            image_base_url: "https://marshemispheres.com/".to_string(),
        }
    }
}

/// Fan-out extractor over a listing page and its detail pages
#[derive(Debug, Default)]
pub struct HemisphereExtractor {
    filter: LinkFilter,
    options: HemisphereOptions,
}

impl HemisphereExtractor {
    pub fn new(filter: LinkFilter, options: HemisphereOptions) -> Self {
        Self { filter, options }
    }

    pub fn options(&self) -> &HemisphereOptions {
        &self.options
    }

    /// Collect one record per detail page linked from `listing_url`.
    ///
    /// The session is left on the listing page. Only navigation faults are
    /// returned as errors.
    pub async fn extract_all<S>(
        &self,
        session: &mut S,
        listing_url: &str,
    ) -> Result<ResultCollection>
    where
        S: Session + ?Sized,
    {
        ::log::info!("Scraping hemispheres from {}", listing_url);

        session.visit(listing_url).await?;
        let markup = session.current_markup().await?;

        let candidates = match discover_links(&markup, &self.options) {
            Ok(candidates) => candidates,
            Err(e) => {
                ::log::warn!("No hemisphere links on {}: {}", listing_url, e);
                return Ok(ResultCollection::new());
            }
        };
        let links = self.filter.filter(&candidates);
        ::log::info!(
            "Found {} hemisphere links in {} ({} after filtering)",
            candidates.len(),
            listing_url,
            links.len()
        );

        let mut collection = ResultCollection::new();
        for link in &links {
            let target = join_url(listing_url, &link.href);
            session.visit(&target).await?;
            let markup = session.current_markup().await?;

            match extract_record(&markup, &self.options) {
                Ok(record) => {
                    ::log::debug!("Extracted {} from {}", record.title, target);
                    if !collection.push_unless_duplicate(record) {
                        ::log::debug!("Duplicate entry from {}, skipping", target);
                    }
                }
                Err(e) => {
                    ::log::warn!("Skipping {}: {}", target, e);
                }
            }

            session.back().await?;
        }

        ::log::info!("Collected {} hemisphere records", collection.len());
        Ok(collection)
    }
}

/// Collect one record per detail page linked from `listing_url` with default options
pub async fn extract_all<S>(session: &mut S, listing_url: &str) -> Result<ResultCollection>
where
    S: Session + ?Sized,
{
    HemisphereExtractor::default()
        .extract_all(session, listing_url)
        .await
}

/// Detail links on a listing page, in document order, before filtering
pub fn discover_links(markup: &str, options: &HemisphereOptions) -> Result<Vec<DetailLinkRef>> {
    let doc = Document::parse(markup);
    let links = doc
        .find_all(
            &options.link_tag,
            &[options.link_classes.as_str()],
            Some("href"),
        )?
        .iter()
        .filter_map(|element| element.attribute("href"))
        .filter(|href| !href.trim().is_empty())
        .map(DetailLinkRef::new)
        .collect();

    Ok(links)
}

/// Build the record for one detail page
pub fn extract_record(markup: &str, options: &HemisphereOptions) -> Result<HemisphereRecord> {
    let doc = Document::parse(markup);

    let src = doc
        .select_one(&options.image_selector)?
        .and_then(|image| image.attribute("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .ok_or(ExtractionError::MissingImage)?;

    let title = doc
        .find_one(&options.title_tag, None)?
        .map(|heading| heading.text().trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or(ExtractionError::MissingTitle)?;

    Ok(HemisphereRecord::new(
        title,
        join_url(&options.image_base_url, src),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    #[test]
    fn test_discover_links_requires_marker_and_href() {
        let markup = r##"
            <a class="itemLink product-item" href="cerberus.html"><h3>Cerberus</h3></a>
            <a class="product-item" href="schiaparelli.html">wrong marker</a>
            <a class="itemLink product-item" href="">empty</a>
            <a class="itemLink product-item">no href</a>
            <a class="itemLink product-item" href="#">sentinel</a>
        "##;
        let links = discover_links(markup, &HemisphereOptions::default()).unwrap();
        assert_eq!(
            links,
            vec![DetailLinkRef::new("cerberus.html"), DetailLinkRef::new("#")]
        );
    }

    #[test]
    fn test_extract_record_trims() {
        let markup = r#"
            <h2 class="title">  Cerberus Hemisphere Enhanced
            </h2>
            <img class="wide-image" src=" images/full.jpg ">
        "#;
        let record = extract_record(markup, &HemisphereOptions::default()).unwrap();
        assert_eq!(record.title, "Cerberus Hemisphere Enhanced");
        assert_eq!(record.image_url, "https://marshemispheres.com/images/full.jpg");
    }

    #[test]
    fn test_extract_record_missing_image() {
        let markup = "<h2>Cerberus Hemisphere</h2><img class=\"thumb\" src=\"t.png\">";
        assert!(matches!(
            extract_record(markup, &HemisphereOptions::default()),
            Err(ScrapeError::Extraction(ExtractionError::MissingImage))
        ));
    }

    #[test]
    fn test_extract_record_missing_title() {
        let markup = "<h3>Not a heading we use</h3><img class=\"wide-image\" src=\"a.jpg\">";
        assert!(matches!(
            extract_record(markup, &HemisphereOptions::default()),
            Err(ScrapeError::Extraction(ExtractionError::MissingTitle))
        ));
    }
}
