use crate::error::{ExtractionError, Result};
use crate::parsers::Document;
use crate::session::Session;
use crate::utils::join_url;
use std::time::Duration;

/// Position of the "full image" button among the page's buttons
const FULL_IMAGE_BUTTON: usize = 1;

const FULL_IMAGE_SELECTOR: &str = "img.fancybox-image";

/// Absolute URL of the featured full-size image, or `None` if it could not be found
pub async fn extract_featured_image<S>(
    session: &mut S,
    url: &str,
    base_url: &str,
    wait: Duration,
) -> Option<String>
where
    S: Session + ?Sized,
{
    ::log::info!("Scraping featured image from {}", url);

    match open_full_image(session, url, wait).await {
        Ok(markup) => match parse_featured_image(&markup, base_url) {
            Ok(image_url) => Some(image_url),
            Err(e) => {
                ::log::warn!("No featured image on {}: {}", url, e);
                None
            }
        },
        Err(e) => {
            ::log::warn!("Featured image page unavailable: {}", e);
            None
        }
    }
}

/// Click through to the full image viewer and return its markup
async fn open_full_image<S>(session: &mut S, url: &str, wait: Duration) -> Result<String>
where
    S: Session + ?Sized,
{
    session.visit(url).await?;

    let buttons = session.locate_all("button").await?;
    let button = buttons
        .get(FULL_IMAGE_BUTTON)
        .ok_or_else(|| ExtractionError::MissingElement("full image button".to_string()))?;
    session.click(button).await?;

    session.wait_for_selector(FULL_IMAGE_SELECTOR, wait).await;
    session.current_markup().await
}

/// Resolve the viewer's image source against `base_url`
pub fn parse_featured_image(markup: &str, base_url: &str) -> Result<String> {
    let doc = Document::parse(markup);
    let src = doc
        .find_one("img", Some("fancybox-image"))?
        .and_then(|image| image.attribute("src"))
        .ok_or_else(|| ExtractionError::MissingElement(FULL_IMAGE_SELECTOR.to_string()))?;

    Ok(join_url(base_url, src))
}
