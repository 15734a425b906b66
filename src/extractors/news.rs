use crate::error::{ExtractionError, Result};
use crate::parsers::Document;
use crate::results::NewsHeadline;
use crate::session::Session;
use std::time::Duration;

/// Container of the newest article on the news page
const SLIDE_SELECTOR: &str = "div.list_text";

/// Latest news headline and teaser, or `None` if the page could not be read
pub async fn extract_news<S>(session: &mut S, url: &str, wait: Duration) -> Option<NewsHeadline>
where
    S: Session + ?Sized,
{
    ::log::info!("Scraping news from {}", url);

    if let Err(e) = session.visit(url).await {
        ::log::warn!("News page unavailable: {}", e);
        return None;
    }

    // Optional delay for the article list to render
    session.wait_for_selector(SLIDE_SELECTOR, wait).await;

    let markup = match session.current_markup().await {
        Ok(markup) => markup,
        Err(e) => {
            ::log::warn!("News page unavailable: {}", e);
            return None;
        }
    };

    match parse_news(&markup) {
        Ok(headline) => Some(headline),
        Err(e) => {
            ::log::warn!("No news headline on {}: {}", url, e);
            None
        }
    }
}

/// Title and teaser of the first article in the list
pub fn parse_news(markup: &str) -> Result<NewsHeadline> {
    let doc = Document::parse(markup);
    let slide = doc
        .select_one(SLIDE_SELECTOR)?
        .ok_or_else(|| ExtractionError::MissingElement(SLIDE_SELECTOR.to_string()))?;

    let title = slide
        .find_one("div", Some("content_title"))?
        .ok_or_else(|| ExtractionError::MissingElement("div.content_title".to_string()))?;
    let paragraph = slide
        .find_one("div", Some("article_teaser_body"))?
        .ok_or_else(|| ExtractionError::MissingElement("div.article_teaser_body".to_string()))?;

    Ok(NewsHeadline {
        title: title.text().trim().to_string(),
        paragraph: paragraph.text().trim().to_string(),
    })
}
