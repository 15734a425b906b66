use crate::error::Result;
use crate::parsers::FactTable;

/// Bootstrap classes added to the rendered facts table
pub const TABLE_CLASSES: &str = "table table-striped";

/// Facts table rendered as HTML, or `None` on any fetch or parse fault.
///
/// Fetched directly over HTTP; the browser session is not involved.
pub async fn extract_facts(client: &reqwest::Client, url: &str) -> Option<String> {
    ::log::info!("Scraping facts from {}", url);

    match fetch_fact_table(client, url).await {
        Ok(table) => {
            ::log::debug!("Facts table has {} rows", table.rows.len());
            Some(table.to_html(TABLE_CLASSES))
        }
        Err(e) => {
            ::log::warn!("Facts table unavailable from {}: {}", url, e);
            None
        }
    }
}

/// Fetch a page and parse its first table
pub async fn fetch_fact_table(client: &reqwest::Client, url: &str) -> Result<FactTable> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    FactTable::from_html(&body)
}
