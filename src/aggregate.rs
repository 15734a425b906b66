use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::extractors::{
    HemisphereExtractor, HemisphereOptions, extract_facts, extract_featured_image, extract_news,
};
use crate::filter::LinkFilter;
use crate::results::AggregateResult;
use crate::session::{Session, WebDriverSession};
use chrono::Local;
use std::time::Duration;

/// Run every extractor against a fresh WebDriver session.
///
/// The session is closed before returning, whether or not the run succeeded.
pub async fn scrape_all(config: &ScrapeConfig) -> Result<AggregateResult> {
    let mut session = WebDriverSession::connect(&config.webdriver_url, config.headless).await?;
    run_and_close(&mut session, config).await
}

/// Run every extractor on `session`, then close it on every exit path
pub async fn run_and_close<S>(session: &mut S, config: &ScrapeConfig) -> Result<AggregateResult>
where
    S: Session + ?Sized,
{
    let outcome = scrape_with_session(session, config).await;

    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    if let Err(e) = &outcome {
        ::log::error!("Scrape aborted: {}", e);
    }
    outcome
}

/// News, featured image, facts and hemispheres, in that order
pub async fn scrape_with_session<S>(
    session: &mut S,
    config: &ScrapeConfig,
) -> Result<AggregateResult>
where
    S: Session + ?Sized,
{
    let filter =
        LinkFilter::new(&config.link_filter).map_err(|e| ScrapeError::Config(e.to_string()))?;
    let hemispheres = HemisphereExtractor::new(
        filter,
        HemisphereOptions::new(&config.hemisphere_image_base_url),
    );
    let wait = Duration::from_secs(config.render_wait_secs);
    let start_time = std::time::Instant::now();

    let news = extract_news(session, &config.news_url, wait).await;

    let featured_image = extract_featured_image(
        session,
        &config.featured_image_url,
        &config.featured_image_base_url,
        wait,
    )
    .await;

    let facts = match http_client(config) {
        Ok(client) => extract_facts(&client, &config.facts_url).await,
        Err(e) => {
            ::log::warn!("Skipping facts table: {}", e);
            None
        }
    };

    let data = hemispheres
        .extract_all(session, &config.hemispheres_url)
        .await?;

    ::log::info!(
        "Scrape complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    let (news_title, news_paragraph) = match news {
        Some(headline) => (Some(headline.title), Some(headline.paragraph)),
        None => (None, None),
    };

    Ok(AggregateResult {
        news_title,
        news_paragraph,
        featured_image,
        facts,
        data,
        last_modified: Local::now(),
    })
}

fn http_client(config: &ScrapeConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!("mars-scrape/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockSession;

    fn local_config() -> ScrapeConfig {
        ScrapeConfig {
            news_url: "http://mock/news".to_string(),
            featured_image_url: "http://mock/gallery".to_string(),
            featured_image_base_url: "http://mock/".to_string(),
            facts_url: "http://127.0.0.1:9/facts".to_string(),
            hemispheres_url: "http://mock/hemispheres/".to_string(),
            hemisphere_image_base_url: "http://mock/hemispheres/".to_string(),
            render_wait_secs: 0,
            request_timeout_secs: 2,
            ..ScrapeConfig::default()
        }
    }

    fn mock_site() -> MockSession {
        MockSession::new()
            .with_page(
                "http://mock/news",
                r#"<div class="list_text">
                     <div class="content_title">Headline</div>
                     <div class="article_teaser_body">Teaser</div>
                   </div>"#,
            )
            .with_page(
                "http://mock/hemispheres/",
                r##"<a class="itemLink product-item" href="cerberus.html">Cerberus</a>
                   <a class="itemLink product-item" href="#">Back to top</a>"##,
            )
            .with_page(
                "http://mock/hemispheres/cerberus.html",
                r#"<h2>Cerberus Hemisphere</h2><img class="wide-image" src="images/cerberus.jpg">"#,
            )
    }

    #[tokio::test]
    async fn test_partial_results_are_independently_absent() {
        let mut session = mock_site();

        let result = run_and_close(&mut session, &local_config()).await.unwrap();

        assert_eq!(result.news_title.as_deref(), Some("Headline"));
        assert_eq!(result.news_paragraph.as_deref(), Some("Teaser"));
        // The gallery page is unknown to the mock and the facts host is unreachable
        assert!(result.featured_image.is_none());
        assert!(result.facts.is_none());
        assert_eq!(result.data.len(), 1);
        assert_eq!(
            result.data.as_slice()[0].image_url,
            "http://mock/hemispheres/images/cerberus.jpg"
        );
        assert_eq!(session.close_calls, 1);
    }

    #[tokio::test]
    async fn test_extractor_order() {
        let mut session = mock_site();

        run_and_close(&mut session, &local_config()).await.unwrap();

        assert_eq!(
            session.visits,
            vec![
                "http://mock/news".to_string(),
                "http://mock/gallery".to_string(),
                "http://mock/hemispheres/".to_string(),
                "http://mock/hemispheres/cerberus.html".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_session_closed_after_fatal_fault() {
        let mut session = mock_site().with_failing_visit("http://mock/hemispheres/");

        let result = run_and_close(&mut session, &local_config()).await;

        assert!(matches!(result, Err(ScrapeError::Navigation { .. })));
        assert_eq!(session.close_calls, 1);
    }

    #[tokio::test]
    async fn test_invalid_filter_pattern_rejected() {
        let mut config = local_config();
        config.link_filter.exclude_patterns = vec!["(".to_string()];
        let mut session = mock_site();

        let result = run_and_close(&mut session, &config).await;

        assert!(matches!(result, Err(ScrapeError::Config(_))));
        assert!(session.visits.is_empty());
        assert_eq!(session.close_calls, 1);
    }
}
