use clap::Parser;
use mars_scrape::Scraper;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut scraper = Scraper::new();
    if let Some(path) = &args.config {
        scraper = match scraper.with_config_file(path) {
            Ok(scraper) => scraper,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        scraper = scraper.with_webdriver_url(webdriver_url);
    }
    if args.show_browser {
        scraper = scraper.with_headless(false);
    }

    ::log::info!("Scraping requires a WebDriver server (e.g., ChromeDriver)");
    ::log::info!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let result = match scraper.run().await {
        Ok(result) => result,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize result: {}", e);
            ExitCode::FAILURE
        }
    }
}
