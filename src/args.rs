use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mars-scrape")]
#[command(about = "Scrapes Mars news, images, facts and hemisphere imagery into one JSON record")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (overrides config and WEBDRIVER_URL)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub show_browser: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
