//! Curriculum scraper CLI
//!
//! Scrapes the degree course catalog, writes it to a JSON file and prints a
//! short summary of the run.

use std::path::PathBuf;

use clap::Parser;
use curriculum_core::output::DEFAULT_OUTPUT_FILE;
use curriculum_core::scraper::{DEFAULT_BASE_URL, DEFAULT_LISTING_URL};
use curriculum_core::{write_catalog, CatalogScraper, ClientConfig, ScrapeConfig, SummaryStats};

/// Scrape university degree course plans into JSON
#[derive(Parser, Debug)]
#[command(name = "curriculum-scraper", version, about)]
struct Cli {
    /// Page listing all degree courses
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    listing_url: String,

    /// Site root used to resolve relative links
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Only scrape the first N courses
    #[arg(long)]
    max_courses: Option<usize>,

    /// Delay between requests in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Number of course pages fetched at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_delay_ms: self.delay_ms,
            timeout_secs: self.timeout_secs,
            ..ClientConfig::default()
        }
    }

    fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            base_url: self.base_url.clone(),
            listing_url: self.listing_url.clone(),
            max_courses: self.max_courses,
            concurrency: self.concurrency,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let scraper = CatalogScraper::with_config(cli.client_config(), cli.scrape_config())?;
    let courses = scraper.scrape_all().await;

    write_catalog(&cli.output, &courses)?;

    println!("\nScraping Summary:");
    if courses.is_empty() {
        println!("No data available");
        return Ok(());
    }
    println!("{}", SummaryStats::from_courses(&courses));

    if let Some(first) = courses.first() {
        println!("\nExample course structure:");
        println!("{}", serde_json::to_string_pretty(first)?);
    }

    Ok(())
}
