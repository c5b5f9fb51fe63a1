//! Main catalog scraper API
//!
//! This module provides the high-level API for scraping a course catalog.
//! It combines the HTTP client with the parsers: collect course links from
//! the listing page, then fetch and parse every course page.

use futures::stream::{self, StreamExt};
use url::Url;

use crate::client::{CatalogClient, ClientConfig};
use crate::error::{CatalogError, Result};
use crate::parser::{parse_course_links, parse_course_page, CourseLinkFilter, LinkFilter};
use crate::types::{Course, CourseLink};

/// Site root used to resolve relative links
pub const DEFAULT_BASE_URL: &str = "https://www.unimi.it";

/// Listing of bachelor and single-cycle master degree courses
pub const DEFAULT_LISTING_URL: &str =
    "https://www.unimi.it/it/corsi/corsi-di-laurea-triennali-e-magistrali-ciclo-unico";

/// What to scrape and how much of it
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Base URL for resolving relative course and exam links
    pub base_url: String,
    /// Page listing all degree courses
    pub listing_url: String,
    /// Only scrape the first N courses of the listing
    pub max_courses: Option<usize>,
    /// Number of course pages processed at once (default: 1)
    pub concurrency: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            max_courses: None,
            concurrency: 1,
        }
    }
}

/// Main scraper API for course catalogs
///
/// # Example
/// ```no_run
/// use curriculum_core::CatalogScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = CatalogScraper::new()?;
///
///     let courses = scraper.scrape_all().await;
///     println!("Scraped {} courses", courses.len());
///
///     Ok(())
/// }
/// ```
pub struct CatalogScraper {
    client: CatalogClient,
    base_url: Url,
    listing_url: Url,
    max_courses: Option<usize>,
    concurrency: usize,
    filter: Box<dyn LinkFilter>,
}

impl CatalogScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), ScrapeConfig::default())
    }

    /// Create a new scraper with custom client and scrape configuration.
    ///
    /// # Errors
    /// - `CatalogError::Http` if the HTTP client cannot be created
    /// - `CatalogError::InvalidUrl` if a configured URL does not parse
    pub fn with_config(client_config: ClientConfig, config: ScrapeConfig) -> Result<Self> {
        let client = CatalogClient::with_config(client_config)?;
        Self::with_client(client, config)
    }

    /// Create a new scraper with a pre-built client.
    ///
    /// This is useful for testing or when you need custom client configuration.
    ///
    /// # Errors
    /// `CatalogError::InvalidUrl` if a configured URL does not parse.
    pub fn with_client(client: CatalogClient, config: ScrapeConfig) -> Result<Self> {
        let base_url = parse_url(&config.base_url)?;
        let listing_url = parse_url(&config.listing_url)?;

        Ok(Self {
            client,
            base_url,
            listing_url,
            max_courses: config.max_courses,
            concurrency: config.concurrency.max(1),
            filter: Box::new(CourseLinkFilter::default()),
        })
    }

    /// Replace the rule deciding which listing anchors are course links.
    ///
    /// # Example
    /// ```
    /// use curriculum_core::CatalogScraper;
    ///
    /// let scraper = CatalogScraper::new()
    ///     .unwrap()
    ///     .with_filter(|href: &str, _title: &str| href.contains("/magistrale/"));
    /// ```
    pub fn with_filter(mut self, filter: impl LinkFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Collect course links from the listing page.
    ///
    /// A failed listing fetch is logged and yields an empty list.
    pub async fn collect_links(&self) -> Vec<CourseLink> {
        log::info!("Fetching course links from {}", self.listing_url);

        let html = match self.client.fetch(self.listing_url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("Error fetching {}: {}", self.listing_url, e);
                return Vec::new();
            }
        };

        let links = parse_course_links(&html, &self.base_url, self.filter.as_ref());
        log::info!("Found {} unique courses", links.len());
        links
    }

    /// Fetch and parse a single course page.
    ///
    /// # Errors
    /// Any fetch failure for the course page.
    pub async fn scrape_course(&self, link: &CourseLink) -> Result<Course> {
        let html = self.client.fetch(&link.url).await?;
        let structure = parse_course_page(&html, &self.base_url);
        Ok(Course::from_parts(link, structure))
    }

    /// Scrape every course of the listing.
    ///
    /// Courses whose page cannot be fetched are logged and left out. The
    /// result is in listing order whatever the configured concurrency.
    pub async fn scrape_all(&self) -> Vec<Course> {
        log::info!("Starting course catalog scraping...");

        let mut links = self.collect_links().await;
        if let Some(max) = self.max_courses {
            links.truncate(max);
        }

        let courses = self.scrape_links(&links).await;
        log::info!(
            "Scraping completed. Total courses scraped: {}",
            courses.len()
        );
        courses
    }

    /// Scrape the given course links, keeping their order.
    pub async fn scrape_links(&self, links: &[CourseLink]) -> Vec<Course> {
        let total = links.len();

        let results: Vec<Option<Course>> = stream::iter(links.iter().enumerate())
            .map(|(i, link)| async move {
                log::info!("Processing course {}/{}: {}", i + 1, total, link.title);
                match self.scrape_course(link).await {
                    Ok(course) => Some(course),
                    Err(e) => {
                        log::error!("Skipping course {}: {}", link.url, e);
                        None
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        results.into_iter().flatten().collect()
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))
}
