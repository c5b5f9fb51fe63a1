//! Course listing parser
//!
//! Extracts links to course detail pages from the degree course listing page.
//! Which anchors count as course links is decided by a [`LinkFilter`].

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::types::CourseLink;

use super::text::{element_text, resolve_url};

/// Decides whether an anchor on the listing page points to a course.
///
/// Implemented for any `Fn(&str, &str) -> bool` taking the raw `href`
/// and the trimmed anchor text, so ad-hoc rules can be passed as closures.
pub trait LinkFilter: Send + Sync {
    /// Return true to keep the anchor
    fn accept(&self, href: &str, title: &str) -> bool;
}

impl<F> LinkFilter for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn accept(&self, href: &str, title: &str) -> bool {
        self(href, title)
    }
}

/// Default course link rule.
///
/// The href must contain `path_marker` and, case-insensitively, `keyword`.
/// The anchor text must be longer than `min_title_chars` characters, which
/// filters out navigation links such as "Corsi" or "Home".
#[derive(Debug, Clone)]
pub struct CourseLinkFilter {
    pub path_marker: String,
    pub keyword: String,
    pub min_title_chars: usize,
}

impl Default for CourseLinkFilter {
    fn default() -> Self {
        Self {
            path_marker: "/it/corsi/".to_string(),
            keyword: "laurea".to_string(),
            min_title_chars: 5,
        }
    }
}

impl LinkFilter for CourseLinkFilter {
    fn accept(&self, href: &str, title: &str) -> bool {
        href.contains(&self.path_marker)
            && href.to_lowercase().contains(&self.keyword.to_lowercase())
            && title.chars().count() > self.min_title_chars
    }
}

/// Parse course links from the listing page HTML.
///
/// Links are resolved against `base` and deduplicated by absolute URL.
/// The first occurrence wins, both for position and title.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
/// * `base` - Site base URL used to resolve relative hrefs
/// * `filter` - Rule deciding which anchors are course links
pub fn parse_course_links(html: &str, base: &Url, filter: &dyn LinkFilter) -> Vec<CourseLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let title = element_text(&anchor);
        if !filter.accept(href, &title) {
            continue;
        }

        let url = resolve_url(base, href);
        if seen.insert(url.clone()) {
            links.push(CourseLink { title, url });
        }
    }

    links
}
