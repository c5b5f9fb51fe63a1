//! Small text helpers shared by the page parsers.

use std::sync::OnceLock;

use regex_lite::Regex;
use scraper::ElementRef;
use url::Url;

fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Trimmed concatenation of all text nodes below an element.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First run of ASCII digits in `text`, parsed as `u32`.
///
/// Returns `None` when there are no digits or the run does not fit.
///
/// # Examples
/// ```
/// use curriculum_core::parser::first_number;
///
/// assert_eq!(first_number("9 CFU"), Some(9));
/// assert_eq!(first_number("ore: 72 (lezioni)"), Some(72));
/// assert_eq!(first_number("n.d."), None);
/// ```
pub fn first_number(text: &str) -> Option<u32> {
    digit_run().find(text)?.as_str().parse().ok()
}

/// Resolve a potentially relative URL against a base URL
///
/// An empty `href` resolves to the base itself. A bare origin is returned
/// without the root slash `Url` adds, so `https://www.unimi.it` stays as is.
pub fn resolve_url(base: &Url, href: &str) -> String {
    if href.trim().is_empty() {
        let base_str = base.as_str();
        return if base.path() == "/" && base.query().is_none() && base.fragment().is_none() {
            base_str.trim_end_matches('/').to_string()
        } else {
            base_str.to_string()
        };
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}
