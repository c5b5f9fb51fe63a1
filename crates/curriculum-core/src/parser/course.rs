//! Course page parser
//!
//! Parses the course plan of a degree course page. Each academic year is a
//! `div.tab-pane` whose id ends in a zero-based year index. Inside a pane,
//! semester headers (`div.titoletto`) and exam tables are siblings, so the
//! pane is scanned in document order with the most recently opened semester
//! receiving each table.

use std::sync::OnceLock;

use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::{AcademicYear, CourseStructure, ExamTotals, Semester, SemesterKind};

use super::exams::parse_exam_table;
use super::text::element_text;

fn total_cfu_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // \s in regex-lite is ASCII only; pages often use &nbsp; before "Crediti"
    RE.get_or_init(|| Regex::new("(\\d+)[\\s\u{a0}]+Crediti").unwrap())
}

fn year_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"year-af-.*-(\d+)").unwrap())
}

/// Parse a course page into its plan structure.
///
/// # Arguments
/// * `html` - Raw HTML content of the course page
/// * `base` - Base URL for exam links
///
/// # Returns
/// The declared credits, the accumulated exam totals and the years found.
/// A page without year panes yields an empty year list.
pub fn parse_course_page(html: &str, base: &Url) -> CourseStructure {
    let document = Html::parse_document(html);

    let total_cfu = extract_total_cfu(&document);
    let mut totals = ExamTotals::default();
    let mut years = Vec::new();

    if let Ok(selector) = Selector::parse("div.tab-pane") {
        for pane in document.select(&selector) {
            let Some(year) = pane.value().id().and_then(extract_year_number) else {
                continue;
            };

            let semesters = parse_year_pane(&pane, base, &mut totals);
            if semesters.is_empty() {
                log::debug!("Year {} has no semester headers, skipping", year);
                continue;
            }

            years.push(AcademicYear { year, semesters });
        }
    }

    CourseStructure {
        total_cfu,
        totals,
        years,
    }
}

/// Extract the declared total credits from the whole page text.
///
/// Matches the first number directly followed by whitespace and "Crediti".
pub fn extract_total_cfu(document: &Html) -> Option<u32> {
    let text = document.root_element().text().collect::<String>();
    let caps = total_cfu_pattern().captures(&text)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Derive the 1-based year number from a pane id such as `year-af-1234-0`.
///
/// # Examples
/// ```
/// use curriculum_core::parser::extract_year_number;
///
/// assert_eq!(extract_year_number("year-af-2024-0"), Some(1));
/// assert_eq!(extract_year_number("year-af-abc-2"), Some(3));
/// assert_eq!(extract_year_number("description"), None);
/// ```
pub fn extract_year_number(id: &str) -> Option<u32> {
    let caps = year_id_pattern().captures(id)?;
    let index: u32 = caps.get(1)?.as_str().parse().ok()?;
    index.checked_add(1)
}

/// Scan one year pane and return its semesters in page order.
fn parse_year_pane(pane: &ElementRef, base: &Url, totals: &mut ExamTotals) -> Vec<Semester> {
    let mut semesters: Vec<Semester> = Vec::new();

    let Ok(selector) = Selector::parse("div.titoletto, table") else {
        return semesters;
    };

    for element in pane.select(&selector) {
        if element.value().name() == "table" {
            match semesters.last_mut() {
                Some(open) => parse_exam_table(&element, base, open, totals),
                None => log::debug!("Dropping exam table before any semester header"),
            }
        } else {
            let kind = SemesterKind::from_header(&element_text(&element));
            semesters.push(Semester::new(kind));
        }
    }

    semesters
}
