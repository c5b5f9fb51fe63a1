//! HTML parsers for catalog pages
//!
//! This module contains parsers for extracting data from catalog HTML pages:
//! - `listing`: Collect course links from the listing page
//! - `course`: Parse the year/semester plan of a course page
//! - `exams`: Parse exam tables and rows

pub mod course;
pub mod exams;
pub mod listing;
mod text;

// Re-export main parsing functions
pub use course::{extract_total_cfu, extract_year_number, parse_course_page};
pub use exams::{classify_section, parse_exam_row, parse_exam_table, EXAM_ROW_CELLS};
pub use listing::{parse_course_links, CourseLinkFilter, LinkFilter};
pub use text::{first_number, resolve_url};
