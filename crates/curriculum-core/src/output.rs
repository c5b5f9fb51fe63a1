//! Catalog output and run statistics
//!
//! The catalog is stored as a single pretty-printed JSON array of courses.
//! Non-ASCII characters (course titles are Italian) are written unescaped.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Course;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "unimi_courses.json";

/// Serialize the catalog as an indented JSON array.
pub fn catalog_to_json(courses: &[Course]) -> Result<String> {
    Ok(serde_json::to_string_pretty(courses)?)
}

/// Write the catalog to `path`, replacing any existing file.
///
/// # Errors
/// `CatalogError::Io` if the file cannot be written.
pub fn write_catalog(path: impl AsRef<Path>, courses: &[Course]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, catalog_to_json(courses)?)?;
    log::info!("Data saved to {}", path.display());
    Ok(())
}

/// Read a catalog previously written by [`write_catalog`].
///
/// # Errors
/// `CatalogError::Io` if the file cannot be read, `CatalogError::Json`
/// if it is not a catalog.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<Course>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Summary of a scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of courses scraped
    pub total_courses: usize,
    /// Obligatory plus optional exams over all courses
    pub total_exams: u64,
    /// Sum of declared credits divided by the number of courses.
    /// Courses without declared credits count in the denominator only.
    pub average_cfu_per_course: f64,
    /// Courses with at least one parsed year
    pub courses_with_structure: usize,
}

impl SummaryStats {
    /// Compute statistics over a catalog
    pub fn from_courses(courses: &[Course]) -> Self {
        let total_courses = courses.len();
        let total_exams: u64 = courses.iter().map(|c| u64::from(c.total_exams())).sum();
        let declared_cfu: u64 = courses
            .iter()
            .filter_map(|c| c.total_cfu)
            .map(u64::from)
            .sum();

        let average_cfu_per_course = if total_courses > 0 {
            declared_cfu as f64 / total_courses as f64
        } else {
            0.0
        };

        Self {
            total_courses,
            total_exams,
            average_cfu_per_course,
            courses_with_structure: courses.iter().filter(|c| !c.years.is_empty()).count(),
        }
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total courses: {}", self.total_courses)?;
        writeln!(f, "Total exams: {}", self.total_exams)?;
        writeln!(
            f,
            "Average CFU per course: {:.1}",
            self.average_cfu_per_course
        )?;
        write!(
            f,
            "Courses with detailed structure: {}",
            self.courses_with_structure
        )
    }
}
