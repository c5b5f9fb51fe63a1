//! Data types for the curriculum scraper
//!
//! This module contains all the core data structures used throughout the library.
//! All types implement Serialize and Deserialize; field names are the JSON keys
//! of the output file.

use serde::{Deserialize, Serialize};

/// Link to a course detail page found on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLink {
    /// Anchor text of the first occurrence of this link
    pub title: String,
    /// Absolute URL of the course page
    pub url: String,
}

/// A single exam (teaching unit) of a course plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Display name of the exam
    pub name: String,
    /// Credit value (CFU)
    pub cfu: u32,
    /// Number of teaching hours
    pub hours: u32,
    /// Teaching language
    pub language: String,
    /// Scientific-disciplinary sector code (e.g. "MAT/05")
    pub ssd: String,
    /// Absolute URL of the exam detail page, if the name was a link
    pub link: Option<String>,
}

/// Term in which a group of exams is held
///
/// Serialized as `1`, `2`, `"annual"` or `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SemesterRepr", into = "SemesterRepr")]
pub enum SemesterKind {
    /// Primo semestre
    First,
    /// Secondo semestre
    Second,
    /// Annuale
    Annual,
    /// Header text that matched no known term
    Unknown,
}

impl SemesterKind {
    /// Classify a semester header by case-insensitive keyword match.
    ///
    /// # Examples
    /// ```
    /// use curriculum_core::SemesterKind;
    ///
    /// assert_eq!(SemesterKind::from_header("PRIMO SEMESTRE"), SemesterKind::First);
    /// assert_eq!(SemesterKind::from_header("Insegnamenti - Annuale"), SemesterKind::Annual);
    /// assert_eq!(SemesterKind::from_header("Altro"), SemesterKind::Unknown);
    /// ```
    pub fn from_header(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        if lower.contains("primo semestre") {
            SemesterKind::First
        } else if lower.contains("secondo semestre") {
            SemesterKind::Second
        } else if lower.contains("annuale") {
            SemesterKind::Annual
        } else {
            SemesterKind::Unknown
        }
    }
}

/// Wire form of [`SemesterKind`]: a number for the two semesters, a label otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SemesterRepr {
    Number(u8),
    Label(String),
}

impl From<SemesterKind> for SemesterRepr {
    fn from(kind: SemesterKind) -> Self {
        match kind {
            SemesterKind::First => SemesterRepr::Number(1),
            SemesterKind::Second => SemesterRepr::Number(2),
            SemesterKind::Annual => SemesterRepr::Label("annual".to_string()),
            SemesterKind::Unknown => SemesterRepr::Label("unknown".to_string()),
        }
    }
}

impl TryFrom<SemesterRepr> for SemesterKind {
    type Error = String;

    fn try_from(repr: SemesterRepr) -> Result<Self, Self::Error> {
        match repr {
            SemesterRepr::Number(1) => Ok(SemesterKind::First),
            SemesterRepr::Number(2) => Ok(SemesterKind::Second),
            SemesterRepr::Number(n) => Err(format!("invalid semester number: {}", n)),
            SemesterRepr::Label(label) => match label.as_str() {
                "annual" => Ok(SemesterKind::Annual),
                "unknown" => Ok(SemesterKind::Unknown),
                other => Err(format!("invalid semester label: {}", other)),
            },
        }
    }
}

/// Exams held in one term of an academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Term of this group
    pub semester: SemesterKind,
    /// Mandatory exams, in page order
    pub obligatory_exams: Vec<Exam>,
    /// Elective exams, in page order
    pub optional_exams: Vec<Exam>,
}

impl Semester {
    /// Create an empty semester of the given kind
    pub fn new(semester: SemesterKind) -> Self {
        Self {
            semester,
            obligatory_exams: Vec::new(),
            optional_exams: Vec::new(),
        }
    }
}

/// One year of a course plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    /// Year number (1-based)
    pub year: u32,
    /// Semesters in the order they appear on the page
    pub semesters: Vec<Semester>,
}

/// Whether an exam is mandatory or elective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Listed under an "Obbligatorio" row
    Obligatory,
    /// Listed under an "A scelta" row
    Optional,
}

/// Exam counts and credit sums of a course
///
/// Sums saturate at `u32::MAX` instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExamTotals {
    /// Number of obligatory exams
    pub obligatory_exams: u32,
    /// Number of optional exams
    pub optional_exams: u32,
    /// Credits of all obligatory exams
    pub obligatory_cfu: u32,
    /// Credits of all optional exams
    pub optional_cfu: u32,
}

impl ExamTotals {
    /// Fold one exam into the totals
    pub fn record(&mut self, section: Section, cfu: u32) {
        match section {
            Section::Obligatory => {
                self.obligatory_exams = self.obligatory_exams.saturating_add(1);
                self.obligatory_cfu = self.obligatory_cfu.saturating_add(cfu);
            }
            Section::Optional => {
                self.optional_exams = self.optional_exams.saturating_add(1);
                self.optional_cfu = self.optional_cfu.saturating_add(cfu);
            }
        }
    }
}

/// Everything parsed from a single course page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseStructure {
    /// Declared total credits, if the page states them
    pub total_cfu: Option<u32>,
    /// Totals accumulated while parsing the exam tables
    pub totals: ExamTotals,
    /// Academic years in page order
    pub years: Vec<AcademicYear>,
}

/// A scraped degree course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course title as shown on the listing page
    pub title: String,
    /// Absolute URL of the course page
    pub url: String,
    /// Declared total credits, `None` if the page does not state them
    pub total_cfu: Option<u32>,
    /// Number of obligatory exams over all years
    pub total_obligatory_exams: u32,
    /// Number of optional exams over all years
    pub total_optional_exams: u32,
    /// Credits of all obligatory exams
    pub total_obligatory_cfu: u32,
    /// Credits of all optional exams
    pub total_optional_cfu: u32,
    /// Academic years in page order
    pub years: Vec<AcademicYear>,
}

impl Course {
    /// Combine a listing link with the structure parsed from its page
    pub fn from_parts(link: &CourseLink, structure: CourseStructure) -> Self {
        let CourseStructure {
            total_cfu,
            totals,
            years,
        } = structure;
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            total_cfu,
            total_obligatory_exams: totals.obligatory_exams,
            total_optional_exams: totals.optional_exams,
            total_obligatory_cfu: totals.obligatory_cfu,
            total_optional_cfu: totals.optional_cfu,
            years,
        }
    }

    /// Total number of exams, obligatory and optional
    pub fn total_exams(&self) -> u32 {
        self.total_obligatory_exams
            .saturating_add(self.total_optional_exams)
    }

    /// Iterate over every exam of the course with its section
    pub fn exams(&self) -> impl Iterator<Item = (Section, &Exam)> {
        self.years.iter().flat_map(|y| y.semesters.iter()).flat_map(|s| {
            s.obligatory_exams
                .iter()
                .map(|e| (Section::Obligatory, e))
                .chain(s.optional_exams.iter().map(|e| (Section::Optional, e)))
        })
    }

    /// Recompute the totals by walking the year/semester structure
    pub fn flattened_totals(&self) -> ExamTotals {
        let mut totals = ExamTotals::default();
        for (section, exam) in self.exams() {
            totals.record(section, exam.cfu);
        }
        totals
    }

    /// Totals as stored on the record
    pub fn stored_totals(&self) -> ExamTotals {
        ExamTotals {
            obligatory_exams: self.total_obligatory_exams,
            optional_exams: self.total_optional_exams,
            obligatory_cfu: self.total_obligatory_cfu,
            optional_cfu: self.total_optional_cfu,
        }
    }
}
