//! Curriculum Scraper Core Library
//!
//! This crate provides the core scraping functionality for university
//! course catalogs laid out like the University of Milan (UNIMI) site.
//!
//! # Features
//! - Collect degree course links from a listing page
//! - Parse course plans into years, semesters and exams
//! - Accumulate exam counts and credit (CFU) totals per course
//! - Throttled HTTP client with a fixed delay between requests
//! - JSON output and run summary statistics

pub mod client;
pub mod error;
pub mod output;
pub mod parser;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{CatalogClient, ClientConfig, RateLimiter};
pub use error::{CatalogError, Result};
pub use output::{read_catalog, write_catalog, SummaryStats};
pub use parser::{CourseLinkFilter, LinkFilter};
pub use crate::scraper::{CatalogScraper, ScrapeConfig};
pub use types::{
    AcademicYear, Course, CourseLink, CourseStructure, Exam, ExamTotals, Section, Semester,
    SemesterKind,
};
