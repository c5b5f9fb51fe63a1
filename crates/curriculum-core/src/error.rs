//! Error types for the curriculum scraper
//!
//! This module defines all error types used throughout the library.
//! Fetch failures and row-parse failures are non-fatal for a run; callers
//! log them and move on to the next course or row.

use thiserror::Error;

/// Error type for curriculum scraper operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Numeric status code
        status: u16,
    },

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An exam table row could not be interpreted
    #[error("Failed to parse exam row: {0}")]
    RowParse(String),

    /// Reading or writing the output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for curriculum scraper operations
pub type Result<T> = std::result::Result<T, CatalogError>;
