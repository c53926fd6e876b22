//! Error types for table scraping operations.
//!
//! This module defines the main error type [`WikitableError`] which represents
//! all possible errors that can occur while fetching markup, rebuilding table
//! grids, selecting a table by title, and writing CSV output.
//!
//! # Example
//!
//! ```rust
//! use wikitable_core::{TableScraper, WikitableError};
//!
//! let scraper = TableScraper::parse("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>").unwrap();
//! match scraper.find_table_by_title("volcanoes") {
//!     Ok(table) => println!("Found table {}", table.index()),
//!     Err(WikitableError::NoMatchingTable { titles, .. }) => println!("Choose from {:?}", titles),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for table scraping operations.
///
/// Span attributes that are missing, non-numeric or non-positive are never
/// surfaced here; they are treated as absent while the grid is rebuilt.
#[derive(Error, Debug)]
pub enum WikitableError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML query errors.
    ///
    /// The parser itself is lenient and never fails; this is returned for
    /// invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input read errors, including markup that is not valid UTF-8.
    #[error("Failed to read {input}: {error}")]
    ReadError {
        input: String,
        #[source]
        error: std::io::Error,
    },

    /// File write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// CSV serialization errors.
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),

    /// No table title matched a search.
    #[error("no matches found for '{search}', specify further from: {titles:?}")]
    NoMatchingTable { search: String, titles: Vec<String> },

    /// More than one table title matched a search.
    #[error("{count} matches for '{search}', specify further from: {titles:?}")]
    AmbiguousTable { search: String, count: usize, titles: Vec<String> },

    /// A row could not be reconciled with the table's column count.
    ///
    /// Raised when a row is wider than the width fixed by the table's first
    /// row even after column and row spans were resolved. `row` is 1-based.
    #[error("Row {row} has {found} cells but the table has {expected} columns")]
    InconsistentRow { row: usize, expected: usize, found: usize },
}

/// Result type alias for WikitableError.
pub type Result<T> = std::result::Result<T, WikitableError>;
