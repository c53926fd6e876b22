//! Main scraping API.
//!
//! [`TableScraper`] owns a parsed page and exposes its data tables: listing
//! them, picking one by title, and writing them out as CSV.
//!
//! # Example
//!
//! ```rust
//! use wikitable_core::TableScraper;
//!
//! let html = r#"
//!     <h2>Volcanoes</h2>
//!     <table>
//!         <tr><th>Name</th><th>Height</th></tr>
//!         <tr><td>Ojos del Salado</td><td>6893</td></tr>
//!     </table>
//! "#;
//!
//! let scraper = TableScraper::parse(html).unwrap();
//! let table = scraper.find_table_by_title("volcanoes").unwrap();
//!
//! let mut out = Vec::new();
//! scraper.write_table(&table, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("\"Name\",\"Height\"\n"));
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::locate::{HtmlTable, locate_tables};
use crate::output::{csv_filename, write_csv};
use crate::parse::Document;
use crate::text::search_key;
use crate::{Result, WikitableError};

/// A parsed page plus the configuration used to rebuild its tables.
pub struct TableScraper {
    document: Document,
    config: ScrapeConfig,
}

/// Short description of a located table.
///
/// A table that cannot be rebuilt keeps its entry with zero `rows` and
/// `columns` and the failure in `error`.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub index: usize,
    pub title: Option<String>,
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableSummary {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of writing one table during [`TableScraper::write_to_dir`].
#[derive(Debug)]
pub struct TableOutcome {
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<usize>,
}

impl TableOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl TableScraper {
    /// Parses a page with the default configuration.
    pub fn parse(html: &str) -> Result<Self> {
        Self::with_config(html, ScrapeConfig::default())
    }

    /// Parses a page with a custom configuration.
    pub fn with_config(html: &str, config: ScrapeConfig) -> Result<Self> {
        let document = Document::parse(html)?;
        Ok(Self { document, config })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Every data table on the page, in document order.
    pub fn tables(&self) -> Vec<HtmlTable<'_>> {
        locate_tables(&self.document, &self.config)
    }

    /// The output filename for a table, from its title or its position.
    pub fn filename(&self, table: &HtmlTable<'_>) -> String {
        let name = csv_filename(&table.name(), self.config.max_filename_len);
        if name == ".csv" {
            return csv_filename(&format!("table_{}", table.index()), self.config.max_filename_len);
        }
        name
    }

    /// Summaries of every table, rebuilding each to count its rows.
    ///
    /// One entry per table; a table that fails to rebuild is reported in its
    /// own entry without affecting the others.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables()
            .iter()
            .map(|table| {
                let mut summary = TableSummary {
                    index: table.index(),
                    title: table.title().map(str::to_string),
                    filename: self.filename(table),
                    rows: 0,
                    columns: 0,
                    error: None,
                };

                match table.to_rows() {
                    Ok(rows) => {
                        summary.rows = rows.len();
                        summary.columns = rows.first().map_or(0, Vec::len);
                    }
                    Err(e) => {
                        warn!(index = table.index(), error = %e, "Table could not be rebuilt");
                        summary.error = Some(e.to_string());
                    }
                }
                summary
            })
            .collect()
    }

    /// Selects the one table whose title matches `search`.
    ///
    /// Titles and search are compared on lowercase letters and digits only.
    /// An exact match wins immediately; otherwise the search must be a
    /// substring of exactly one title. Untitled tables never match.
    ///
    /// # Errors
    ///
    /// [`WikitableError::NoMatchingTable`] or [`WikitableError::AmbiguousTable`],
    /// both carrying every resolved title in document order.
    pub fn find_table_by_title(&self, search: &str) -> Result<HtmlTable<'_>> {
        let needle = search_key(search);
        let mut titles = Vec::new();
        let mut matches = Vec::new();

        for table in self.tables() {
            let Some(title) = table.title() else { continue };
            titles.push(title.to_string());

            let haystack = search_key(title);
            if haystack == needle {
                debug!(index = table.index(), title, "Exact title match");
                return Ok(table);
            }
            if haystack.contains(&needle) {
                matches.push(table);
            }
        }

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(WikitableError::NoMatchingTable { search: search.to_string(), titles }),
            count => Err(WikitableError::AmbiguousTable { search: search.to_string(), count, titles }),
        }
    }

    /// Writes one table as CSV. Nothing is written if the table fails to rebuild.
    pub fn write_table<W: io::Write>(&self, table: &HtmlTable<'_>, writer: W) -> Result<usize> {
        let rows = table.to_rows()?;
        write_csv(&rows, writer)
    }

    /// Writes every table into `dir` (created if missing), one CSV per table.
    ///
    /// A table that fails is logged and reported in its [`TableOutcome`];
    /// the remaining tables are still written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<TableOutcome>> {
        fs::create_dir_all(dir)?;

        let outcomes = self
            .tables()
            .iter()
            .map(|table| {
                let path = dir.join(self.filename(table));
                info!(index = table.index(), path = %path.display(), "Writing table");

                let result = self.write_table_to_file(table, &path);
                if let Err(e) = &result {
                    warn!(index = table.index(), error = %e, "Skipping table");
                }
                TableOutcome { index: table.index(), path, result }
            })
            .collect();

        Ok(outcomes)
    }

    fn write_table_to_file(&self, table: &HtmlTable<'_>, path: &Path) -> Result<usize> {
        let rows = table.to_rows()?;
        let file = File::create(path)?;
        write_csv(&rows, BufWriter::new(file))
    }
}
