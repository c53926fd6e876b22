pub mod config;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod grid;
pub mod locate;
pub mod output;
pub mod parse;
pub mod scrape;
pub mod text;

pub use config::{ScrapeConfig, ScrapeConfigBuilder};
pub use error::{Result, WikitableError};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, fetch_url};
pub use grid::{LogicalRow, Rows};
pub use locate::{HtmlTable, locate_tables};
pub use output::{csv_filename, write_csv};
pub use parse::{Document, Element};
pub use scrape::{TableOutcome, TableScraper, TableSummary};
pub use text::clean_cell;
