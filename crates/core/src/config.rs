//! Scraping configuration.
//!
//! # Example
//!
//! ```rust
//! use wikitable_core::ScrapeConfig;
//!
//! let config = ScrapeConfig::builder()
//!     .line_break(" / ")
//!     .max_filename_len(64)
//!     .build();
//! assert_eq!(config.max_filename_len, 64);
//! ```

/// Default maximum length of an output filename stem.
pub const DEFAULT_MAX_FILENAME_LEN: usize = 250;

/// Default replacement for `<br>` elements inside cells.
pub const DEFAULT_LINE_BREAK: &str = " ";

/// Configuration for locating, rebuilding and writing tables.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Text substituted for each `<br>` before whitespace is collapsed (default: `" "`).
    pub line_break: String,

    /// Maximum length of a CSV filename, excluding `.csv` (default: 250).
    pub max_filename_len: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self { line_break: DEFAULT_LINE_BREAK.to_string(), max_filename_len: DEFAULT_MAX_FILENAME_LEN }
    }
}

impl ScrapeConfig {
    /// Creates a new builder for ScrapeConfig.
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new()
    }
}

/// Builder for ScrapeConfig.
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ScrapeConfig::default() }
    }

    /// Sets the `<br>` replacement text.
    pub fn line_break(mut self, value: impl Into<String>) -> Self {
        self.config.line_break = value.into();
        self
    }

    /// Sets the maximum filename length.
    pub fn max_filename_len(mut self, value: usize) -> Self {
        self.config.max_filename_len = value;
        self
    }

    /// Builds the ScrapeConfig.
    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
