//! Page fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving HTML markup from
//! various sources: HTTP/HTTPS URLs, local files, and standard input.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{Result, WikitableError};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; wikitable/1.0)".to_string() }
    }
}

/// Fetches HTML markup from a URL.
///
/// Follows redirects and respects the configured timeout. A non-success
/// status code is returned as [`WikitableError::HttpError`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| WikitableError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(WikitableError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http:// or https://)",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(WikitableError::HttpError)?;

    debug!(url = %parsed_url, "Fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                WikitableError::Timeout { timeout: config.timeout }
            } else {
                WikitableError::HttpError(e)
            }
        })?
        .error_for_status()?;

    let content = response.text().await?;
    debug!(bytes = content.len(), "Fetched page");

    Ok(content)
}

/// Reads HTML markup from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(WikitableError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(|error| WikitableError::ReadError { input: path.to_string(), error })
    }
}

/// Reads HTML markup from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| WikitableError::ReadError { input: "stdin".to_string(), error })?;

    Ok(buffer)
}
