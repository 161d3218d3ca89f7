//! Raw fetchers for the remote price-history endpoint
//!
//! A raw fetcher performs exactly one HTTP GET for a fully-formed URL and
//! parses the body into a [`PriceTable`]. It never retries and never decides
//! what an empty table means; that is left to the
//! [`IndexDownloader`](crate::downloader::IndexDownloader).

use crate::PriceTable;
use async_trait::async_trait;

pub mod csv_parser;
pub mod yahoo_config;
pub mod yahoo_http;

pub use yahoo_http::YahooHttpClient;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Transport-level failure (DNS, connect, timeout, reset), passed through untranslated
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body is not well-formed delimited text
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Source of raw price tables
#[async_trait]
pub trait RawFetcher: Send + Sync {
    /// Fetch one URL and parse its body into a table
    ///
    /// # Arguments
    /// * `url` - Complete, already-encoded HTTP(S) URL
    ///
    /// # Returns
    /// Table with zero or more rows. Zero rows is not an error at this layer.
    async fn fetch_table(&self, url: &str) -> FetcherResult<PriceTable>;

    /// Base URL that download URLs are built against
    fn base_url(&self) -> &str;
}
