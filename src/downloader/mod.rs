//! Download orchestration
//!
//! This module turns a date range and a list of index identifiers into the
//! Result Mapping of price tables.
//!
//! # Overview
//!
//! 1. **Validation**: identifiers and dates are checked up front; nothing is
//!    fetched if any argument is invalid
//! 2. **Per-index download**: [`index::IndexDownloader`] tries the
//!    caret-prefixed URL first and the verbatim URL second
//! 3. **Batch**: [`batch::BatchDownloader`] walks the list in order and stops at
//!    the first index that fails
//!
//! # Quick Start
//!
//! ```no_run
//! use index_history_downloader::downloader::{BatchDownloader, TimestampZone};
//! use index_history_downloader::fetcher::YahooHttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = BatchDownloader::new(Box::new(YahooHttpClient::new()?))
//!     .with_timestamp_zone(TimestampZone::Local);
//!
//! let tables = downloader
//!     .download("2020-01-01", "2020-12-31", &["DJI", "N225"])
//!     .await?;
//! assert!(tables.contains_key("n225"));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, DownloadError>`. Nothing is retried beyond
//! the single URL-variant fallback, and the first error aborts the batch:
//! - Invalid arguments (raised before any network call)
//! - Fetcher errors (network/parse, passed through)
//! - Download failures (both URL variants returned zero rows)

pub mod batch;
pub mod config;
pub mod index;


pub use batch::{download, BatchDownloader};
pub use config::{DateRange, TimestampZone, DEFAULT_INDICES};
pub use index::IndexDownloader;

use crate::fetcher::FetcherError;
use crate::index::IndexError;

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Invalid argument (indices list or dates)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Fetcher error
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Both URL variants returned an empty table
    #[error("failed to download data for index: {index}")]
    DownloadFailed {
        /// Index identifier as requested
        index: String,
    },
}

impl From<IndexError> for DownloadError {
    fn from(err: IndexError) -> Self {
        DownloadError::InvalidArgument(err.to_string())
    }
}

/// Result type for download operations
pub type DownloadResult<T> = Result<T, DownloadError>;
