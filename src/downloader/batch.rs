//! Batch download over a list of indices

use tracing::info;

use crate::downloader::config::{DateRange, TimestampZone, DEFAULT_INDICES};
use crate::downloader::index::IndexDownloader;
use crate::downloader::{DownloadError, DownloadResult};
use crate::fetcher::{RawFetcher, YahooHttpClient};
use crate::index::IndexName;
use crate::IndexTables;

/// Downloads several indices in order, failing fast
pub struct BatchDownloader {
    index_downloader: IndexDownloader,
}

impl BatchDownloader {
    /// Create a batch downloader over `fetcher`
    pub fn new(fetcher: Box<dyn RawFetcher>) -> Self {
        Self {
            index_downloader: IndexDownloader::new(fetcher),
        }
    }

    /// Set the timezone used to convert range dates to timestamps
    pub fn with_timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.index_downloader = self.index_downloader.with_timestamp_zone(zone);
        self
    }

    /// Validate an indices list without touching the network
    ///
    /// # Errors
    /// Returns DownloadError::InvalidArgument if any identifier is malformed
    pub fn validate_indices<S: AsRef<str>>(indices: &[S]) -> DownloadResult<Vec<IndexName>> {
        indices
            .iter()
            .map(|raw| IndexName::parse(raw.as_ref()).map_err(DownloadError::from))
            .collect()
    }

    /// Download every index in `indices` over `[start_date, end_date]`
    ///
    /// All arguments are validated before the first request. Indices are
    /// fetched one at a time in list order; the first failure aborts the batch
    /// and no partial mapping is returned. Identifiers sharing a key are each
    /// downloaded and the later table replaces the earlier one.
    ///
    /// # Arguments
    /// * `start_date` / `end_date` - Dates in `YYYY-MM-DD` format
    /// * `indices` - Index identifiers (e.g. "DJI", "BTC-USD")
    ///
    /// # Returns
    /// Mapping from normalized key (e.g. "btc_usd") to a non-empty price table
    pub async fn download<S: AsRef<str>>(
        &self,
        start_date: &str,
        end_date: &str,
        indices: &[S],
    ) -> DownloadResult<IndexTables> {
        let range = DateRange::parse(start_date, end_date)?;
        let indices = Self::validate_indices(indices)?;

        info!(
            "Downloading {} indices from {} to {}",
            indices.len(),
            range.start,
            range.end
        );

        let mut tables = IndexTables::new();
        for index in &indices {
            let table = self.index_downloader.download_index(index, &range).await?;
            info!("Downloaded {} rows for {}", table.len(), index);
            tables.insert(index.key(), table);
        }

        Ok(tables)
    }

    /// Download [`DEFAULT_INDICES`] over `[start_date, end_date]`
    pub async fn download_default(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> DownloadResult<IndexTables> {
        self.download(start_date, end_date, &DEFAULT_INDICES).await
    }
}

/// Download daily history for `indices` (or [`DEFAULT_INDICES`] when `None`)
/// from the public Yahoo Finance endpoint
///
/// Dates are `YYYY-MM-DD` and are interpreted as UTC midnight; use
/// [`BatchDownloader::with_timestamp_zone`] for host-local interpretation.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), index_history_downloader::DownloadError> {
/// let tables = index_history_downloader::download("2021-01-01", "2021-06-30", None).await?;
/// assert_eq!(tables.len(), 8);
/// # Ok(())
/// # }
/// ```
pub async fn download(
    start_date: &str,
    end_date: &str,
    indices: Option<&[&str]>,
) -> DownloadResult<IndexTables> {
    let downloader = BatchDownloader::new(Box::new(YahooHttpClient::new()?));

    downloader
        .download(start_date, end_date, indices.unwrap_or(&DEFAULT_INDICES))
        .await
}
