//! Single-index download with URL-variant fallback

use tracing::{debug, warn};

use crate::downloader::config::{DateRange, TimestampZone};
use crate::downloader::{DownloadError, DownloadResult};
use crate::fetcher::yahoo_config::{build_download_url, UrlVariant};
use crate::fetcher::RawFetcher;
use crate::index::IndexName;
use crate::PriceTable;

/// Downloads the price table of one index
pub struct IndexDownloader {
    fetcher: Box<dyn RawFetcher>,
    timestamp_zone: TimestampZone,
}

impl IndexDownloader {
    /// Create a downloader over `fetcher`, interpreting dates as UTC midnight
    pub fn new(fetcher: Box<dyn RawFetcher>) -> Self {
        Self {
            fetcher,
            timestamp_zone: TimestampZone::default(),
        }
    }

    /// Set the timezone used to convert range dates to timestamps
    pub fn with_timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.timestamp_zone = zone;
        self
    }

    /// Timezone used to convert range dates to timestamps
    pub fn timestamp_zone(&self) -> TimestampZone {
        self.timestamp_zone
    }

    /// Fetch the non-empty price table for `index` over `range`
    ///
    /// The caret-prefixed, percent-encoded URL is tried first. Only if it
    /// yields zero rows is the verbatim URL tried. Row count is the sole
    /// fallback criterion.
    ///
    /// # Errors
    /// - DownloadError::FetcherError if either request fails at transport or parse level
    /// - DownloadError::DownloadFailed if both variants return zero rows
    pub async fn download_index(
        &self,
        index: &IndexName,
        range: &DateRange,
    ) -> DownloadResult<PriceTable> {
        let (start_ts, end_ts) = range.timestamps(self.timestamp_zone)?;

        for variant in UrlVariant::ATTEMPT_ORDER {
            let url = build_download_url(self.fetcher.base_url(), index, variant, start_ts, end_ts);
            let table = self.fetcher.fetch_table(&url).await?;

            if !table.is_empty() {
                debug!("Downloaded {} rows for {} via {:?}", table.len(), index, variant);
                return Ok(table);
            }

            warn!("Failed to pull data from: {}", url);
        }

        Err(DownloadError::DownloadFailed {
            index: index.to_string(),
        })
    }
}
