//! Yahoo Finance download endpoint configuration
//!
//! Daily history is served as CSV from
//! `{base}/v7/finance/download/{identifier}?period1={start}&period2={end}&interval=1d&events=history`
//! where the timestamps are Unix seconds.

use crate::index::IndexName;

/// Base URL of the Yahoo Finance query API
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Path prefix of the CSV download endpoint
pub const DOWNLOAD_PATH: &str = "/v7/finance/download/";

/// Bar interval requested from the endpoint
pub const DAILY_INTERVAL: &str = "1d";

/// Event series requested from the endpoint
pub const HISTORY_EVENTS: &str = "history";

/// How the index identifier is substituted into the download URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlVariant {
    /// `^` prefixed and percent-encoded (e.g. `%5EDJI`), tried first
    CaretEncoded,
    /// Identifier used as-is (e.g. `BTC-USD`), tried when the first variant is empty
    Verbatim,
}

impl UrlVariant {
    /// Variants in the order they are attempted
    pub const ATTEMPT_ORDER: [UrlVariant; 2] = [UrlVariant::CaretEncoded, UrlVariant::Verbatim];

    /// Path segment for `index` under this variant
    pub fn identifier(&self, index: &IndexName) -> String {
        match self {
            UrlVariant::CaretEncoded => index.caret_encoded(),
            UrlVariant::Verbatim => index.verbatim().to_string(),
        }
    }
}

/// Build the full download URL for one index and range
///
/// # Arguments
/// * `base_url` - Scheme and host, e.g. [`YAHOO_BASE_URL`]; a trailing `/` is tolerated
/// * `index` - Validated index identifier
/// * `variant` - Identifier substitution strategy
/// * `start_ts` / `end_ts` - Range endpoints as Unix seconds
pub fn build_download_url(
    base_url: &str,
    index: &IndexName,
    variant: UrlVariant,
    start_ts: i64,
    end_ts: i64,
) -> String {
    format!(
        "{}{}{}?period1={}&period2={}&interval={}&events={}",
        base_url.trim_end_matches('/'),
        DOWNLOAD_PATH,
        variant.identifier(index),
        start_ts,
        end_ts,
        DAILY_INTERVAL,
        HISTORY_EVENTS
    )
}
