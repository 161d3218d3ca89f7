//! Yahoo Finance HTTP client
//!
//! Issues a single GET per call and hands the body to the CSV parser:
//! - No retries; transport errors surface as [`FetcherError::NetworkError`]
//! - Non-success statuses are logged and reported as an empty table, so an
//!   error page and an empty result set take the same fallback path
//! - No timeout beyond what the underlying client is configured with

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::fetcher::csv_parser::CsvTableParser;
use crate::fetcher::yahoo_config::YAHOO_BASE_URL;
use crate::fetcher::{FetcherResult, RawFetcher};
use crate::PriceTable;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP raw fetcher for the Yahoo Finance download endpoint
pub struct YahooHttpClient {
    client: Client,
    base_url: String,
}

impl YahooHttpClient {
    /// Create a client against the public Yahoo Finance endpoint
    ///
    /// # Errors
    /// Returns FetcherError::NetworkError if the TLS backend cannot be initialized
    pub fn new() -> FetcherResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, YAHOO_BASE_URL))
    }

    /// Create a client from a caller-configured reqwest client and base URL
    ///
    /// # Arguments
    /// * `client` - HTTP client (timeouts, proxies etc. are taken from it)
    /// * `base_url` - Scheme and host, e.g. "<https://query1.finance.yahoo.com>"
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RawFetcher for YahooHttpClient {
    async fn fetch_table(&self, url: &str) -> FetcherResult<PriceTable> {
        info!("Pulling data from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Request to {} returned {}, treating as empty table", url, status);
            return Ok(PriceTable::empty());
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), url);

        CsvTableParser::parse(&body)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
