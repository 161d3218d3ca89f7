//! Download command implementation

use crate::downloader::{BatchDownloader, TimestampZone, DEFAULT_INDICES};
use crate::fetcher::YahooHttpClient;
use crate::output::{write_csv, write_json, write_summary, OutputError};
use clap::Parser;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::info;

use super::CliError;

/// Index History Downloader CLI
#[derive(Parser, Debug)]
#[command(name = "index-history-downloader")]
#[command(about = "Download daily price history for market indices", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start date (YYYY-MM-DD format)
    #[arg(long)]
    pub start: String,

    /// End date (YYYY-MM-DD format)
    #[arg(long)]
    pub end: String,

    /// Comma-separated index identifiers (default: AORD,BTC-USD,DAX,DJI,HSI,N225,NYA,GSPC)
    #[arg(long, value_delimiter = ',')]
    pub indices: Option<Vec<String>>,

    /// Timezone used to interpret dates: utc or local
    #[arg(long, default_value = "utc")]
    pub timezone: TimestampZone,

    /// Output format (human, json or csv)
    #[arg(long, default_value = "human")]
    pub output_format: OutputFormat,

    /// Override the endpoint base URL (scheme and host)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Indices to download, falling back to the default set
    pub fn indices(&self) -> Vec<String> {
        match &self.indices {
            Some(indices) => indices.clone(),
            None => DEFAULT_INDICES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Run the download and write the result to stdout
    pub async fn execute(&self) -> Result<(), CliError> {
        let fetcher = match &self.base_url {
            Some(base_url) => {
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(CliError::InvalidArgument(format!(
                        "base URL must start with http:// or https://, got '{base_url}'"
                    )));
                }
                YahooHttpClient::with_client(reqwest::Client::new(), base_url.clone())
            }
            None => YahooHttpClient::new()?,
        };

        let downloader =
            BatchDownloader::new(Box::new(fetcher)).with_timestamp_zone(self.timezone);

        let indices = self.indices();
        let tables = downloader.download(&self.start, &self.end, &indices).await?;

        info!("Download completed: {} indices", tables.len());

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.output_format {
            OutputFormat::Human => write_summary(&tables, &mut out)?,
            OutputFormat::Json => write_json(&tables, &mut out)?,
            OutputFormat::Csv => write_csv(&tables, &mut out)?,
        }
        out.flush()
            .map_err(|e| OutputError::IoError(format!("Failed to flush stdout: {e}")))?;

        Ok(())
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON output
    Json,
    /// Concatenated CSV tables
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}
