//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over where hourly prices come from (Yahoo
//! Finance, CoinGecko, the synthetic generator) so the fetcher can chain them
//! and tests can mock them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::SourceConfig;
use crate::domain::{DataSource, PriceSeries};

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("coin not found on CoinGecko: {symbol}")]
    CoinNotFound { symbol: String },

    #[error("no price data available for {symbol} from any source")]
    NoData { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub series: PriceSeries,
    pub source: DataSource,
}

/// Trait for hourly price sources.
///
/// `symbol` is whatever the source keys on: a ticker for Yahoo Finance, a
/// coin id for CoinGecko.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch hourly USD prices over `[start, end]`. An empty series is a
    /// valid answer.
    fn fetch_hourly(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<FetchResult, DataError>;
}

/// Build the blocking HTTP client shared by the network sources.
pub fn http_client(config: &SourceConfig) -> Result<reqwest::blocking::Client, DataError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))
}

/// Issue a GET and decode a JSON body. Non-2xx statuses become
/// [`DataError::HttpStatus`].
pub(crate) fn get_json<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, DataError> {
    let resp = client
        .get(url)
        .query(query)
        .send()
        .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DataError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    resp.json::<T>()
        .map_err(|e| DataError::ResponseFormatChanged(format!("failed to parse {url}: {e}")))
}
