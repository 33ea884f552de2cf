//! Yahoo Finance price source (primary).
//!
//! Fetches hourly candles for `{SYMBOL}-USD` from Yahoo's v8 chart API and
//! keeps only the timestamp and close columns.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Any failure here sends the fetcher to the CoinGecko fallback.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::provider::{http_client, DataError, FetchResult, PriceSource};
use crate::config::SourceConfig;
use crate::domain::{DataSource, PricePoint, PriceSeries};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance price source.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(config: &SourceConfig) -> Result<Self, DataError> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Yahoo ticker for a crypto symbol quoted in USD.
    pub fn pair(symbol: &str) -> String {
        format!("{}-USD", symbol.to_uppercase())
    }

    /// Build the chart API URL for a symbol pair and time range.
    fn chart_url(&self, pair: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!(
            "{}/v8/finance/chart/{pair}?period1={}&period2={}&interval=1h",
            self.base_url,
            start.timestamp(),
            end.timestamp()
        )
    }

    /// Parse the chart API response into a price series.
    fn parse_response(pair: &str, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return Err(match resp.chart.error {
                    Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                        symbol: pair.to_string(),
                    },
                    Some(err) => DataError::ResponseFormatChanged(format!(
                        "{}: {}",
                        err.code, err.description
                    )),
                    None => DataError::ResponseFormatChanged("empty result with no error".into()),
                });
            }
        };

        // An empty result array or a missing timestamp column both mean "no candles".
        let Some(data) = result.into_iter().next() else {
            return Ok(PriceSeries::default());
        };
        let Some(timestamps) = data.timestamp else {
            return Ok(PriceSeries::default());
        };

        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Candles with no close (halted or partial) are skipped
            let Some(close) = closes.get(i).copied().flatten() else {
                continue;
            };
            let timestamp = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;
            points.push(PricePoint::new(timestamp, close));
        }

        Ok(PriceSeries::from_points(points))
    }
}

impl PriceSource for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_hourly(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<FetchResult, DataError> {
        let pair = Self::pair(symbol);
        let url = self.chart_url(&pair, start, end);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound { symbol: pair });
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {pair}: {e}"))
        })?;

        let series = Self::parse_response(&pair, chart)?;
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series,
            source: DataSource::YahooFinance,
        })
    }
}
