//! CoinGecko price source (secondary) and coin listing.
//!
//! Two endpoints are used:
//! - `GET /coins/list` for the ticker → coin-id table (see [`super::symbols`])
//! - `GET /coins/{id}/market_chart/range` for `[timestamp_ms, price]` pairs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::provider::{get_json, http_client, DataError, FetchResult, PriceSource};
use crate::config::SourceConfig;
use crate::domain::{DataSource, PricePoint, PriceSeries};

/// One entry of the `/coins/list` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// Source of the coin listing used to build the symbol map.
pub trait CoinListing: Send + Sync {
    fn list_coins(&self) -> Result<Vec<CoinListEntry>, DataError>;
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<[f64; 2]>,
}

/// CoinGecko REST client.
pub struct CoinGeckoClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(config: &SourceConfig) -> Result<Self, DataError> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.coingecko_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_series(payload: MarketChartResponse) -> Result<PriceSeries, DataError> {
        let mut points = Vec::with_capacity(payload.prices.len());
        for [timestamp_ms, price] in payload.prices {
            let timestamp = DateTime::from_timestamp_millis(timestamp_ms as i64)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {timestamp_ms}"))
                })?;
            points.push(PricePoint::new(timestamp, price));
        }
        Ok(PriceSeries::from_points(points))
    }
}

impl CoinListing for CoinGeckoClient {
    fn list_coins(&self) -> Result<Vec<CoinListEntry>, DataError> {
        let url = format!("{}/coins/list", self.base_url);
        get_json(&self.client, &url, &[])
    }
}

impl PriceSource for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch_hourly(
        &self,
        coin_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<FetchResult, DataError> {
        let url = format!("{}/coins/{coin_id}/market_chart/range", self.base_url);
        let query = [
            ("vs_currency", "usd".to_string()),
            ("from", start.timestamp().to_string()),
            ("to", end.timestamp().to_string()),
        ];
        let payload: MarketChartResponse = get_json(&self.client, &url, &query)?;
        Ok(FetchResult {
            symbol: coin_id.to_string(),
            series: Self::build_series(payload)?,
            source: DataSource::CoinGecko,
        })
    }
}
