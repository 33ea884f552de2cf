//! One forecast run: fetch → fit → slice into horizon rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::CoincastConfig;
use crate::data::{DataError, MarketDataFetcher};
use crate::domain::{DataSource, Symbol};
use crate::forecast::{ForecastError, Forecaster};
use crate::horizon::{build_rows, HorizonRow, HorizonWarning};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl PipelineError {
    /// The ticker is unknown to both sources.
    pub fn is_coin_not_found(&self) -> bool {
        matches!(self, PipelineError::Data(DataError::CoinNotFound { .. }))
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub symbol: Symbol,
    pub source: DataSource,
    pub current_price: f64,
    pub last_observed: NaiveDateTime,
    pub history_len: usize,
    pub rows: Vec<HorizonRow>,
    pub warnings: Vec<HorizonWarning>,
}

pub struct Pipeline {
    fetcher: MarketDataFetcher,
    forecaster: Forecaster,
}

impl Pipeline {
    pub fn new(fetcher: MarketDataFetcher, forecaster: Forecaster) -> Self {
        Self {
            fetcher,
            forecaster,
        }
    }

    pub fn from_config(config: &CoincastConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            MarketDataFetcher::from_config(config)?,
            Forecaster::new(config.forecast.clone()),
        ))
    }

    pub fn fetcher(&self) -> &MarketDataFetcher {
        &self.fetcher
    }

    /// Run the full pipeline for `symbol`. Nothing partial is returned on error.
    pub fn run(&self, symbol: &str) -> Result<PipelineOutput, PipelineError> {
        let fetched = self.fetcher.fetch(symbol)?;
        let frame = self.forecaster.forecast(&fetched.series)?;

        // The fetcher never returns an empty series.
        let last = fetched
            .series
            .last()
            .copied()
            .ok_or_else(|| DataError::NoData {
                symbol: fetched.symbol.clone(),
            })?;

        let table = build_rows(frame.future(), last.price);
        info!(
            symbol = %fetched.symbol,
            source = fetched.source.label(),
            rows = table.rows.len(),
            skipped = table.warnings.len(),
            "forecast ready"
        );

        Ok(PipelineOutput {
            symbol: fetched.symbol,
            source: fetched.source,
            current_price: last.price,
            last_observed: last.timestamp,
            history_len: fetched.series.len(),
            rows: table.rows,
            warnings: table.warnings,
        })
    }
}
