//! Coincast Core — price sources, symbol resolution, forecasting, horizon tables.
//!
//! This crate contains the whole forecast pipeline:
//! - Domain types (price points, series, data source tags)
//! - Yahoo Finance primary source with CoinGecko fallback
//! - Memoized ticker → CoinGecko id resolver
//! - Additive trend + seasonality forecaster
//! - Horizon table builder for the fixed hour offsets

pub mod config;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod horizon;
pub mod pipeline;

pub use config::CoincastConfig;
pub use pipeline::{Pipeline, PipelineError, PipelineOutput};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can move across threads.
    ///
    /// Front ends may run the pipeline off the UI thread. If any type fails
    /// this check, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::DataSource>();
        require_sync::<domain::DataSource>();

        // Data layer
        require_send::<data::MarketDataFetcher>();
        require_sync::<data::MarketDataFetcher>();
        require_send::<data::SymbolResolver>();
        require_sync::<data::SymbolResolver>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();

        // Forecast + horizons
        require_send::<forecast::ForecastFrame>();
        require_sync::<forecast::ForecastFrame>();
        require_send::<forecast::Forecaster>();
        require_sync::<forecast::Forecaster>();
        require_send::<horizon::HorizonRow>();
        require_sync::<horizon::HorizonRow>();

        // Pipeline
        require_send::<Pipeline>();
        require_sync::<Pipeline>();
        require_send::<PipelineOutput>();
        require_sync::<PipelineOutput>();
        require_send::<PipelineError>();
        require_sync::<PipelineError>();
    }

    /// Architecture contract: price sources see only a symbol and a window.
    ///
    /// Fallback decisions live in the fetcher, never in a source.
    #[test]
    fn price_source_trait_is_object_safe() {
        fn _check_trait_object_builds(
            source: &dyn data::PriceSource,
            start: chrono::DateTime<chrono::Utc>,
            end: chrono::DateTime<chrono::Utc>,
        ) -> Result<data::FetchResult, data::DataError> {
            source.fetch_hourly("BTC", start, end)
        }
    }
}
