//! Market data fetcher with source fallback.
//!
//! Fallback policy for one symbol:
//! 1. Ask the primary source (Yahoo Finance) for `{SYMBOL}-USD` hourly candles
//! 2. If that yields no data (empty, or any failure), resolve the ticker to a
//!    CoinGecko coin id; an unknown ticker fails with `CoinNotFound`
//! 3. Ask the secondary source (CoinGecko) for the same window
//! 4. If that is empty too, fail with `NoData`

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::coingecko::CoinGeckoClient;
use super::provider::{DataError, FetchResult, PriceSource};
use super::symbols::SymbolResolver;
use super::synthetic::SyntheticSource;
use super::yahoo::YahooProvider;
use crate::config::CoincastConfig;
use crate::domain::normalize_symbol;

/// Secondary source plus the resolver that maps tickers to its ids.
pub struct Fallback {
    source: Box<dyn PriceSource>,
    resolver: SymbolResolver,
}

impl Fallback {
    pub fn new(source: Box<dyn PriceSource>, resolver: SymbolResolver) -> Self {
        Self { source, resolver }
    }
}

/// Fetches a trailing window of hourly prices for a ticker.
pub struct MarketDataFetcher {
    primary: Box<dyn PriceSource>,
    fallback: Option<Fallback>,
    lookback: Duration,
}

impl MarketDataFetcher {
    pub fn new(primary: Box<dyn PriceSource>, fallback: Option<Fallback>, lookback_days: i64) -> Self {
        Self {
            primary,
            fallback,
            lookback: Duration::days(lookback_days),
        }
    }

    /// Build the stock Yahoo → CoinGecko chain, or the synthetic source when
    /// `data.synthetic` is set.
    pub fn from_config(config: &CoincastConfig) -> Result<Self, DataError> {
        let lookback_days = config.sources.lookback_days;
        if config.data.synthetic {
            let source = SyntheticSource::new(config.data.synthetic_seed);
            return Ok(Self::new(Box::new(source), None, lookback_days));
        }

        let yahoo = YahooProvider::new(&config.sources)?;
        let coingecko = CoinGeckoClient::new(&config.sources)?;
        let resolver = SymbolResolver::new(Box::new(CoinGeckoClient::new(&config.sources)?));
        Ok(Self::new(
            Box::new(yahoo),
            Some(Fallback::new(Box::new(coingecko), resolver)),
            lookback_days,
        ))
    }

    /// The ticker resolver, if a fallback source is configured.
    pub fn resolver(&self) -> Option<&SymbolResolver> {
        self.fallback.as_ref().map(|f| &f.resolver)
    }

    /// Fetch the trailing window for `symbol` (case-insensitive).
    pub fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let symbol = normalize_symbol(symbol);
        let end = Utc::now();
        let start = end - self.lookback;

        match self.primary.fetch_hourly(&symbol, start, end) {
            Ok(result) if !result.series.is_empty() => {
                info!(
                    symbol = %symbol,
                    source = self.primary.name(),
                    points = result.series.len(),
                    "loaded price history"
                );
                return Ok(result);
            }
            Ok(_) => warn!(
                symbol = %symbol,
                source = self.primary.name(),
                "primary source returned no data"
            ),
            Err(e) => warn!(
                symbol = %symbol,
                source = self.primary.name(),
                error = %e,
                "primary source failed"
            ),
        }

        let Some(fallback) = &self.fallback else {
            return Err(DataError::NoData { symbol });
        };

        let coin_id = fallback
            .resolver
            .resolve(&symbol)?
            .ok_or_else(|| DataError::CoinNotFound {
                symbol: symbol.clone(),
            })?;

        let mut result = fallback.source.fetch_hourly(&coin_id, start, end)?;
        if result.series.is_empty() {
            return Err(DataError::NoData { symbol });
        }

        info!(
            symbol = %symbol,
            coin_id = %coin_id,
            source = fallback.source.name(),
            points = result.series.len(),
            "loaded price history from fallback"
        );
        result.symbol = symbol;
        Ok(result)
    }
}
