//! Synthetic hourly price source for offline runs and demos.
//!
//! Produces a seeded random walk with a mild daily cycle on whole-hour
//! timestamps. Results built on it are tagged `DataSource::Synthetic`.

use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, FetchResult, PriceSource};
use crate::domain::{DataSource, PricePoint, PriceSeries};

/// Deterministic synthetic price source.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    start_price: f64,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_price: 100.0,
        }
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        self.start_price = price;
        self
    }

    /// Same symbol + seed always yields the same walk.
    fn symbol_seed(&self, symbol: &str) -> u64 {
        symbol
            .bytes()
            .fold(self.seed ^ 0xcbf2_9ce4_8422_2325, |acc, b| {
                (acc ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
            })
    }

    /// Generate the walk over `[start, end]`, one point per whole hour.
    pub fn generate(&self, symbol: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> PriceSeries {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut current = start
            .duration_trunc(Duration::hours(1))
            .unwrap_or(start);
        let mut price = self.start_price;
        let mut points = Vec::new();

        while current <= end {
            let hour = f64::from(chrono::Timelike::hour(&current));
            let cycle = 0.002 * (2.0 * std::f64::consts::PI * hour / 24.0).sin();
            let step: f64 = rng.gen_range(-0.004..0.004);
            price *= 1.0 + step + cycle * 0.1;
            points.push(PricePoint::new(
                current.naive_utc(),
                price * (1.0 + cycle),
            ));
            current += Duration::hours(1);
        }

        PriceSeries::from_points(points)
    }
}

impl PriceSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_hourly(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series: self.generate(symbol, start, end),
            source: DataSource::Synthetic,
        })
    }
}
