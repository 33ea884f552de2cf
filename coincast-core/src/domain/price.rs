//! Price points and the hourly price series fed to the forecaster.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single observed USD price at a naive (UTC wall-clock) timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDateTime, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Returns true if the price is usable (finite).
    pub fn is_valid(&self) -> bool {
        self.price.is_finite()
    }
}

/// Ordered price history with strictly increasing timestamps.
///
/// The only way to build one is [`PriceSeries::from_points`], which sorts,
/// drops non-finite prices, and collapses duplicate timestamps (last wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Normalize raw points into a series.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points.into_iter().filter(PricePoint::is_valid).collect();
        // Stable sort keeps arrival order among equal timestamps.
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }
}

/// Where a price series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CoinGecko,
    Synthetic,
}

impl DataSource {
    pub fn label(self) -> &'static str {
        match self {
            DataSource::YahooFinance => "Yahoo Finance",
            DataSource::CoinGecko => "CoinGecko",
            DataSource::Synthetic => "synthetic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn sorts_unordered_points() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(ts(2), 3.0),
            PricePoint::new(ts(0), 1.0),
            PricePoint::new(ts(1), 2.0),
        ]);
        assert_eq!(series.prices(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn drops_non_finite_prices() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(ts(0), 1.0),
            PricePoint::new(ts(1), f64::NAN),
            PricePoint::new(ts(2), f64::INFINITY),
        ]);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn duplicate_timestamps_keep_last() {
        let series = PriceSeries::from_points(vec![
            PricePoint::new(ts(0), 1.0),
            PricePoint::new(ts(1), 2.0),
            PricePoint::new(ts(1), 2.5),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().price, 2.5);
        for pair in series.points().windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::from_points(Vec::new());
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
