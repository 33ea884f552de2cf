//! Horizon rows: the forecast sliced at fixed hour offsets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::forecast::ForecastPoint;

/// Hour offsets reported for every forecast, ascending.
pub const HORIZONS: [usize; 13] = [1, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24];

const PRICE_DECIMALS: i32 = 5;
const PERCENT_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
}

impl Trend {
    /// Strictly positive change is an uptrend; zero is not.
    pub fn from_percent_change(percent_change: f64) -> Self {
        if percent_change > 0.0 {
            Trend::Uptrend
        } else {
            Trend::Downtrend
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonRow {
    pub hour_offset: usize,
    pub predicted_timestamp: NaiveDateTime,
    pub current_price: f64,
    pub predicted_price: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub absolute_change: f64,
    pub percent_change: f64,
    pub trend: Trend,
}

/// A horizon that the forecast did not reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonWarning {
    pub hour_offset: usize,
    pub available: usize,
}

impl std::fmt::Display for HorizonWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no forecast for {} hour(s) ahead: only {} future step(s) available",
            self.hour_offset, self.available
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonTable {
    pub rows: Vec<HorizonRow>,
    pub warnings: Vec<HorizonWarning>,
}

/// Round to `decimals` places, exact halves going to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Build rows for every entry of [`HORIZONS`] from the future forecast rows.
///
/// `future[h - 1]` is the prediction `h` hours after the last observation.
/// Horizons beyond the end of `future` are skipped with a warning.
pub fn build_rows(future: &[ForecastPoint], current_price: f64) -> HorizonTable {
    let current = round_to(current_price, PRICE_DECIMALS);
    let mut table = HorizonTable::default();

    for &hour_offset in HORIZONS.iter() {
        let Some(point) = future.get(hour_offset - 1) else {
            warn!(hour_offset, available = future.len(), "horizon out of range");
            table.warnings.push(HorizonWarning {
                hour_offset,
                available: future.len(),
            });
            continue;
        };

        let predicted = round_to(point.yhat, PRICE_DECIMALS);
        let absolute_change = round_to(predicted - current, PRICE_DECIMALS);
        let percent_change = if current == 0.0 {
            0.0
        } else {
            round_to(absolute_change / current * 100.0, PERCENT_DECIMALS)
        };

        table.rows.push(HorizonRow {
            hour_offset,
            predicted_timestamp: point.timestamp,
            current_price: current,
            predicted_price: predicted,
            lower_bound: round_to(point.yhat_lower, PRICE_DECIMALS),
            upper_bound: round_to(point.yhat_upper, PRICE_DECIMALS),
            absolute_change,
            percent_change,
            trend: Trend::from_percent_change(percent_change),
        });
    }

    table
}
