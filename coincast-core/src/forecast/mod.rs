//! Additive trend + seasonality forecaster.
//!
//! The model is `y(t) = trend(t) + Σ seasonal(t) + ε`, with a piecewise-linear
//! trend whose slope may change at evenly spaced changepoints, and Fourier
//! seasonal terms. Coefficients are the MAP estimate under Gaussian priors,
//! which reduces to ridge-penalized least squares.
//!
//! Uncertainty combines observation noise with trend uncertainty that grows
//! beyond the end of history, in proportion to how much the trend has been
//! changing so far.

pub mod design;
pub mod solve;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;
use tracing::debug;

use crate::config::ForecastConfig;
use crate::domain::PriceSeries;
pub use design::{Design, Seasonality};
use solve::{penalized_least_squares, predict_row};

/// Ridge used in the first pass so collinear columns still solve.
const FIRST_PASS_RIDGE: f64 = 1e-9;
const MIN_SIGMA2: f64 = 1e-10;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("need at least 2 observations to fit a model, got {got}")]
    InsufficientData { got: usize },

    #[error("timestamps must be strictly increasing")]
    UnorderedSeries,

    #[error("model fit failed: {0}")]
    Singular(String),

    #[error("model produced non-finite values")]
    NonFinite,
}

/// One predicted value with its uncertainty band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Fitted values over the history followed by the future steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastFrame {
    pub points: Vec<ForecastPoint>,
    pub last_observed: NaiveDateTime,
}

impl ForecastFrame {
    /// Rows strictly after the last observed timestamp, in order.
    pub fn future(&self) -> &[ForecastPoint] {
        let start = self
            .points
            .partition_point(|p| p.timestamp <= self.last_observed);
        &self.points[start..]
    }

    /// In-sample fitted rows.
    pub fn history(&self) -> &[ForecastPoint] {
        let end = self.points.len() - self.future().len();
        &self.points[..end]
    }
}

/// Fits the model on a price series and extends it `periods` hours ahead.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn forecast(&self, series: &PriceSeries) -> Result<ForecastFrame, ForecastError> {
        let timestamps = series.timestamps();
        let n = timestamps.len();
        if n < 2 {
            return Err(ForecastError::InsufficientData { got: n });
        }
        if timestamps.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ForecastError::UnorderedSeries);
        }

        let prices = series.prices();
        let max_abs = prices.iter().fold(0.0_f64, |m, p| m.max(p.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
        let y: Vec<f64> = prices.iter().map(|p| p / y_scale).collect();

        let design = Design::new(&timestamps, &self.config);
        let rows: Vec<Vec<f64>> = timestamps.iter().map(|&ts| design.row(ts)).collect();

        let first = penalized_least_squares(&rows, &y, &vec![FIRST_PASS_RIDGE; design.width()])?;
        let sigma2 = residual_variance(&rows, &y, &first);

        let penalties = design.penalties(sigma2, &self.config);
        let beta = penalized_least_squares(&rows, &y, &penalties)?;
        let sigma2 = residual_variance(&rows, &y, &beta);

        let deltas = &beta[design.hinge_columns()];
        let mean_abs_delta = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|d| d.abs()).sum::<f64>() / deltas.len() as f64
        };
        let changepoint_rate = design.changepoints.len() as f64;

        let z = interval_z(self.config.interval_width)?;

        debug!(
            observations = n,
            changepoints = design.changepoints.len(),
            seasonalities = design.seasonalities.len(),
            sigma = sigma2.sqrt() * y_scale,
            "model fitted"
        );

        let last = timestamps[n - 1];
        let future = (1..=self.config.periods).map(|h| last + Duration::hours(h as i64));

        let mut points = Vec::with_capacity(n + self.config.periods);
        for ts in timestamps.iter().copied().chain(future) {
            let row = design.row(ts);
            let yhat = predict_row(&row, &beta);
            let tau = design.scaled_time(ts);
            let variance = sigma2 + trend_variance(tau, changepoint_rate, mean_abs_delta);
            let half_width = z * variance.sqrt();

            let point = ForecastPoint {
                timestamp: ts,
                yhat: yhat * y_scale,
                yhat_lower: (yhat - half_width) * y_scale,
                yhat_upper: (yhat + half_width) * y_scale,
            };
            if !(point.yhat.is_finite() && point.yhat_lower.is_finite() && point.yhat_upper.is_finite()) {
                return Err(ForecastError::NonFinite);
            }
            points.push(point);
        }

        Ok(ForecastFrame {
            points,
            last_observed: last,
        })
    }
}

fn residual_variance(rows: &[Vec<f64>], y: &[f64], beta: &[f64]) -> f64 {
    let sse: f64 = rows
        .iter()
        .zip(y)
        .map(|(row, &yi)| (yi - predict_row(row, beta)).powi(2))
        .sum();
    (sse / rows.len() as f64).max(MIN_SIGMA2)
}

/// Variance of future trend drift at scaled time `tau`.
///
/// Future changepoints arrive at `rate` per unit of scaled time with
/// Laplace(0, λ) slope changes; each one contributes `δ·(τ − s)` by time τ.
/// Integrating the variance `2λ²(τ − s)²` over `s ∈ [1, τ]` gives
/// `rate · 2λ² · (τ − 1)³ / 3`. Zero on the history.
fn trend_variance(tau: f64, rate: f64, lambda: f64) -> f64 {
    if tau <= 1.0 {
        return 0.0;
    }
    rate * 2.0 * lambda.powi(2) * (tau - 1.0).powi(3) / 3.0
}

/// Two-sided standard normal quantile for the given interval width.
fn interval_z(width: f64) -> Result<f64, ForecastError> {
    let normal =
        Normal::new(0.0, 1.0).map_err(|e| ForecastError::Singular(e.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + width / 2.0))
}
