//! Regression design for the additive trend + seasonality model.
//!
//! Column layout: `[offset, slope, hinge_1..hinge_c, fourier...]` where each
//! hinge is `max(0, t - t_cp)` on the [0, 1]-scaled history time axis and the
//! Fourier terms are `sin/cos(2πk·days/period)` on absolute time.

use chrono::NaiveDateTime;

use crate::config::ForecastConfig;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A Fourier seasonal component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seasonality {
    pub name: &'static str,
    pub period_days: f64,
    pub order: usize,
}

pub const DAILY: Seasonality = Seasonality {
    name: "daily",
    period_days: 1.0,
    order: 4,
};

pub const WEEKLY: Seasonality = Seasonality {
    name: "weekly",
    period_days: 7.0,
    order: 3,
};

/// Fixed design derived from the training timestamps.
#[derive(Debug, Clone)]
pub struct Design {
    t0: NaiveDateTime,
    span_secs: f64,
    /// Changepoint locations on the scaled time axis.
    pub changepoints: Vec<f64>,
    pub seasonalities: Vec<Seasonality>,
}

impl Design {
    /// Lay out changepoints and pick seasonalities for the given history.
    ///
    /// `timestamps` must be strictly increasing with at least two entries.
    pub fn new(timestamps: &[NaiveDateTime], config: &ForecastConfig) -> Self {
        let t0 = timestamps[0];
        let last = timestamps[timestamps.len() - 1];
        let span_secs = (last - t0).num_seconds() as f64;

        let mut design = Self {
            t0,
            span_secs,
            changepoints: Vec::new(),
            seasonalities: Vec::new(),
        };

        // Changepoints sit on observed timestamps, evenly spread over the
        // first `changepoint_range` share of the history.
        let hist_size = (timestamps.len() as f64 * config.changepoint_range).floor() as usize;
        let n_changepoints = config.n_changepoints.min(hist_size.saturating_sub(1));
        if n_changepoints > 0 {
            let last_index = (hist_size - 1) as f64;
            design.changepoints = (1..=n_changepoints)
                .map(|i| {
                    let idx = (last_index * i as f64 / n_changepoints as f64).round() as usize;
                    design.scaled_time(timestamps[idx])
                })
                .collect();
        }

        let span_days = span_secs / SECONDS_PER_DAY;
        if span_days >= 2.0 {
            design.seasonalities.push(DAILY);
        }
        if span_days >= 14.0 {
            design.seasonalities.push(WEEKLY);
        }

        design
    }

    /// Time on the history axis: 0 at the first observation, 1 at the last.
    pub fn scaled_time(&self, ts: NaiveDateTime) -> f64 {
        (ts - self.t0).num_seconds() as f64 / self.span_secs
    }

    pub fn width(&self) -> usize {
        2 + self.changepoints.len() + self.fourier_width()
    }

    fn fourier_width(&self) -> usize {
        self.seasonalities.iter().map(|s| 2 * s.order).sum()
    }

    /// Range of hinge columns within a row.
    pub fn hinge_columns(&self) -> std::ops::Range<usize> {
        2..2 + self.changepoints.len()
    }

    /// Design row for one timestamp.
    pub fn row(&self, ts: NaiveDateTime) -> Vec<f64> {
        let t = self.scaled_time(ts);
        let mut row = Vec::with_capacity(self.width());
        row.push(1.0);
        row.push(t);
        row.extend(self.changepoints.iter().map(|&cp| (t - cp).max(0.0)));

        let days = ts.and_utc().timestamp() as f64 / SECONDS_PER_DAY;
        for season in &self.seasonalities {
            row.extend(fourier_terms(days, season.period_days, season.order));
        }
        row
    }

    /// Ridge penalty per column given the residual variance `sigma2`.
    ///
    /// A Normal(0, s) prior on a coefficient contributes `sigma2 / s²`. The
    /// changepoint Laplace(0, τ) prior is matched on variance (2τ²).
    pub fn penalties(&self, sigma2: f64, config: &ForecastConfig) -> Vec<f64> {
        let base = sigma2 / 25.0;
        let hinge = sigma2 / (2.0 * config.changepoint_prior_scale.powi(2));
        let season = sigma2 / config.seasonality_prior_scale.powi(2);

        let mut penalties = vec![base, base];
        penalties.extend(std::iter::repeat(hinge).take(self.changepoints.len()));
        penalties.extend(std::iter::repeat(season).take(self.fourier_width()));
        penalties
    }
}

/// `[sin(2π·1·t/P), cos(2π·1·t/P), …, sin(2π·N·t/P), cos(2π·N·t/P)]`
pub fn fourier_terms(t: f64, period: f64, order: usize) -> Vec<f64> {
    let mut terms = Vec::with_capacity(2 * order);
    for k in 1..=order {
        let angle = 2.0 * std::f64::consts::PI * k as f64 * t / period;
        terms.push(angle.sin());
        terms.push(angle.cos());
    }
    terms
}
