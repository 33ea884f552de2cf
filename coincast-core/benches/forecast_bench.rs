//! Criterion benchmarks for the forecast hot paths.
//!
//! Benchmarks:
//! 1. Model fit + 24-step forecast over 7, 30 and 90 days of hourly history
//! 2. Horizon row construction from a finished forecast

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use coincast_core::domain::{PricePoint, PriceSeries};
use coincast_core::forecast::Forecaster;
use coincast_core::horizon::build_rows;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(hours: usize) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    PriceSeries::from_points((0..hours).map(|i| {
        let t = i as f64;
        let daily = (2.0 * std::f64::consts::PI * t / 24.0).sin() * 2.0;
        let drift = (t * 0.01).sin() * 10.0;
        PricePoint::new(base + Duration::hours(i as i64), 100.0 + daily + drift)
    }))
}

// ── 1. Fit ───────────────────────────────────────────────────────────

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast_fit");
    group.sample_size(20);

    for &days in &[7usize, 30, 90] {
        let series = make_series(days * 24);
        let forecaster = Forecaster::default();

        group.bench_with_input(BenchmarkId::new("hourly_days", days), &days, |b, _| {
            b.iter(|| forecaster.forecast(black_box(&series)))
        });
    }

    group.finish();
}

// ── 2. Horizon rows ──────────────────────────────────────────────────

fn bench_horizon_rows(c: &mut Criterion) {
    let series = make_series(90 * 24);
    let frame = Forecaster::default().forecast(&series).unwrap();
    let current = series.last().unwrap().price;

    c.bench_function("horizon_rows", |b| {
        b.iter(|| build_rows(black_box(frame.future()), black_box(current)))
    });
}

criterion_group!(benches, bench_forecast, bench_horizon_rows);
criterion_main!(benches);
