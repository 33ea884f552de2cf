//! Integration tests for the HTTP price sources against a mock server.

use chrono::{Duration, TimeZone, Utc};
use httpmock::prelude::*;
use serde_json::json;

use coincast_core::config::SourceConfig;
use coincast_core::data::{
    CoinGeckoClient, CoinListing, DataError, PriceSource, SymbolResolver, YahooProvider,
};
use coincast_core::domain::DataSource;

fn source_config(server: &MockServer) -> SourceConfig {
    SourceConfig {
        yahoo_base_url: server.base_url(),
        coingecko_base_url: server.base_url(),
        timeout_secs: 5,
        ..SourceConfig::default()
    }
}

fn window() -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (end - Duration::days(90), end)
}

// ── Yahoo Finance ────────────────────────────────────────────────────

#[test]
fn yahoo_parses_chart_and_skips_null_closes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/BTC-USD")
            .query_param("interval", "1h");
        then.status(200).json_body(json!({
            "chart": {
                "result": [{
                    "timestamp": [1717200000, 1717203600, 1717207200],
                    "indicators": { "quote": [{ "close": [67000.5, null, 67100.25] }] }
                }],
                "error": null
            }
        }));
    });

    let yahoo = YahooProvider::new(&source_config(&server)).unwrap();
    let (start, end) = window();
    let result = yahoo.fetch_hourly("btc", start, end).unwrap();

    mock.assert();
    assert_eq!(result.source, DataSource::YahooFinance);
    assert_eq!(result.series.prices(), vec![67000.5, 67100.25]);
}

#[test]
fn yahoo_404_is_symbol_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/NOPE-USD");
        then.status(404);
    });

    let yahoo = YahooProvider::new(&source_config(&server)).unwrap();
    let (start, end) = window();
    let err = yahoo.fetch_hourly("NOPE", start, end).unwrap_err();
    assert!(matches!(err, DataError::SymbolNotFound { symbol } if symbol == "NOPE-USD"));
}

#[test]
fn yahoo_server_error_is_http_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/BTC-USD");
        then.status(503);
    });

    let yahoo = YahooProvider::new(&source_config(&server)).unwrap();
    let (start, end) = window();
    let err = yahoo.fetch_hourly("BTC", start, end).unwrap_err();
    assert!(matches!(err, DataError::HttpStatus { status: 503, .. }));
}

#[test]
fn yahoo_garbage_body_is_format_change() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/BTC-USD");
        then.status(200).body("<html>consent</html>");
    });

    let yahoo = YahooProvider::new(&source_config(&server)).unwrap();
    let (start, end) = window();
    let err = yahoo.fetch_hourly("BTC", start, end).unwrap_err();
    assert!(matches!(err, DataError::ResponseFormatChanged(_)));
}

// ── CoinGecko ────────────────────────────────────────────────────────

#[test]
fn coingecko_market_chart_sends_window_and_parses_prices() {
    let server = MockServer::start();
    let (start, end) = window();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/coins/pepe/market_chart/range")
            .query_param("vs_currency", "usd")
            .query_param("from", start.timestamp().to_string())
            .query_param("to", end.timestamp().to_string());
        then.status(200).json_body(json!({
            "prices": [[1717200000000.0, 0.0000151], [1717203600000.0, 0.0000153]],
            "market_caps": [],
            "total_volumes": []
        }));
    });

    let cg = CoinGeckoClient::new(&source_config(&server)).unwrap();
    let result = cg.fetch_hourly("pepe", start, end).unwrap();

    mock.assert();
    assert_eq!(result.source, DataSource::CoinGecko);
    assert_eq!(result.series.len(), 2);
    assert_eq!(result.series.last().unwrap().price, 0.0000153);
}

#[test]
fn coingecko_listing_parses_entries() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/list");
        then.status(200).json_body(json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" },
            { "id": "pepe", "symbol": "pepe", "name": "Pepe" }
        ]));
    });

    let cg = CoinGeckoClient::new(&source_config(&server)).unwrap();
    let coins = cg.list_coins().unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[1].id, "pepe");
}

// ── Resolver ─────────────────────────────────────────────────────────

#[test]
fn resolver_hits_listing_endpoint_once() {
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET).path("/coins/list");
        then.status(200).json_body(json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" },
            { "id": "wrapped-bitcoin", "symbol": "wbtc", "name": "Wrapped Bitcoin" },
            { "id": "dogecoin", "symbol": "doge", "name": "Dogecoin" }
        ]));
    });

    let resolver = SymbolResolver::new(Box::new(
        CoinGeckoClient::new(&source_config(&server)).unwrap(),
    ));
    assert_eq!(resolver.resolve("btc").unwrap().as_deref(), Some("bitcoin"));
    assert_eq!(resolver.resolve("DOGE").unwrap().as_deref(), Some("dogecoin"));
    assert_eq!(resolver.resolve("XYZ").unwrap(), None);

    listing.assert_hits(1);
}

#[test]
fn resolver_listing_failure_surfaces_as_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/list");
        then.status(429);
    });

    let resolver = SymbolResolver::new(Box::new(
        CoinGeckoClient::new(&source_config(&server)).unwrap(),
    ));
    assert!(matches!(
        resolver.resolve("BTC").unwrap_err(),
        DataError::HttpStatus { status: 429, .. }
    ));
    assert!(!resolver.is_loaded());
}
