//! Domain types for Coincast

pub mod price;

pub use price::{DataSource, PricePoint, PriceSeries};

/// Ticker symbol type alias (always uppercase once normalized).
pub type Symbol = String;

/// Normalize user input into a ticker symbol: trimmed and uppercased.
pub fn normalize_symbol(input: &str) -> Symbol {
    input.trim().to_uppercase()
}
