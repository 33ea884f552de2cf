//! Price sources, symbol resolution, and the fallback fetcher

pub mod coingecko;
pub mod fetcher;
pub mod provider;
pub mod symbols;
pub mod synthetic;
pub mod yahoo;

pub use coingecko::{CoinGeckoClient, CoinListEntry, CoinListing};
pub use fetcher::{Fallback, MarketDataFetcher};
pub use provider::{DataError, FetchResult, PriceSource};
pub use symbols::{SymbolMap, SymbolResolver};
pub use synthetic::SyntheticSource;
pub use yahoo::YahooProvider;
