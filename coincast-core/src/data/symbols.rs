//! Ticker symbol → CoinGecko coin-id resolution.
//!
//! The listing is fetched at most once per resolver. Binaries create a single
//! resolver per process, so the map is effectively process-wide and read-only
//! after the first successful load.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, info};

use super::coingecko::{CoinListEntry, CoinListing};
use super::provider::DataError;

/// Uppercase ticker → coin id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolMap {
    ids: HashMap<String, String>,
}

impl SymbolMap {
    /// Build from listing entries. When several coins share a ticker the last
    /// entry in listing order wins.
    pub fn from_entries(entries: impl IntoIterator<Item = CoinListEntry>) -> Self {
        let mut ids = HashMap::new();
        for entry in entries {
            ids.insert(entry.symbol.to_uppercase(), entry.id);
        }
        Self { ids }
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.ids.get(&symbol.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Lazily loads and memoizes the [`SymbolMap`].
pub struct SymbolResolver {
    listing: Box<dyn CoinListing>,
    map: OnceLock<SymbolMap>,
}

impl SymbolResolver {
    pub fn new(listing: Box<dyn CoinListing>) -> Self {
        Self {
            listing,
            map: OnceLock::new(),
        }
    }

    /// Whether the listing has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.map.get().is_some()
    }

    /// The memoized map, loading it on first use. A failed load is not
    /// memoized.
    pub fn symbol_map(&self) -> Result<&SymbolMap, DataError> {
        if let Some(map) = self.map.get() {
            return Ok(map);
        }

        let entries = self.listing.list_coins()?;
        let map = SymbolMap::from_entries(entries);
        info!(coins = map.len(), "loaded CoinGecko coin listing");
        // Single-threaded use means nobody else can have filled the cell in between.
        let _ = self.map.set(map);
        self.map
            .get()
            .ok_or_else(|| DataError::Other("symbol map was not initialized".into()))
    }

    /// Resolve a ticker to its coin id. `Ok(None)` if the ticker is unknown.
    pub fn resolve(&self, symbol: &str) -> Result<Option<String>, DataError> {
        let id = self.symbol_map()?.get(symbol).map(str::to_string);
        debug!(symbol, id = id.as_deref().unwrap_or("-"), "resolved symbol");
        Ok(id)
    }
}
