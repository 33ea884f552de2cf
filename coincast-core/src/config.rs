//! Serializable configuration for a Coincast session.
//!
//! Stored as TOML. Every field has a default, so an empty file (or no file at
//! all) yields the stock behavior: Yahoo Finance first, CoinGecko second,
//! 90 days of hourly history, 24 hourly forecast steps.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoincastConfig {
    pub sources: SourceConfig,
    pub forecast: ForecastConfig,
    pub data: DataConfig,
}

/// Endpoints and HTTP settings for the price sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub yahoo_base_url: String,
    pub coingecko_base_url: String,
    pub timeout_secs: u64,
    /// Trailing window of hourly history to request.
    pub lookback_days: i64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.into(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.into(),
            timeout_secs: 30,
            lookback_days: 90,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

/// Forecaster defaults. These are fixed model defaults, not a tuning surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of hourly steps forecast past the last observation.
    pub periods: usize,
    /// Width of the uncertainty band (0.8 = 80% interval).
    pub interval_width: f64,
    pub n_changepoints: usize,
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: 24,
            interval_width: 0.8,
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
        }
    }
}

/// Data source selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Skip the network and generate a synthetic series.
    pub synthetic: bool,
    pub synthetic_seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            synthetic: false,
            synthetic_seed: 42,
        }
    }
}

impl CoincastConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.lookback_days <= 0 {
            return Err(ConfigError::Invalid("sources.lookback_days must be positive".into()));
        }
        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::Invalid("sources.timeout_secs must be positive".into()));
        }
        if self.forecast.periods == 0 {
            return Err(ConfigError::Invalid("forecast.periods must be positive".into()));
        }
        if !(self.forecast.interval_width > 0.0 && self.forecast.interval_width < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "forecast.interval_width must be in (0, 1), got {}",
                self.forecast.interval_width
            )));
        }
        if !(self.forecast.changepoint_range > 0.0 && self.forecast.changepoint_range <= 1.0) {
            return Err(ConfigError::Invalid(
                "forecast.changepoint_range must be in (0, 1]".into(),
            ));
        }
        if self.forecast.changepoint_prior_scale <= 0.0
            || self.forecast.seasonality_prior_scale <= 0.0
        {
            return Err(ConfigError::Invalid("prior scales must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = CoincastConfig::from_toml("").unwrap();
        assert_eq!(config, CoincastConfig::default());
        assert_eq!(config.sources.lookback_days, 90);
        assert_eq!(config.forecast.periods, 24);
    }

    #[test]
    fn partial_override() {
        let config = CoincastConfig::from_toml(
            r#"
            [sources]
            coingecko_base_url = "http://localhost:9999"

            [forecast]
            interval_width = 0.95
            "#,
        )
        .unwrap();
        assert_eq!(config.sources.coingecko_base_url, "http://localhost:9999");
        assert_eq!(config.sources.yahoo_base_url, DEFAULT_YAHOO_BASE_URL);
        assert_eq!(config.forecast.interval_width, 0.95);
        assert_eq!(config.forecast.periods, 24);
    }

    #[test]
    fn rejects_bad_interval_width() {
        let err = CoincastConfig::from_toml("[forecast]\ninterval_width = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unparseable_toml() {
        let err = CoincastConfig::from_toml("[sources\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = CoincastConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CoincastConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = CoincastConfig::from_file(Path::new("/nonexistent/coincast.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coincast.toml");
        std::fs::write(&path, "[data]\nsynthetic = true\nsynthetic_seed = 7\n").unwrap();
        let config = CoincastConfig::from_file(&path).unwrap();
        assert!(config.data.synthetic);
        assert_eq!(config.data.synthetic_seed, 7);
    }
}
