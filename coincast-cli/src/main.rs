//! Coincast CLI — hourly crypto price forecasts from the terminal.
//!
//! Commands:
//! - `predict` — fetch history, fit the model, print one table per horizon,
//!   optionally export the rows
//! - `resolve` — show the CoinGecko coin id a ticker maps to
//! - `config` — print the effective configuration as TOML

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use coincast_core::data::{CoinGeckoClient, SymbolResolver};
use coincast_core::domain::normalize_symbol;
use coincast_core::{CoincastConfig, Pipeline, PipelineError};
use coincast_report::{export, render_output, ExportFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coincast",
    about = "Coincast CLI — hourly crypto price forecasts, 1 to 24 hours ahead"
)]
struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr (info level).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a coin and print one table per horizon.
    Predict {
        /// Ticker symbol (e.g., BTC, PEPE). Case-insensitive.
        symbol: String,

        /// Write the forecast rows to a file.
        #[arg(long, default_value_t = false)]
        export: bool,

        /// Export format.
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,

        /// Directory for the exported file.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Use a synthetic price series instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Print the raw pipeline output as JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the CoinGecko coin id for a ticker.
    Resolve {
        /// Ticker symbol.
        symbol: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// User-facing text for a failed command. Unknown coins get their own
/// message; everything else is reported with its cause.
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PipelineError>() {
        Some(pipeline_err) if pipeline_err.is_coin_not_found() => format!("{pipeline_err}"),
        _ => format!("Error occurred: {err:#}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Predict {
            symbol,
            export,
            format,
            out_dir,
            synthetic,
            json,
        } => run_predict(config, &symbol, export, format.into(), &out_dir, synthetic, json),
        Commands::Resolve { symbol } => run_resolve(&config, &symbol),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CoincastConfig> {
    match path {
        Some(path) => {
            let config = CoincastConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(CoincastConfig::default()),
    }
}

fn run_predict(
    mut config: CoincastConfig,
    symbol: &str,
    export_rows: bool,
    format: ExportFormat,
    out_dir: &Path,
    synthetic: bool,
    json: bool,
) -> Result<()> {
    if synthetic {
        config.data.synthetic = true;
    }

    let pipeline = Pipeline::from_config(&config)?;
    let output = pipeline.run(symbol)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_output(&output));
    }

    if export_rows {
        if output.rows.is_empty() {
            eprintln!("No forecast rows for {}; nothing exported.", output.symbol);
        } else {
            let artifact = export(format, &output.symbol, &output.rows)?;
            let path = artifact.write_to(out_dir)?;
            println!("\nExported {} ({}) to {}", artifact.file_name, artifact.mime_type, path.display());
        }
    }

    Ok(())
}

fn run_resolve(config: &CoincastConfig, symbol: &str) -> Result<()> {
    let symbol = normalize_symbol(symbol);
    let resolver = SymbolResolver::new(Box::new(CoinGeckoClient::new(&config.sources)?));
    match resolver.resolve(&symbol)? {
        Some(id) => println!("{symbol} → {id}"),
        None => println!("{symbol} is not listed on CoinGecko"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coincast_core::data::DataError;

    #[test]
    fn cli_parses_predict_flags() {
        let cli = Cli::try_parse_from([
            "coincast", "predict", "pepe", "--export", "--format", "csv", "--out-dir", "/tmp/x",
            "--synthetic",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                symbol,
                export,
                format,
                out_dir,
                synthetic,
                json,
            } => {
                assert_eq!(symbol, "pepe");
                assert!(export && synthetic && !json);
                assert_eq!(ExportFormat::from(format), ExportFormat::Csv);
                assert_eq!(out_dir, PathBuf::from("/tmp/x"));
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn coin_not_found_has_its_own_message() {
        let err = anyhow::Error::from(PipelineError::from(DataError::CoinNotFound {
            symbol: "ZZZ".into(),
        }));
        assert_eq!(error_message(&err), "coin not found on CoinGecko: ZZZ");
    }

    #[test]
    fn other_errors_are_prefixed() {
        let err = anyhow::Error::from(PipelineError::from(DataError::NoData {
            symbol: "BTC".into(),
        }));
        assert!(error_message(&err).starts_with("Error occurred: "));
    }

    #[test]
    fn synthetic_predict_exports_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CoincastConfig::default();
        config.sources.lookback_days = 5;
        run_predict(config, "btc", true, ExportFormat::Csv, dir.path(), true, false).unwrap();
        assert!(dir.path().join("BTC_forecast.csv").exists());
    }
}
