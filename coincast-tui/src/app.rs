//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. Pipeline runs are synchronous: a keypress only
//! queues the run, and the event loop performs it after drawing the status.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use coincast_core::domain::normalize_symbol;
use coincast_core::{Pipeline, PipelineError, PipelineOutput};

const MAX_ERRORS: usize = 50;

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Tables,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    CoinNotFound,
    Data,
    Forecast,
    Export,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::CoinNotFound => "COIN",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Forecast => "MODEL",
            ErrorCategory::Export => "EXPORT",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Error,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,

    /// Ticker being typed, always uppercase.
    pub input: String,
    /// Symbol queued by Enter, consumed by the event loop.
    pub pending_run: Option<String>,

    /// Result of the last successful run. Cleared on failure.
    pub output: Option<PipelineOutput>,
    pub scroll: usize,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,

    pub export_dir: PathBuf,
    pub last_export: Option<PathBuf>,
}

impl AppState {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            running: true,
            focus: Focus::Input,
            overlay: Overlay::None,
            input: String::new(),
            pending_run: None,
            output: None,
            scroll: 0,
            status_message: Some((
                "Type a symbol and press Enter to forecast".into(),
                StatusLevel::Info,
            )),
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            export_dir,
            last_export: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_alphanumeric() || c == '-' {
            self.input.push(c.to_ascii_uppercase());
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Queue a run for the typed symbol. Returns false if there is nothing to run.
    pub fn request_run(&mut self) -> bool {
        let symbol = normalize_symbol(&self.input);
        if symbol.is_empty() {
            self.set_warning("Enter a coin symbol first");
            return false;
        }
        self.set_status(format!("Fetching data for {symbol}..."));
        self.pending_run = Some(symbol);
        true
    }

    /// Run the queued symbol, if any, through `pipeline`.
    pub fn run_pending(&mut self, pipeline: &Pipeline) {
        if let Some(symbol) = self.pending_run.take() {
            info!(symbol = %symbol, "forecast requested");
            let result = pipeline.run(&symbol);
            self.apply_result(&symbol, result);
        }
    }

    /// Store a finished run. Errors clear previous tables so nothing stale
    /// can be exported.
    pub fn apply_result(&mut self, symbol: &str, result: Result<PipelineOutput, PipelineError>) {
        self.scroll = 0;
        self.last_export = None;
        match result {
            Ok(output) => {
                let rows = output.rows.len();
                if output.warnings.is_empty() {
                    self.set_status(format!(
                        "{}: {rows} horizons from {}",
                        output.symbol,
                        output.source.label()
                    ));
                } else {
                    self.set_warning(format!(
                        "{}: {rows} horizons, {} skipped (not enough data)",
                        output.symbol,
                        output.warnings.len()
                    ));
                }
                self.output = Some(output);
                self.focus = Focus::Tables;
            }
            Err(err) => {
                warn!(symbol, error = %err, "forecast failed");
                self.output = None;
                let (category, message) = if err.is_coin_not_found() {
                    (ErrorCategory::CoinNotFound, capitalize(&err.to_string()))
                } else {
                    let category = match &err {
                        PipelineError::Data(_) => ErrorCategory::Data,
                        PipelineError::Forecast(_) => ErrorCategory::Forecast,
                    };
                    (category, format!("Error occurred: {err}"))
                };
                self.push_error(category, message, symbol.to_string());
                self.overlay = Overlay::Error;
            }
        }
    }

    /// Export is offered only when the last run produced rows.
    pub fn can_export(&self) -> bool {
        self.output.as_ref().is_some_and(|o| !o.rows.is_empty())
    }

    /// Write the current rows as `{SYMBOL}_forecast.xlsx` into the export dir.
    pub fn export_xlsx(&mut self) {
        let Some(output) = self.output.as_ref().filter(|o| !o.rows.is_empty()) else {
            self.set_warning("Nothing to export yet");
            return;
        };
        let symbol = output.symbol.clone();
        let result = coincast_report::export_xlsx(&symbol, &output.rows)
            .and_then(|artifact| artifact.write_to(&self.export_dir));
        match result {
            Ok(path) => {
                self.set_status(format!("Saved {}", path.display()));
                self.last_export = Some(path);
            }
            Err(err) => {
                self.push_error(ErrorCategory::Export, format!("Export failed: {err:#}"), symbol);
            }
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERRORS {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.error_history.front()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
