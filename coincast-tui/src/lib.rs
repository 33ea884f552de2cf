//! Coincast TUI — single-page terminal forecaster.
//!
//! One screen with:
//! - A symbol input line
//! - One forecast table per horizon, colored by trend
//! - xlsx export of all horizons
//! - Error overlay with the last failures

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
