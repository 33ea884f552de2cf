//! Coincast Report — display tables and exports for forecast rows.
//!
//! This crate builds on `coincast-core` to provide:
//! - The fixed column labels and per-cell display formatting
//! - Plain-text tables, one per horizon
//! - xlsx (single `Forecasts` sheet), CSV and JSON artifacts

pub mod export;
pub mod table;

pub use export::{
    export, export_csv, export_json, export_xlsx, file_name, ExportArtifact, ExportError,
    ExportFormat, XLSX_MIME,
};
pub use table::{
    display_cells, render_output, render_table, table_title, warning_text, COLUMN_LABELS,
};
