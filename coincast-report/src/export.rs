//! Forecast export: xlsx workbook, CSV, and JSON artifacts.
//!
//! Every format carries the same rows in horizon order. Artifacts are built
//! in memory; writing to disk is a separate step so front ends can decide
//! where (or whether) to put them.
//!
//! - **xlsx**: one sheet named `Forecasts`, header row = column labels
//! - **CSV**: the display cells under the same header
//! - **JSON**: structured rows with raw numeric values

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use coincast_core::horizon::HorizonRow;

use crate::table::{display_cells, COLUMN_LABELS, TIME_FORMAT};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv";
pub const JSON_MIME: &str = "application/json";

pub const SHEET_NAME: &str = "Forecasts";

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("nothing to export for {symbol}: no forecast rows")]
    NoRows { symbol: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_MIME,
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Json => JSON_MIME,
        }
    }
}

/// An in-memory export, ready to download or write.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export dir: {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// `{SYMBOL}_forecast.{ext}`
pub fn file_name(symbol: &str, format: ExportFormat) -> String {
    format!("{}_forecast.{}", symbol.to_uppercase(), format.extension())
}

/// Export rows in the chosen format.
pub fn export(format: ExportFormat, symbol: &str, rows: &[HorizonRow]) -> Result<ExportArtifact> {
    match format {
        ExportFormat::Xlsx => export_xlsx(symbol, rows),
        ExportFormat::Csv => export_csv(symbol, rows),
        ExportFormat::Json => export_json(symbol, rows),
    }
}

fn ensure_rows(symbol: &str, rows: &[HorizonRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(ExportError::NoRows {
            symbol: symbol.to_uppercase(),
        }
        .into());
    }
    Ok(())
}

// ─── xlsx ───────────────────────────────────────────────────────────

/// Build the `Forecasts` workbook. Numeric columns are written as numbers;
/// time, percent, and trend as their display text.
pub fn export_xlsx(symbol: &str, rows: &[HorizonRow]) -> Result<ExportArtifact> {
    ensure_rows(symbol, rows)?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, label) in COLUMN_LABELS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *label, &header_format)?;
        worksheet.set_column_width(col, label.len().max(12) as f64)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let cells = display_cells(row);
        worksheet.write_number(r, 0, row.hour_offset as f64)?;
        worksheet.write_string(r, 1, row.predicted_timestamp.format(TIME_FORMAT).to_string())?;
        worksheet.write_number(r, 2, row.current_price)?;
        worksheet.write_number(r, 3, row.predicted_price)?;
        worksheet.write_number(r, 4, row.lower_bound)?;
        worksheet.write_number(r, 5, row.upper_bound)?;
        worksheet.write_number(r, 6, row.absolute_change)?;
        worksheet.write_string(r, 7, &cells[7])?;
        worksheet.write_string(r, 8, &cells[8])?;
    }

    let bytes = workbook
        .save_to_buffer()
        .context("failed to serialize xlsx workbook")?;

    Ok(ExportArtifact {
        file_name: file_name(symbol, ExportFormat::Xlsx),
        mime_type: XLSX_MIME,
        bytes,
    })
}

// ─── CSV ────────────────────────────────────────────────────────────

pub fn export_csv(symbol: &str, rows: &[HorizonRow]) -> Result<ExportArtifact> {
    ensure_rows(symbol, rows)?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(COLUMN_LABELS)?;
    for row in rows {
        wtr.write_record(display_cells(row))?;
    }
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;

    Ok(ExportArtifact {
        file_name: file_name(symbol, ExportFormat::Csv),
        mime_type: CSV_MIME,
        bytes,
    })
}

// ─── JSON ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonExport<'a> {
    symbol: String,
    rows: &'a [HorizonRow],
}

pub fn export_json(symbol: &str, rows: &[HorizonRow]) -> Result<ExportArtifact> {
    ensure_rows(symbol, rows)?;

    let doc = JsonExport {
        symbol: symbol.to_uppercase(),
        rows,
    };
    let bytes = serde_json::to_vec_pretty(&doc).context("failed to serialize forecast rows to JSON")?;

    Ok(ExportArtifact {
        file_name: file_name(symbol, ExportFormat::Json),
        mime_type: JSON_MIME,
        bytes,
    })
}
