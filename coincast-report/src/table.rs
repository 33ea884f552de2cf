//! Display model for horizon rows: column labels, cell text, and the plain
//! text table printed per horizon.

use coincast_core::horizon::{HorizonRow, HorizonWarning};
use coincast_core::PipelineOutput;

/// Column headers, in display and export order.
pub const COLUMN_LABELS: [&str; 9] = [
    "Hour Ahead",
    "Predicted Time",
    "Current Price (USD)",
    "Predicted Price (USD)",
    "Lower Prediction (Min Expected Price)",
    "Upper Prediction (Max Expected Price)",
    "Change (USD)",
    "Change (%)",
    "Trend",
];

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Heading shown above each horizon's table.
pub fn table_title(hour_offset: usize) -> String {
    format!("Forecast After {hour_offset} Hour(s)")
}

pub fn format_price(value: f64) -> String {
    format!("{value:.5}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Cell text for one row, aligned with [`COLUMN_LABELS`].
pub fn display_cells(row: &HorizonRow) -> [String; 9] {
    [
        row.hour_offset.to_string(),
        row.predicted_timestamp.format(TIME_FORMAT).to_string(),
        format_price(row.current_price),
        format_price(row.predicted_price),
        format_price(row.lower_bound),
        format_price(row.upper_bound),
        format_price(row.absolute_change),
        format_percent(row.percent_change),
        row.trend.label().to_string(),
    ]
}

/// Render one horizon as a titled two-line table with aligned columns.
pub fn render_table(row: &HorizonRow) -> String {
    let cells = display_cells(row);
    let widths: Vec<usize> = COLUMN_LABELS
        .iter()
        .zip(cells.iter())
        .map(|(label, cell)| label.len().max(cell.len()))
        .collect();

    let header: Vec<String> = COLUMN_LABELS
        .iter()
        .zip(&widths)
        .map(|(label, &w)| format!("{label:<w$}"))
        .collect();
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let values: Vec<String> = cells
        .iter()
        .zip(&widths)
        .map(|(cell, &w)| format!("{cell:>w$}"))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("### {}\n", table_title(row.hour_offset)));
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    out.push_str(&values.join(" | "));
    out.push('\n');
    out
}

/// Notice shown in place of a horizon the forecast did not reach.
pub fn warning_text(warning: &HorizonWarning) -> String {
    format!("Not enough data for {} hours.", warning.hour_offset)
}

/// Full text report for one pipeline run: heading, one table per horizon,
/// then any skipped-horizon notices.
pub fn render_output(output: &PipelineOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("## {} Forecast Tables (1-24 Hours)\n", output.symbol));
    out.push_str(&format!(
        "Source: {} | {} hourly points | last observed {} | current price {}\n",
        output.source.label(),
        output.history_len,
        output.last_observed.format(TIME_FORMAT),
        format_price(output.current_price),
    ));
    for row in &output.rows {
        out.push('\n');
        out.push_str(&render_table(row));
    }
    if !output.warnings.is_empty() {
        out.push('\n');
        for warning in &output.warnings {
            out.push_str(&format!("warning: {}\n", warning_text(warning)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use coincast_core::domain::DataSource;
    use coincast_core::horizon::Trend;

    fn sample_row() -> HorizonRow {
        HorizonRow {
            hour_offset: 4,
            predicted_timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            current_price: 100.0,
            predicted_price: 105.0,
            lower_bound: 101.5,
            upper_bound: 108.25,
            absolute_change: 5.0,
            percent_change: 5.0,
            trend: Trend::Uptrend,
        }
    }

    #[test]
    fn cells_follow_display_rules() {
        let cells = display_cells(&sample_row());
        assert_eq!(cells[0], "4");
        assert_eq!(cells[1], "2024-05-01 16:00");
        assert_eq!(cells[2], "100.00000");
        assert_eq!(cells[3], "105.00000");
        assert_eq!(cells[7], "5.00%");
        assert_eq!(cells[8], "Uptrend");
    }

    #[test]
    fn negative_percent_keeps_sign() {
        assert_eq!(format_percent(-0.5), "-0.50%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn rendered_table_has_title_and_all_columns() {
        let text = render_table(&sample_row());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "### Forecast After 4 Hour(s)");
        for label in COLUMN_LABELS {
            assert!(lines[1].contains(label), "missing {label}");
        }
        assert!(lines[3].contains("Uptrend"));
        assert!(lines[3].contains("5.00%"));
    }

    #[test]
    fn output_report_lists_tables_then_warnings() {
        let row = sample_row();
        let output = PipelineOutput {
            symbol: "PEPE".into(),
            source: DataSource::CoinGecko,
            current_price: 100.0,
            last_observed: row.predicted_timestamp - chrono::Duration::hours(4),
            history_len: 2160,
            rows: vec![row],
            warnings: vec![HorizonWarning {
                hour_offset: 24,
                available: 10,
            }],
        };
        let text = render_output(&output);
        assert!(text.starts_with("## PEPE Forecast Tables (1-24 Hours)\n"));
        assert!(text.contains("Source: CoinGecko | 2160 hourly points"));
        assert!(text.contains("### Forecast After 4 Hour(s)"));
        assert!(text.trim_end().ends_with("warning: Not enough data for 24 hours."));
    }

    proptest::proptest! {
        #[test]
        fn percent_cell_has_two_decimals(pct in -1000.0f64..1000.0) {
            let cell = format_percent(pct);
            proptest::prop_assert!(cell.ends_with('%'));
            let digits = cell.trim_end_matches('%');
            let decimals = digits.split('.').nth(1).map(str::len);
            proptest::prop_assert_eq!(decimals, Some(2));
        }
    }

    #[test]
    fn columns_line_up() {
        let text = render_table(&sample_row());
        let lines: Vec<&str> = text.lines().collect();
        let header_bars: Vec<usize> = lines[1].match_indices(" | ").map(|(i, _)| i).collect();
        let value_bars: Vec<usize> = lines[3].match_indices(" | ").map(|(i, _)| i).collect();
        assert_eq!(header_bars, value_bars);
    }
}
