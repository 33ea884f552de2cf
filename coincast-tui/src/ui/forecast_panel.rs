//! Forecast tables — one titled table per horizon, scrollable.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use coincast_core::PipelineOutput;
use coincast_report::table::{format_price, TIME_FORMAT};
use coincast_report::{display_cells, table_title, warning_text, COLUMN_LABELS};

use crate::app::{AppState, Focus};
use crate::theme;

const SEPARATOR: &str = " │ ";

/// All lines of the tables view, top to bottom.
pub fn forecast_lines(output: &PipelineOutput) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} Forecast Tables (1-24 Hours)", output.symbol),
            theme::accent_bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} | {} hourly points | last {} | current {}",
                output.source.label(),
                output.history_len,
                output.last_observed.format(TIME_FORMAT),
                format_price(output.current_price),
            ),
            theme::muted(),
        )),
    ];

    for row in &output.rows {
        let cells = display_cells(row);
        let widths: Vec<usize> = COLUMN_LABELS
            .iter()
            .zip(cells.iter())
            .map(|(label, cell)| label.chars().count().max(cell.chars().count()))
            .collect();

        let header = COLUMN_LABELS
            .iter()
            .zip(&widths)
            .map(|(label, &w)| format!("{label:<w$}"))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        let values = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect::<Vec<_>>()
            .join(SEPARATOR);

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            table_title(row.hour_offset),
            theme::neutral(),
        )));
        lines.push(Line::from(Span::styled(header, theme::muted())));
        lines.push(Line::from(Span::styled(values, theme::trend(row.trend))));
    }

    if !output.warnings.is_empty() {
        lines.push(Line::from(""));
        for warning in &output.warnings {
            lines.push(Line::from(Span::styled(
                warning_text(warning),
                theme::warning(),
            )));
        }
    }

    lines
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Tables;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Forecasts ")
        .title_style(theme::panel_title(focused));

    let Some(output) = &app.output else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No forecast yet. Enter a coin symbol above.",
            theme::muted(),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let lines = forecast_lines(output);
    let visible = block.inner(area).height as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.scroll.min(max_scroll) as u16;

    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use coincast_core::domain::DataSource;
    use coincast_core::forecast::ForecastPoint;
    use coincast_core::horizon::build_rows;
    use std::path::PathBuf;

    use crate::ui::test_support::render_to_string;

    fn output(future_len: usize) -> PipelineOutput {
        let last = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let future: Vec<ForecastPoint> = (1..=future_len)
            .map(|h| ForecastPoint {
                timestamp: last + Duration::hours(h as i64),
                yhat: 100.0 + h as f64,
                yhat_lower: 99.0,
                yhat_upper: 130.0,
            })
            .collect();
        let table = build_rows(&future, 100.0);
        PipelineOutput {
            symbol: "BTC".into(),
            source: DataSource::YahooFinance,
            current_price: 100.0,
            last_observed: last,
            history_len: 2160,
            rows: table.rows,
            warnings: table.warnings,
        }
    }

    #[test]
    fn four_lines_per_horizon_plus_heading() {
        let lines = forecast_lines(&output(24));
        assert_eq!(lines.len(), 2 + 13 * 4);
    }

    #[test]
    fn warnings_follow_tables() {
        let lines = forecast_lines(&output(10));
        // 6 tables, a blank line, 7 warnings
        assert_eq!(lines.len(), 2 + 6 * 4 + 1 + 7);
        let last: String = lines
            .last()
            .unwrap()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(last, "Not enough data for 24 hours.");
    }

    #[test]
    fn renders_first_table() {
        let mut app = AppState::new(PathBuf::from("."));
        app.output = Some(output(24));
        app.focus = Focus::Tables;
        let text = render_to_string(&app, 220, 30);
        assert!(text.contains("BTC Forecast Tables (1-24 Hours)"));
        assert!(text.contains("Forecast After 1 Hour(s)"));
        assert!(text.contains("Predicted Price (USD)"));
        assert!(text.contains("1.00%"));
        assert!(text.contains("Uptrend"));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut app = AppState::new(PathBuf::from("."));
        app.output = Some(output(24));
        app.scroll = 10_000;
        let text = render_to_string(&app, 220, 30);
        assert!(text.contains("Forecast After 24 Hour(s)"));
    }
}
