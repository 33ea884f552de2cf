//! Overlay widgets — last error with history, key help.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Last error on top, older ones below.
pub fn render_error(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(" Errors ({}) [any key] close ", app.error_history.len()))
        .title_style(theme::negative());

    let mut lines: Vec<Line> = Vec::new();
    if app.error_history.is_empty() {
        lines.push(Line::from(Span::styled("No errors recorded.", theme::muted())));
    }
    for (i, err) in app.error_history.iter().enumerate() {
        let style = if i == 0 {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));
        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("symbol: {}", err.context), theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let entries = [
        ("Enter", "forecast the typed symbol"),
        ("Tab", "switch between symbol and tables"),
        ("j / k", "scroll tables"),
        ("PgDn / PgUp", "scroll a page"),
        ("x", "export all horizons to {SYMBOL}_forecast.xlsx"),
        ("e", "show errors"),
        ("q / Esc", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), theme::accent_bold()),
                Span::styled(*what, theme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), popup);
}
