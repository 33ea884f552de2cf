//! Symbol input line.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Symbol [Enter] forecast ")
        .title_style(theme::panel_title(focused));

    let mut spans = Vec::new();
    if app.input.is_empty() && !focused {
        spans.push(Span::styled("e.g. BTC, ETH, PEPE", theme::muted()));
    } else {
        spans.push(Span::styled(app.input.as_str(), theme::text()));
        if focused {
            spans.push(Span::styled("█", theme::accent()));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
