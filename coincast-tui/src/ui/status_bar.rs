//! Bottom status bar — key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme;

pub fn hints(app: &AppState) -> &'static str {
    match app.focus {
        Focus::Input => " Enter:run Tab:tables Esc:back",
        Focus::Tables if app.can_export() => " j/k:scroll x:export i:edit e:errors ?:help q:quit",
        Focus::Tables => " j/k:scroll i:edit e:errors ?:help q:quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![Span::styled(hints(app), theme::muted()), Span::raw(" | ")];

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
