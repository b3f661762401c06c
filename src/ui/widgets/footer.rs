// src/ui/widgets/footer.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::new().bold().fg(Color::Yellow));

    let spans = if app.show_disclaimer {
        Line::from(vec![Span::raw("Press "), key("Enter"), Span::raw(" to acknowledge.")])
    } else {
        match app.state {
            AppState::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to scan, "),
                key("Esc"),
                Span::raw(" to quit."),
            ]),
            AppState::Finished => {
                let mut spans = vec![
                    key("[N]"),
                    Span::raw("ew Scan, "),
                    key("[E]"),
                    Span::raw("xport, "),
                    key("[L]"),
                    Span::raw("ogs, "),
                    key("[Q]"),
                    Span::raw("uit"),
                ];
                match &app.export_status {
                    ExportStatus::Idle => {}
                    ExportStatus::Success(path) => {
                        spans.push(Span::styled(format!("  Saved to {}", path), Style::new().fg(Color::Green)));
                    }
                    ExportStatus::Error(e) => {
                        spans.push(Span::styled(format!("  Export failed: {}", e), Style::new().fg(Color::Red)));
                    }
                }
                Line::from(spans)
            }
            AppState::Scanning => Line::from("Scanning... Press Q to quit."),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
