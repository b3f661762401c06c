// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::{App, AppState};

/// Renders the input box. A failed scan's message replaces the title.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.last_error {
        Some(err) => Line::from(format!("Target Domain - {}", err)).style(Style::default().fg(Color::Red)),
        None => Line::from("Target Domain"),
    };
    let input_block = Block::default().borders(Borders::ALL).title(title);
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    if let AppState::Idle = app.state {
        frame.set_cursor_position((
            area.x + app.input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}
