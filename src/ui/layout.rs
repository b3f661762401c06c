// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// Each `Rect` is one widget area, computed once per frame.
pub struct AppLayout {
    pub input: Rect,
    pub assets: Rect,
    pub summary: Rect,
    pub footer: Rect,
    pub log_panel: Rect,
}

/// Splits the frame into input bar, content row and footer. The content
/// row holds the asset list and the summary side by side, plus the log
/// panel when it is visible.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_constraints = if show_logs {
        vec![Constraint::Percentage(40), Constraint::Percentage(25), Constraint::Percentage(35)]
    } else {
        vec![Constraint::Percentage(62), Constraint::Percentage(38)]
    };

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints)
        .split(main_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        assets: content_chunks[0],
        summary: content_chunks[1],
        log_panel: if show_logs { content_chunks[2] } else { Rect::default() },
        footer: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_panel_only_when_visible() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(create_layout(area, false).log_panel, Rect::default());
        let with_logs = create_layout(area, true);
        assert!(with_logs.log_panel.width > 0);
        assert_eq!(with_logs.input.height, 3);
        assert_eq!(with_logs.footer.height, 1);
    }
}
