// src/ui/widgets/asset_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::knowledge_base;
use crate::core::models::ScoredAsset;
use crate::ui::widgets::summary::severity_color;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    text::Line,
};

pub fn render_asset_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Assets (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new("Discovered assets will appear here...")
                .alignment(Alignment::Center),
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                Paragraph::new(
                    Line::from(vec![
                        Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                        Span::raw("Discovering assets... Please wait."),
                    ])
                ).alignment(Alignment::Center)
            },
            AppState::Finished => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let items: Vec<ListItem> = app.assets().iter().map(|asset| {
        let color = severity_color(asset.severity);
        ListItem::new(Line::from(vec![
            Span::styled(format!("[{:>3}] ", asset.risk), Style::default().fg(color).bold()),
            Span::styled(format!("{:<7}", asset.severity.to_string().to_uppercase()), Style::default().fg(color)),
            Span::raw(asset.subdomain.clone()),
            Span::styled(format!("  {}", asset.ip), Style::default().fg(Color::DarkGray)),
        ]))
    }).collect();

    if items.is_empty() {
        let p = Paragraph::new("No assets were discovered.").alignment(Alignment::Center);
        frame.render_widget(p, inner_area);
        return;
    }

    let asset_list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(asset_list, chunks[0], &mut app.asset_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Risk Breakdown");
    let text = match app.selected_asset() {
        Some(asset) => breakdown_lines(asset),
        None => vec![Line::from("Select an asset above to see its risk breakdown.")],
    };
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
    frame.render_widget(p, chunks[1]);
}

// Ports, one line per factor, then remediation for the costliest factor.
fn breakdown_lines(asset: &ScoredAsset) -> Vec<Line<'static>> {
    let ports = asset.ports.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
    let mut lines = vec![
        Line::from(vec!["PORTS: ".yellow().bold(), Span::raw(ports)]),
        Line::from(""),
    ];

    for factor in &asset.factors {
        let title = knowledge_base::get_factor_detail(&factor.code)
            .map(|d| d.title)
            .unwrap_or("Unknown Factor");
        let points_style = if factor.points < 0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        let mut spans = vec![
            Span::styled(format!("{:>+4} ", factor.points), points_style),
            Span::raw(title),
        ];
        if let Some(detail) = &factor.detail {
            spans.push(Span::styled(format!(" ({})", detail), Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    let worst = asset
        .factors
        .iter()
        .filter(|f| f.code != "BASELINE_EXPOSURE")
        .max_by_key(|f| f.points)
        .and_then(|f| knowledge_base::get_factor_detail(&f.code));
    if let Some(detail) = worst {
        lines.push(Line::from(""));
        lines.push(Line::from("WHAT IT IS:".yellow().bold()));
        lines.push(Line::from(detail.description));
        lines.push(Line::from(""));
        lines.push(Line::from("HOW TO FIX:".yellow().bold()));
        lines.push(Line::from(detail.remediation));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RawAsset;
    use crate::core::risk::score_asset;

    #[test]
    fn breakdown_lists_every_factor_and_advice() {
        let asset = score_asset(RawAsset {
            subdomain: "admin.example.com".into(),
            ip: "192.168.1.1".into(),
            ports: vec![22, 3306],
            intelligence: None,
        });
        let lines = breakdown_lines(&asset);
        // ports, blank, one line per factor, then six lines of advice
        assert_eq!(lines.len(), 2 + asset.factors.len() + 6);
    }
}
