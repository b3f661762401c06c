// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::core::models::{ScoredAsset, Severity};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
    text::Line,
};
use strum::IntoEnumIterator;

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Green,
    }
}

// Assets whose ports came from the intelligence payload rather than the simulator.
fn live_port_count(assets: &[ScoredAsset]) -> usize {
    assets
        .iter()
        .filter(|a| a.intelligence.as_ref().is_some_and(|i| !i.ports.is_empty()))
        .count()
}

/// Renders the summary widget: overall risk, an animated gauge, the
/// severity histogram and where port data came from. Content appears only
/// once a scan has finished.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & Rating section
            Constraint::Length(1), // Gauge chart
            Constraint::Length(1), // Spacer
            Constraint::Length(5), // Severity distribution
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Data sources
        ])
        .split(area);

    if !matches!(app.state, AppState::Finished) {
        return;
    }

    // --- Score & Rating Section ---
    let rating = Severity::from_risk(app.summary.risk_score);
    let rating_text = match rating {
        Severity::High => "High Exposure",
        Severity::Medium => "Elevated Exposure",
        Severity::Low => "Low Exposure",
    };
    let rating_style = Style::default().fg(severity_color(rating));
    let score_line = Line::from(format!("{}/100 ({})", app.summary.risk_score, rating_text)).style(rating_style);
    let domain = app.scan_result.as_ref().map(|r| r.domain.as_str()).unwrap_or_default();
    let score_text = Text::from(vec![Line::from(format!("Overall Risk - {}", domain).bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(u16::from(app.displayed_score))
        .label("")
        .style(Style::default().fg(severity_color(Severity::from_risk(app.displayed_score))));
    frame.render_widget(score_gauge, summary_chunks[1]);

    // --- Severity Distribution ---
    let dist_block = Block::default().title("SEVERITY".bold());
    let mut dist_lines: Vec<Line> = Severity::iter()
        .map(|severity| {
            Line::from(vec![
                Span::raw(format!("{:<8}", severity.to_string().to_uppercase())),
                Span::styled(
                    app.summary.distribution.count(severity).to_string(),
                    Style::default().fg(severity_color(severity)),
                ),
            ])
        })
        .collect();
    dist_lines.push(Line::from(format!("{:<8}{}", "TOTAL", app.summary.asset_count)));
    frame.render_widget(Paragraph::new(dist_lines).block(dist_block), summary_chunks[3]);

    // --- Data Sources ---
    let sources_block = Block::default().title("PORT DATA".bold());
    let with_intel = live_port_count(app.assets());
    let source_line = if app.intel_enabled {
        Line::from(format!("Live port data for {} of {} assets", with_intel, app.summary.asset_count))
    } else {
        Line::from(Span::styled("Simulated (no intelligence key)", Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(vec![source_line]).block(sources_block), summary_chunks[5]);
}
