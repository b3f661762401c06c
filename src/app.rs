// src/app.rs

use crate::core::models::{ScanResult, ScoredAsset, SeverityDistribution};
use ratatui::widgets::{ListState, ScrollbarState};

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const LOG_TAIL_LINES: usize = 200;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub risk_score: u8,
    pub asset_count: usize,
    pub distribution: SeverityDistribution,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub show_disclaimer: bool,
    pub show_logs: bool,
    pub intel_enabled: bool,
    pub scan_result: Option<ScanResult>,
    pub last_error: Option<String>,
    pub summary: ScanSummary,
    pub displayed_score: u8,
    pub spinner_frame: usize,
    pub asset_list_state: ListState,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    pub export_status: ExportStatus,
}

impl App {
    pub fn new(intel_enabled: bool) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            show_disclaimer: true,
            show_logs: false,
            intel_enabled,
            scan_result: None,
            last_error: None,
            summary: ScanSummary::default(),
            displayed_score: 0,
            spinner_frame: 0,
            asset_list_state: ListState::default(),
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            export_status: ExportStatus::Idle,
        }
    }

    pub fn assets(&self) -> &[ScoredAsset] {
        self.scan_result.as_ref().map(|r| r.assets.as_slice()).unwrap_or_default()
    }

    pub fn selected_asset(&self) -> Option<&ScoredAsset> {
        self.asset_list_state.selected().and_then(|i| self.assets().get(i))
    }

    pub fn start_scan(&mut self) {
        self.state = AppState::Scanning;
        self.last_error = None;
        self.spinner_frame = 0;
    }

    /// Stores a completed scan and selects its first asset.
    pub fn finish_scan(&mut self, result: ScanResult) {
        self.summary = ScanSummary {
            risk_score: result.risk_score,
            asset_count: result.assets.len(),
            distribution: result.severity_distribution,
        };
        self.asset_list_state = ListState::default();
        if !result.assets.is_empty() {
            self.asset_list_state.select(Some(0));
        }
        self.displayed_score = 0;
        self.scan_result = Some(result);
        self.state = AppState::Finished;
    }

    pub fn fail_scan(&mut self, message: String) {
        self.last_error = Some(message);
        self.state = AppState::Idle;
    }

    pub fn select_previous(&mut self) {
        let len = self.assets().len();
        if len == 0 {
            return;
        }
        let i = match self.asset_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.asset_list_state.select(Some(i));
    }

    pub fn select_next(&mut self) {
        let len = self.assets().len();
        if len == 0 {
            return;
        }
        let i = match self.asset_list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.asset_list_state.select(Some(i));
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn refresh_logs(&mut self) {
        self.log_content = crate::logging::tail_log(LOG_TAIL_LINES);
    }

    /// Advances the spinner, eases the gauge toward the final score and
    /// keeps the log panel current.
    pub fn on_tick(&mut self) {
        if matches!(self.state, AppState::Scanning) {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
        if self.displayed_score < self.summary.risk_score {
            self.displayed_score = (self.displayed_score + 2).min(self.summary.risk_score);
        }
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.scan_result = None;
        self.last_error = None;
        self.summary = ScanSummary::default();
        self.displayed_score = 0;
        self.asset_list_state = ListState::default();
        self.export_status = ExportStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{RawAsset, ScanResult};
    use crate::core::risk::run_risk_engine;
    use chrono::Utc;

    fn result() -> ScanResult {
        let raw = vec![
            RawAsset { subdomain: "admin.example.com".into(), ip: "192.168.1.1".into(), ports: vec![22, 3306], intelligence: None },
            RawAsset { subdomain: "www.example.com".into(), ip: "192.168.1.2".into(), ports: vec![443], intelligence: None },
        ];
        let (assets, risk_score, severity_distribution) = run_risk_engine(raw);
        ScanResult { domain: "example.com".into(), assets, risk_score, severity_distribution, scanned_at: Utc::now() }
    }

    #[test]
    fn finishing_a_scan_selects_first_asset() {
        let mut app = App::new(false);
        app.start_scan();
        app.finish_scan(result());
        assert!(matches!(app.state, AppState::Finished));
        assert_eq!(app.summary.asset_count, 2);
        assert_eq!(app.selected_asset().map(|a| a.subdomain.as_str()), Some("admin.example.com"));
    }

    #[test]
    fn selection_wraps() {
        let mut app = App::new(false);
        app.finish_scan(result());
        app.select_previous();
        assert_eq!(app.asset_list_state.selected(), Some(1));
        app.select_next();
        assert_eq!(app.asset_list_state.selected(), Some(0));
    }

    #[test]
    fn gauge_eases_toward_score() {
        let mut app = App::new(false);
        app.finish_scan(result());
        let target = app.summary.risk_score;
        for _ in 0..100 {
            app.on_tick();
        }
        assert_eq!(app.displayed_score, target);
    }

    #[test]
    fn failure_returns_to_idle_with_message() {
        let mut app = App::new(false);
        app.start_scan();
        app.fail_scan("target domain is empty".into());
        assert!(matches!(app.state, AppState::Idle));
        assert_eq!(app.last_error.as_deref(), Some("target domain is empty"));
    }
}
