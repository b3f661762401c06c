// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::future::Future;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

use surface_scout::app::{App, AppState, ExportStatus};
use surface_scout::config::ReconConfig;
use surface_scout::core::export::export_scan;
use surface_scout::core::models::ScanResult;
use surface_scout::core::scanner::{run_full_scan, Scanner};
use surface_scout::{logging, ui};

type ScanOutcome = std::result::Result<ScanResult, String>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let config = ReconConfig::from_env();
    info!(intel = config.intel.is_enabled(), "Starting surface-scout.");
    let scanner = Scanner::new(config)?;

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new(scanner.config().intel.is_enabled());
    let (tx, mut rx) = mpsc::channel::<ScanOutcome>(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &scanner, &tx)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            match outcome {
                Ok(result) => app.finish_scan(result),
                Err(message) => app.fail_scan(message),
            }
        }

        app.on_tick();
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn handle_events(app: &mut App, scanner: &Scanner, tx: &mpsc::Sender<ScanOutcome>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            if app.show_disclaimer {
                match key.code {
                    KeyCode::Enter => app.show_disclaimer = false,
                    KeyCode::Esc | KeyCode::Char('q') => app.quit(),
                    _ => {}
                }
                return Ok(());
            }
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, scanner, tx),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning => {
                    if key.code == KeyCode::Char('q') { app.quit(); }
                }
            }
        }
    }
    Ok(())
}

/// Input while typing a target. `q` is a valid domain character, so `Esc` quits.
fn handle_idle_input(app: &mut App, key_code: KeyCode, scanner: &Scanner, tx: &mpsc::Sender<ScanOutcome>) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => { app.input.pop(); },
        KeyCode::Enter => {
            if app.input.trim().is_empty() { return; }
            app.start_scan();
            let tx_clone = tx.clone();
            let target = app.input.clone();
            let scanner = scanner.clone();

            tokio::spawn(async move {
                let outcome = settle(async move {
                    run_full_scan(&scanner, &target).await.map_err(|e| {
                        error!(target = %target, error = %e, "Scan rejected.");
                        e.to_string()
                    })
                })
                .await;
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

/// Runs a scan on its own task so a panic inside it still reaches the UI
/// as a failed scan.
async fn settle<F>(scan: F) -> ScanOutcome
where
    F: Future<Output = ScanOutcome> + Send + 'static,
{
    match tokio::spawn(scan).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Scan task aborted.");
            Err(format!("Scan aborted: {e}"))
        }
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('e') => {
            if let Some(result) = &app.scan_result {
                app.export_status = match export_scan(result, &logging::get_data_dir()) {
                    Ok(path) => ExportStatus::Success(path.display().to_string()),
                    Err(e) => ExportStatus::Error(e.to_string()),
                };
            }
        }
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Left => app.scroll_logs_left(),
        KeyCode::Right => app.scroll_logs_right(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settle_passes_outcome_through() {
        let outcome = settle(async { Err::<ScanResult, _>("EmptyDomain".to_string()) }).await;
        assert_eq!(outcome.unwrap_err(), "EmptyDomain");
    }

    async fn exploding_scan() -> ScanOutcome {
        panic!("resolver exploded")
    }

    #[tokio::test]
    async fn panicking_scan_becomes_failure() {
        let outcome = settle(exploding_scan()).await;
        let message = outcome.unwrap_err();
        assert!(message.starts_with("Scan aborted"), "{message}");
    }
}
