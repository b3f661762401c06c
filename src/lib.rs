//! Attack-surface discovery and risk scoring for a single domain.
//!
//! `core` holds the discovery pipeline and the scoring engine; `app` and
//! `ui` are the terminal front-end driven by `main`.
pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod ui;
