// src/ui/widgets/mod.rs

pub mod asset_view;       // Asset list and per-asset risk breakdown.
pub mod disclaimer_popup; // Usage disclaimer shown on launch.
pub mod footer;           // Key hints and export status.
pub mod input;            // Target domain field.
pub mod log_view;         // Tail of the log file.
pub mod summary;          // Overall risk and severity histogram.
