// src/core/error.rs

use thiserror::Error;

/// Failures raised by a primary lookup strategy. Callers inside the core
/// consume these by switching to their deterministic fallback; only
/// `EmptyDomain` and `Io` ever reach the orchestration layer.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("source returned no usable data")]
    NoResults,

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error("DNS error: {0}")]
    Dns(String),

    #[error("target domain is empty")]
    EmptyDomain,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
