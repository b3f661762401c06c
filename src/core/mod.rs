// src/core/mod.rs

/// Data structures shared by discovery, scoring and the UI: `RawAsset`,
/// `ScoredAsset`, `Severity`, `ScanResult`.
pub mod models;

/// Error type for lookups that trigger a fallback.
pub mod error;

/// Name-seeded random generators behind every simulated value.
pub mod seed;

/// Discovery pipeline: certificate-transparency enumeration, DNS
/// resolution, port inference and the `Scanner` that drives them.
pub mod scanner;

/// Per-asset scoring and batch aggregation.
pub mod risk;

/// Explanations and remediation advice for each risk factor.
pub mod knowledge_base;

pub mod export;
