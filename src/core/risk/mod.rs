// src/core/risk/mod.rs

pub mod aggregate;
pub mod scoring;

use tracing::info;

use crate::core::models::{RawAsset, ScoredAsset, SeverityDistribution};

pub use self::aggregate::compute_overall_risk;
pub use self::scoring::score_asset;

/// Scores every asset and aggregates the batch. Returns the scored assets
/// in input order, the overall risk score and the severity histogram.
pub fn run_risk_engine(assets: Vec<RawAsset>) -> (Vec<ScoredAsset>, u8, SeverityDistribution) {
    let scored: Vec<ScoredAsset> = assets.into_iter().map(score_asset).collect();
    let (risk_score, distribution) = compute_overall_risk(&scored);
    info!(risk_score, dist = ?distribution, "Risk engine complete.");
    (scored, risk_score, distribution)
}
