// src/core/risk/aggregate.rs

use crate::core::models::{ScoredAsset, SeverityDistribution};

/// Each high-severity asset adds this much to the overall score...
pub const HIGH_SEVERITY_BONUS: usize = 4;
/// ...up to this cap.
pub const MAX_HIGH_SEVERITY_BONUS: usize = 20;

/// Reduces a batch of scored assets to an overall score and a severity
/// histogram. The overall score is the truncated mean risk plus a capped
/// bonus for high-severity assets, never above 100.
pub fn compute_overall_risk(assets: &[ScoredAsset]) -> (u8, SeverityDistribution) {
    let mut distribution = SeverityDistribution::default();
    if assets.is_empty() {
        return (0, distribution);
    }

    let mut total: usize = 0;
    for asset in assets {
        distribution.record(asset.severity);
        total += usize::from(asset.risk);
    }

    let average = total / assets.len();
    let high_bonus = (distribution.high * HIGH_SEVERITY_BONUS).min(MAX_HIGH_SEVERITY_BONUS);
    let overall = (average + high_bonus).min(100) as u8;

    (overall, distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;

    fn scored(risk: u8) -> ScoredAsset {
        ScoredAsset {
            subdomain: "x.example.com".into(),
            ip: "192.168.1.1".into(),
            ports: vec![80],
            intelligence: None,
            risk,
            severity: Severity::from_risk(risk),
            factors: Vec::new(),
        }
    }

    #[test]
    fn empty_batch() {
        assert_eq!(compute_overall_risk(&[]), (0, SeverityDistribution::default()));
    }

    #[test]
    fn one_high_one_low() {
        let (overall, dist) = compute_overall_risk(&[scored(80), scored(10)]);
        assert_eq!(overall, 49);
        assert_eq!(dist, SeverityDistribution { high: 1, medium: 0, low: 1 });
    }

    #[test]
    fn average_truncates() {
        let (overall, _) = compute_overall_risk(&[scored(10), scored(11)]);
        assert_eq!(overall, 10);
    }

    #[test]
    fn high_bonus_is_capped_and_total_clamped() {
        let batch: Vec<ScoredAsset> = (0..8).map(|_| scored(95)).collect();
        let (overall, dist) = compute_overall_risk(&batch);
        assert_eq!(dist.high, 8);
        assert_eq!(overall, 100);

        let batch: Vec<ScoredAsset> = (0..6).map(|_| scored(70)).collect();
        let (overall, _) = compute_overall_risk(&batch);
        assert_eq!(overall, 90);
    }

    #[test]
    fn distribution_sums_to_batch_size() {
        let batch: Vec<ScoredAsset> = [0, 34, 35, 69, 70, 100, 50].into_iter().map(scored).collect();
        let (_, dist) = compute_overall_risk(&batch);
        assert_eq!(dist.total(), batch.len());
        assert_eq!(dist, SeverityDistribution { high: 2, medium: 3, low: 2 });
    }
}
