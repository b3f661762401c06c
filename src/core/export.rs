// src/core/export.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::ReconError;
use crate::core::models::ScanResult;

/// Writes `result` as pretty JSON to `<dir>/scans/<domain>-<timestamp>.json`
/// and returns the path written.
pub fn export_scan(result: &ScanResult, dir: &Path) -> Result<PathBuf, ReconError> {
    let scans_dir = dir.join("scans");
    fs::create_dir_all(&scans_dir)?;

    let file_name = format!(
        "{}-{}.json",
        result.domain.replace(['/', '\\', ':'], "_"),
        result.scanned_at.format("%Y%m%dT%H%M%SZ")
    );
    let path = scans_dir.join(file_name);

    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json)?;

    info!(path = %path.display(), "Exported scan result.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Severity, ScoredAsset, SeverityDistribution};
    use chrono::{TimeZone, Utc};

    #[test]
    fn writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScanResult {
            domain: "example.com".into(),
            assets: vec![ScoredAsset {
                subdomain: "www.example.com".into(),
                ip: "192.168.10.20".into(),
                ports: vec![443],
                intelligence: None,
                risk: 10,
                severity: Severity::Low,
                factors: Vec::new(),
            }],
            risk_score: 10,
            severity_distribution: SeverityDistribution { high: 0, medium: 0, low: 1 },
            scanned_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let path = export_scan(&result, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "example.com-20260102T030405Z.json");

        let back: ScanResult = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.domain, "example.com");
        assert_eq!(back.risk_score, 10);
        assert_eq!(back.assets[0].severity, Severity::Low);
    }
}
