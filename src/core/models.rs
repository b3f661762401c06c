// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// --- Intelligence Payload ---

// A single service banner reported by the intelligence source for one port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Third-party data about a host: open ports, OS fingerprint, known
/// vulnerability identifiers and raw service banners.
///
/// Every field defaults when the source omits it, so a partially filled
/// payload still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intelligence {
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub vulns: Vec<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub data: Vec<Banner>,
}

impl Intelligence {
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
            && self.os.as_deref().is_none_or(str::is_empty)
            && self.vulns.is_empty()
            && self.isp.is_none()
            && self.data.is_empty()
    }
}

// --- Discovery Output ---

/// One discovered subdomain with its resolved address and inferred ports,
/// before any scoring has happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawAsset {
    pub subdomain: String,
    pub ip: String,
    pub ports: Vec<u16>,
    pub intelligence: Option<Intelligence>,
}

// --- Scoring Output ---

// Coarse classification derived from a numeric risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn from_risk(risk: u8) -> Self {
        match risk {
            70.. => Severity::High,
            35..70 => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

/// One additive contribution to an asset's score. `code` keys into the
/// knowledge base; `detail` names the keyword, port, CVE or banner that
/// triggered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskFactor {
    pub code: String,
    pub points: i32,
    pub detail: Option<String>,
}

impl RiskFactor {
    pub fn new(code: &str, points: i32, detail: Option<String>) -> Self {
        Self { code: code.to_string(), points, detail }
    }
}

// The intelligence payload stays attached for in-process consumers but is
// not part of the serialized asset shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoredAsset {
    pub subdomain: String,
    pub ip: String,
    pub ports: Vec<u16>,
    #[serde(skip)]
    pub intelligence: Option<Intelligence>,
    pub risk: u8,
    pub severity: Severity,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityDistribution {
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

// --- Main Report ---

/// The complete outcome of scanning one domain. Built once by
/// `run_full_scan` and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub domain: String,
    pub assets: Vec<ScoredAsset>,
    pub risk_score: u8,
    pub severity_distribution: SeverityDistribution,
    pub scanned_at: DateTime<Utc>,
}
