// src/core/risk/scoring.rs

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::{Intelligence, RawAsset, RiskFactor, ScoredAsset, Severity};

pub const BASELINE_RISK: i32 = 15;
pub const KEYWORD_RISK: i32 = 25;
pub const RISKY_PORT_RISK: i32 = 15;
pub const MILD_PORT_RISK: i32 = 5;
pub const VULN_RISK: i32 = 12;
pub const EOL_OS_RISK: i32 = 30;
pub const LINUX_OS_RISK: i32 = 5;
pub const BANNER_SIGNATURE_RISK: i32 = 35;
pub const WEB_ONLY_DISCOUNT: i32 = -5;

/// Terms in a leftmost label that suggest an administrative, staging or
/// forgotten host.
pub const HIGH_RISK_KEYWORDS: &[&str] = &[
    "admin", "test", "dev", "staging", "debug", "internal", "backup", "old", "demo", "vpn",
    "remote", "secret", "legacy", "temp", "jenkins", "git", "gitlab", "jira", "confluence",
];

pub const RISKY_PORTS: &[u16] = &[22, 21, 23, 3306, 5432, 6379, 27017, 8080, 3389, 8443];
pub const MILD_RISK_PORTS: &[u16] = &[25, 110, 143, 9200, 8888];

const EOL_OS_MARKERS: &[&str] = &["2008", "2003", "xp", "windows 7", "windows 8"];

static RE_BANNER_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)thinkphp|magento|log4j|eternalblue").unwrap());

/// Scores one asset. Pure: the result depends only on `asset`.
///
/// The score is the clamped sum of the returned factors, so callers can
/// always explain a score by listing `factors`.
pub fn score_asset(asset: RawAsset) -> ScoredAsset {
    let mut factors = vec![RiskFactor::new("BASELINE_EXPOSURE", BASELINE_RISK, None)];

    if let Some(keyword) = matched_keyword(&asset.subdomain) {
        factors.push(RiskFactor::new("SENSITIVE_NAME", KEYWORD_RISK, Some(keyword.to_string())));
    }

    let ports: BTreeSet<u16> = asset.ports.iter().copied().collect();
    for port in &ports {
        if RISKY_PORTS.contains(port) {
            factors.push(RiskFactor::new("RISKY_PORT", RISKY_PORT_RISK, Some(port.to_string())));
        } else if MILD_RISK_PORTS.contains(port) {
            factors.push(RiskFactor::new("MILD_RISK_PORT", MILD_PORT_RISK, Some(port.to_string())));
        }
    }

    if let Some(intel) = asset.intelligence.as_ref().filter(|i| !i.is_empty()) {
        intelligence_factors(intel, &mut factors);
    }

    if is_web_only(&ports) {
        factors.push(RiskFactor::new("WEB_ONLY_EXPOSURE", WEB_ONLY_DISCOUNT, None));
    }

    let total: i32 = factors.iter().map(|f| f.points).sum();
    let risk = total.clamp(0, 100) as u8;

    ScoredAsset {
        subdomain: asset.subdomain,
        ip: asset.ip,
        ports: asset.ports,
        intelligence: asset.intelligence,
        risk,
        severity: Severity::from_risk(risk),
        factors,
    }
}

// First keyword found in the leftmost label; at most one bonus applies.
fn matched_keyword(subdomain: &str) -> Option<&'static str> {
    let label = subdomain.split('.').next().unwrap_or_default().to_lowercase();
    HIGH_RISK_KEYWORDS.iter().copied().find(|k| label.contains(k))
}

fn intelligence_factors(intel: &Intelligence, factors: &mut Vec<RiskFactor>) {
    for vuln in &intel.vulns {
        factors.push(RiskFactor::new("KNOWN_VULNERABILITY", VULN_RISK, Some(vuln.clone())));
    }

    // EOL takes precedence; a string matching both only earns the EOL bonus.
    if let Some(os) = intel.os.as_deref().filter(|os| !os.is_empty()) {
        let os_lower = os.to_lowercase();
        if EOL_OS_MARKERS.iter().any(|m| os_lower.contains(m)) {
            factors.push(RiskFactor::new("EOL_OPERATING_SYSTEM", EOL_OS_RISK, Some(os.to_string())));
        } else if os_lower.contains("linux") {
            factors.push(RiskFactor::new("LINUX_DETECTED", LINUX_OS_RISK, Some(os.to_string())));
        }
    }

    for banner in &intel.data {
        if let Some(signature) = RE_BANNER_SIGNATURE.find(&banner.data) {
            let detail = match banner.port {
                Some(port) => format!("{} on port {}", signature.as_str().to_lowercase(), port),
                None => signature.as_str().to_lowercase(),
            };
            factors.push(RiskFactor::new("EXPLOITABLE_BANNER", BANNER_SIGNATURE_RISK, Some(detail)));
        }
    }
}

fn is_web_only(ports: &BTreeSet<u16>) -> bool {
    let web: Vec<u16> = ports.iter().copied().collect();
    web == [443] || web == [80, 443]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Banner;

    fn asset(subdomain: &str, ports: &[u16], intelligence: Option<Intelligence>) -> RawAsset {
        RawAsset {
            subdomain: subdomain.to_string(),
            ip: "192.168.1.1".to_string(),
            ports: ports.to_vec(),
            intelligence,
        }
    }

    #[test]
    fn admin_with_database_ports_is_high() {
        let scored = score_asset(asset("admin.example.com", &[22, 3306], None));
        assert_eq!(scored.risk, 70);
        assert_eq!(scored.severity, Severity::High);
    }

    #[test]
    fn plain_https_site_is_low() {
        let scored = score_asset(asset("www.example.com", &[443], None));
        assert_eq!(scored.risk, 10);
        assert_eq!(scored.severity, Severity::Low);
    }

    #[test]
    fn eol_windows_with_vuln_is_medium() {
        let intel = Intelligence {
            os: Some("Windows 2008".into()),
            vulns: vec!["CVE-1".into()],
            ..Default::default()
        };
        let scored = score_asset(asset("api.example.com", &[443, 80], Some(intel)));
        assert_eq!(scored.risk, 52);
        assert_eq!(scored.severity, Severity::Medium);
        assert!(scored.intelligence.is_some());
    }

    #[test]
    fn keyword_bonus_applies_once() {
        // "devadmintest" holds three keywords.
        let scored = score_asset(asset("devadmintest.example.com", &[80], None));
        assert_eq!(scored.risk, (BASELINE_RISK + KEYWORD_RISK) as u8);
        assert_eq!(scored.factors.iter().filter(|f| f.code == "SENSITIVE_NAME").count(), 1);
    }

    #[test]
    fn keyword_only_checked_in_leftmost_label() {
        let scored = score_asset(asset("www.admin.example.com", &[80], None));
        assert_eq!(scored.risk, BASELINE_RISK as u8);
    }

    #[test]
    fn mild_ports_add_five_each() {
        let scored = score_asset(asset("mail.example.com", &[25, 110, 143], None));
        assert_eq!(scored.risk, 15 + 15);
    }

    #[test]
    fn eol_marker_beats_linux() {
        let intel = Intelligence { os: Some("Linux XP edition".into()), ..Default::default() };
        let scored = score_asset(asset("app.example.com", &[80], Some(intel)));
        assert_eq!(scored.risk, 15 + 30);

        let intel = Intelligence { os: Some("Ubuntu LINUX".into()), ..Default::default() };
        let scored = score_asset(asset("app.example.com", &[80], Some(intel)));
        assert_eq!(scored.risk, 15 + 5);
    }

    #[test]
    fn every_matching_banner_counts() {
        let intel = Intelligence {
            data: vec![
                Banner { data: "X-Powered-By: ThinkPHP".into(), port: Some(80) },
                Banner { data: "Magento/2.3".into(), port: Some(8080) },
                Banner { data: "nginx".into(), port: Some(443) },
            ],
            ..Default::default()
        };
        let scored = score_asset(asset("shop.example.com", &[80], Some(intel)));
        assert_eq!(scored.risk, 15 + 35 + 35);
    }

    #[test]
    fn empty_intelligence_is_ignored() {
        let with_empty = score_asset(asset("cdn.example.com", &[443], Some(Intelligence::default())));
        let without = score_asset(asset("cdn.example.com", &[443], None));
        assert_eq!(with_empty.risk, without.risk);
    }

    #[test]
    fn score_is_clamped_to_hundred() {
        let intel = Intelligence {
            vulns: (0..10).map(|i| format!("CVE-{i}")).collect(),
            ..Default::default()
        };
        let scored = score_asset(asset("admin.example.com", RISKY_PORTS, Some(intel)));
        assert_eq!(scored.risk, 100);
        assert_eq!(scored.severity, Severity::High);
    }

    #[test]
    fn web_only_discount_requires_exact_set() {
        assert_eq!(score_asset(asset("a.example.com", &[80, 443], None)).risk, 10);
        assert_eq!(score_asset(asset("a.example.com", &[80], None)).risk, 15);
        assert_eq!(score_asset(asset("a.example.com", &[443, 8443], None)).risk, 30);
    }

    #[test]
    fn factors_explain_the_score() {
        let scored = score_asset(asset("jenkins.example.com", &[8080, 22, 25], None));
        let sum: i32 = scored.factors.iter().map(|f| f.points).sum();
        assert_eq!(sum.clamp(0, 100) as u8, scored.risk);
    }
}
