// src/core/scanner/subdomain_scanner.rs

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ReconConfig;
use crate::core::error::ReconError;

/// Upper bound on candidate names taken from a certificate-log response.
pub const MAX_CANDIDATES: usize = 30;

/// Prefixes used to build plausible subdomains when the certificate log
/// cannot be used.
pub const MOCK_PREFIXES: &[&str] = &[
    "www", "mail", "dev", "api", "staging", "admin", "test", "cdn", "vpn", "remote", "app",
    "portal", "ftp", "secure", "internal",
];

// One record of a crt.sh JSON response. Only the subject names matter.
#[derive(Debug, Deserialize)]
struct CertTransparencyEntry {
    #[serde(default)]
    name_value: String,
}

/// Enumerates subdomains of `domain`, preferring certificate-transparency
/// data and falling back to the mock catalogue. Never fails.
pub async fn discover_subdomains(
    client: &reqwest::Client,
    config: &ReconConfig,
    domain: &str,
) -> Vec<String> {
    info!(target = %domain, "Starting subdomain discovery.");

    match query_cert_transparency(client, config, domain).await {
        Ok(names) => {
            info!(count = %names.len(), "Certificate transparency returned subdomains.");
            names
        }
        Err(e) => {
            warn!(target = %domain, error = %e, "Certificate transparency lookup failed, using mock subdomains.");
            mock_subdomains(domain)
        }
    }
}

/// Builds the deterministic fallback list. Empty only for an empty domain.
pub fn mock_subdomains(domain: &str) -> Vec<String> {
    if domain.is_empty() {
        return Vec::new();
    }
    MOCK_PREFIXES.iter().map(|prefix| format!("{prefix}.{domain}")).collect()
}

// Single attempt, bounded by the client timeout. An empty result counts as
// a failure so the caller falls back.
async fn query_cert_transparency(
    client: &reqwest::Client,
    config: &ReconConfig,
    domain: &str,
) -> Result<Vec<String>, ReconError> {
    let url = format!("{}/?q=%.{}&output=json", config.ct_base_url.trim_end_matches('/'), domain);
    debug!(url = %url, "Querying certificate transparency log.");

    let response = client.get(&url).timeout(config.ct_timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ReconError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    let names = parse_ct_response(&body, domain)?;
    if names.is_empty() {
        return Err(ReconError::NoResults);
    }
    Ok(names)
}

/// Extracts proper subdomains of `domain` from a crt.sh JSON body.
///
/// Each record's `name_value` may hold several newline-separated names.
/// Wildcard prefixes are stripped, names are lowercased, duplicates are
/// dropped keeping first-seen order, and the result is capped at
/// `MAX_CANDIDATES`.
pub fn parse_ct_response(body: &str, domain: &str) -> Result<Vec<String>, ReconError> {
    let entries: Vec<CertTransparencyEntry> = serde_json::from_str(body)?;
    let suffix = format!(".{domain}");

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for entry in &entries {
        for raw in entry.name_value.lines() {
            let name = raw.trim().trim_start_matches(['*', '.']).to_lowercase();
            if name.is_empty() || name.contains('*') || !name.ends_with(&suffix) {
                continue;
            }
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }

    names.truncate(MAX_CANDIDATES);
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiline_names_and_strips_wildcards() {
        let body = r#"[
            {"name_value": "*.example.com\nwww.example.com"},
            {"name_value": "API.Example.com"},
            {"name_value": "example.com"},
            {"name_value": "www.example.com\nmail.example.com"},
            {"name_value": "evil-example.com\nexample.com.attacker.net"}
        ]"#;
        let names = parse_ct_response(body, "example.com").unwrap();
        assert_eq!(names, vec!["www.example.com", "api.example.com", "mail.example.com"]);
    }

    #[test]
    fn caps_candidates() {
        let entries: Vec<String> = (0..50)
            .map(|i| format!(r#"{{"name_value":"host{i}.example.com"}}"#))
            .collect();
        let body = format!("[{}]", entries.join(","));
        let names = parse_ct_response(&body, "example.com").unwrap();
        assert_eq!(names.len(), MAX_CANDIDATES);
        assert_eq!(names[0], "host0.example.com");
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_ct_response("<html>rate limited</html>", "example.com"),
            Err(ReconError::Parse(_))
        ));
    }

    #[test]
    fn records_without_names_are_skipped() {
        let names = parse_ct_response(r#"[{"issuer_name":"x"}]"#, "example.com").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn mock_catalogue_is_deterministic() {
        let names = mock_subdomains("example.com");
        assert_eq!(names.len(), MOCK_PREFIXES.len());
        assert_eq!(names[0], "www.example.com");
        assert_eq!(names, mock_subdomains("example.com"));
        assert!(mock_subdomains("").is_empty());
    }
}
