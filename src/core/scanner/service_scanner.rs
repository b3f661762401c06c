// src/core/scanner/service_scanner.rs

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, warn};

use crate::config::{IntelSource, ReconConfig};
use crate::core::error::ReconError;
use crate::core::models::Intelligence;
use crate::core::seed;

/// Ports the simulator draws from when no live data is available.
pub const COMMON_PORTS: &[u16] = &[80, 443, 22, 8080, 3306, 5432, 8443, 21, 25, 3389, 6379, 27017];

/// Determines the exposed ports of an asset.
///
/// Live intelligence wins when it is configured, the query succeeds and it
/// reports at least one port. In every other case the ports are simulated
/// from the subdomain name. A successful payload without ports is still
/// returned so the scorer can use its OS and vulnerability data.
pub async fn infer_services(
    client: &reqwest::Client,
    config: &ReconConfig,
    subdomain: &str,
    ip: &str,
) -> (Vec<u16>, Option<Intelligence>) {
    let intelligence = match fetch_intelligence(client, config, ip).await {
        Ok(intel) => intel,
        Err(e) => {
            warn!(subdomain, ip, error = %e, "Intelligence lookup failed, simulating ports.");
            None
        }
    };

    match intelligence {
        Some(intel) if !intel.ports.is_empty() => {
            let mut ports = intel.ports.clone();
            ports.sort_unstable();
            ports.dedup();
            info!(subdomain, ip, ports = ?ports, "Using live intelligence ports.");
            (ports, Some(intel))
        }
        other => (simulate_ports(subdomain), other),
    }
}

/// Draws between one and four distinct ports from `COMMON_PORTS`, seeded by
/// the subdomain name, and returns them sorted.
pub fn simulate_ports(subdomain: &str) -> Vec<u16> {
    let mut rng = seed::rng_for(subdomain);
    let count = rng.random_range(1..=4);
    let mut ports: Vec<u16> = COMMON_PORTS.choose_multiple(&mut rng, count).copied().collect();
    ports.sort_unstable();
    debug!(subdomain, ports = ?ports, "Simulated ports.");
    ports
}

// `Ok(None)` means no source is configured.
async fn fetch_intelligence(
    client: &reqwest::Client,
    config: &ReconConfig,
    ip: &str,
) -> Result<Option<Intelligence>, ReconError> {
    let IntelSource::Shodan { api_key, base_url } = &config.intel else {
        return Ok(None);
    };

    let url = format!("{}/shodan/host/{}", base_url.trim_end_matches('/'), ip);
    debug!(url = %url, "Querying intelligence source.");

    let response = client
        .get(&url)
        .query(&[("key", api_key.as_str())])
        .timeout(config.intel_timeout)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ReconError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(Some(parse_intelligence(&body)?))
}

pub fn parse_intelligence(body: &str) -> Result<Intelligence, ReconError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn simulated_ports_are_deterministic_sorted_and_bounded() {
        for name in ["www.example.com", "dev.example.com", "jenkins.corp.example.net"] {
            let ports = simulate_ports(name);
            assert_eq!(ports, simulate_ports(name));
            assert!((1..=4).contains(&ports.len()));
            assert!(ports.windows(2).all(|w| w[0] < w[1]));
            assert!(ports.iter().all(|p| COMMON_PORTS.contains(p)));
        }
    }

    #[test]
    fn parses_shodan_host_payload() {
        let body = r#"{
            "ports": [443, 22],
            "os": "Ubuntu Linux",
            "vulns": ["CVE-2021-44228"],
            "isp": "Example ISP",
            "data": [{"port": 443, "data": "HTTP/1.1 200 OK"}],
            "hostnames": ["www.example.com"]
        }"#;
        let intel = parse_intelligence(body).unwrap();
        assert_eq!(intel.ports, vec![443, 22]);
        assert_eq!(intel.os.as_deref(), Some("Ubuntu Linux"));
        assert_eq!(intel.vulns, vec!["CVE-2021-44228"]);
        assert_eq!(intel.data.len(), 1);
    }

    #[tokio::test]
    async fn disabled_source_simulates() {
        let client = reqwest::Client::new();
        let config = ReconConfig::default();
        let (ports, intel) = infer_services(&client, &config, "api.example.com", "192.168.1.1").await;
        assert_eq!(ports, simulate_ports("api.example.com"));
        assert!(intel.is_none());
    }

    #[tokio::test]
    async fn unreachable_source_is_treated_as_absent() {
        let client = reqwest::Client::new();
        let config = ReconConfig::default()
            .with_intel(IntelSource::Shodan {
                api_key: "test".into(),
                base_url: "http://127.0.0.1:9".into(),
            })
            .with_timeouts(Duration::from_secs(1), Duration::from_secs(1), Duration::from_millis(500));
        let (ports, intel) = infer_services(&client, &config, "vpn.example.com", "10.0.0.1").await;
        assert_eq!(ports, simulate_ports("vpn.example.com"));
        assert!(intel.is_none());
    }
}
