// src/core/scanner/dns_scanner.rs

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use rand::Rng;
use tracing::{debug, warn};

use crate::core::error::ReconError;
use crate::core::seed;

/// Builds the async resolver used for every lookup in a scan. One attempt
/// per query, bounded by `timeout`.
pub fn build_resolver(timeout: Duration) -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}

/// Resolves `subdomain` to an IPv4 address, or to a deterministic mock
/// address when the lookup fails for any reason.
pub async fn resolve_ip(resolver: &TokioAsyncResolver, timeout: Duration, subdomain: &str) -> String {
    match lookup_ipv4(resolver, timeout, subdomain).await {
        Ok(ip) => {
            debug!(subdomain, ip = %ip, "Resolved subdomain.");
            ip
        }
        Err(e) => {
            let ip = mock_ip(subdomain);
            warn!(subdomain, error = %e, mock_ip = %ip, "Resolution failed, using mock address.");
            ip
        }
    }
}

/// A `192.168.x.y` address with `x, y` in `1..=254`, derived only from the name.
pub fn mock_ip(subdomain: &str) -> String {
    let mut rng = seed::rng_for(subdomain);
    let x: u8 = rng.random_range(1..=254);
    let y: u8 = rng.random_range(1..=254);
    format!("192.168.{x}.{y}")
}

async fn lookup_ipv4(
    resolver: &TokioAsyncResolver,
    timeout: Duration,
    subdomain: &str,
) -> Result<String, ReconError> {
    let lookup = tokio::time::timeout(timeout, resolver.lookup_ip(subdomain))
        .await
        .map_err(|_| ReconError::Timeout("DNS lookup"))?
        .map_err(|e| ReconError::Dns(e.to_string()))?;

    lookup
        .iter()
        .find_map(|addr| match addr {
            IpAddr::V4(v4) => Some(v4.to_string()),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| ReconError::Dns(format!("no A record for {subdomain}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ip_is_stable_and_in_range() {
        for name in ["www.example.com", "admin.example.com", "a.b.c.example.org"] {
            let ip = mock_ip(name);
            assert_eq!(ip, mock_ip(name));

            let octets: Vec<u16> = ip.split('.').map(|o| o.parse().unwrap()).collect();
            assert_eq!(octets.len(), 4);
            assert_eq!(&octets[..2], &[192, 168]);
            assert!((1..=254).contains(&octets[2]));
            assert!((1..=254).contains(&octets[3]));
        }
    }

    #[tokio::test]
    async fn unresolvable_name_falls_back_to_mock() {
        let timeout = Duration::from_millis(500);
        let resolver = build_resolver(timeout);
        let name = "nonexistent.surface-scout.invalid";
        let ip = resolve_ip(&resolver, timeout, name).await;
        assert_eq!(ip, mock_ip(name));
    }
}
