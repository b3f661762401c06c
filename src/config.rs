// src/config.rs

use std::time::Duration;

pub const DEFAULT_CT_BASE_URL: &str = "https://crt.sh";
pub const DEFAULT_SHODAN_BASE_URL: &str = "https://api.shodan.io";
pub const SHODAN_KEY_ENV: &str = "SHODAN_API_KEY";
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Where per-host intelligence comes from. `Disabled` is a normal state,
/// not an error: the port inferer simply simulates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntelSource {
    Disabled,
    Shodan { api_key: String, base_url: String },
}

impl IntelSource {
    /// Builds the source from an optional key; blank keys count as absent.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(k) if !k.is_empty() => IntelSource::Shodan {
                api_key: k.to_string(),
                base_url: DEFAULT_SHODAN_BASE_URL.to_string(),
            },
            _ => IntelSource::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, IntelSource::Disabled)
    }
}

/// Settings for the discovery pipeline, built once at startup and handed
/// to `Scanner::new`.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    pub ct_base_url: String,
    pub intel: IntelSource,
    pub ct_timeout: Duration,
    pub dns_timeout: Duration,
    pub intel_timeout: Duration,
    pub user_agent: String,
    /// Per-asset lookups allowed in flight at once.
    pub concurrency: usize,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            ct_base_url: DEFAULT_CT_BASE_URL.to_string(),
            intel: IntelSource::Disabled,
            ct_timeout: Duration::from_secs(15),
            dns_timeout: Duration::from_secs(5),
            intel_timeout: Duration::from_secs(10),
            user_agent: format!("SurfaceScout/{}", env!("CARGO_PKG_VERSION")),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ReconConfig {
    /// Reads `SHODAN_API_KEY` from the environment; everything else keeps
    /// its default.
    pub fn from_env() -> Self {
        let key = std::env::var(SHODAN_KEY_ENV).ok();
        Self {
            intel: IntelSource::from_key(key.as_deref()),
            ..Self::default()
        }
    }

    pub fn with_ct_base_url(mut self, url: impl Into<String>) -> Self {
        self.ct_base_url = url.into();
        self
    }

    pub fn with_intel(mut self, intel: IntelSource) -> Self {
        self.intel = intel;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeouts(mut self, ct: Duration, dns: Duration, intel: Duration) -> Self {
        self.ct_timeout = ct;
        self.dns_timeout = dns;
        self.intel_timeout = intel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_disables_intelligence() {
        assert_eq!(IntelSource::from_key(None), IntelSource::Disabled);
        assert_eq!(IntelSource::from_key(Some("   ")), IntelSource::Disabled);
    }

    #[test]
    fn key_is_trimmed() {
        match IntelSource::from_key(Some(" abc123\n")) {
            IntelSource::Shodan { api_key, base_url } => {
                assert_eq!(api_key, "abc123");
                assert_eq!(base_url, DEFAULT_SHODAN_BASE_URL);
            }
            IntelSource::Disabled => panic!("expected Shodan source"),
        }
    }

    #[test]
    fn default_discovery_timeout_is_fifteen_seconds() {
        let config = ReconConfig::default();
        assert_eq!(config.ct_timeout, Duration::from_secs(15));
        assert!(!config.intel.is_enabled());
    }
}
