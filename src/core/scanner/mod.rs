// src/core/scanner/mod.rs

pub mod dns_scanner;
pub mod service_scanner;
pub mod subdomain_scanner;

use std::sync::Arc;

use chrono::Utc;
use hickory_resolver::TokioAsyncResolver;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::ReconConfig;
use crate::core::error::ReconError;
use crate::core::models::{Intelligence, RawAsset, ScanResult};
use crate::core::risk::run_risk_engine;

use self::dns_scanner::{build_resolver, mock_ip, resolve_ip};
use self::service_scanner::{infer_services, simulate_ports};
use self::subdomain_scanner::{discover_subdomains, mock_subdomains};

/// Most assets assembled per scan. Also the ceiling for concurrent lookups.
pub const MAX_ASSETS: usize = 12;

/// Handle to the discovery pipeline: configuration plus the HTTP client
/// and DNS resolver shared by every lookup. Cloning is cheap.
#[derive(Clone)]
pub struct Scanner {
    config: Arc<ReconConfig>,
    http: reqwest::Client,
    resolver: TokioAsyncResolver,
}

impl Scanner {
    pub fn new(config: ReconConfig) -> Result<Self, ReconError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        let resolver = build_resolver(config.dns_timeout);
        Ok(Self { config: Arc::new(config), http, resolver })
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    pub async fn discover(&self, domain: &str) -> Vec<String> {
        discover_subdomains(&self.http, &self.config, domain).await
    }

    pub async fn resolve(&self, subdomain: &str) -> String {
        resolve_ip(&self.resolver, self.config.dns_timeout, subdomain).await
    }

    pub async fn infer(&self, subdomain: &str, ip: &str) -> (Vec<u16>, Option<Intelligence>) {
        infer_services(&self.http, &self.config, subdomain, ip).await
    }

    /// Discovers, resolves and profiles up to `MAX_ASSETS` subdomains of
    /// `domain`.
    ///
    /// Per-asset lookups run concurrently, at most `config.concurrency` at a
    /// time; the returned assets keep the order of the discovered names.
    /// Never fails: every lookup has a deterministic fallback.
    pub async fn scan(&self, domain: &str) -> Vec<RawAsset> {
        let domain = domain.trim().to_lowercase();
        info!(target = %domain, "Starting asset discovery.");

        let mut names = self.discover(&domain).await;
        if names.is_empty() {
            names = mock_subdomains(&domain);
        }
        if names.is_empty() {
            if !domain.is_empty() {
                error!(target = %domain, "No candidate names after both discovery strategies.");
            }
            return Vec::new();
        }
        names.truncate(MAX_ASSETS);

        let permits = Arc::new(Semaphore::new(worker_permits(self.config.concurrency)));
        let mut set = JoinSet::new();

        for (index, name) in names.iter().cloned().enumerate() {
            let scanner = self.clone();
            let permits = permits.clone();
            set.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let asset = scanner.profile(name).await;
                (index, asset)
            });
        }

        let mut slots: Vec<Option<RawAsset>> = vec![None; names.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, asset)) => slots[index] = Some(asset),
                Err(e) => warn!(error = %e, "Asset task failed."),
            }
        }

        let assets: Vec<RawAsset> = slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| slot.unwrap_or_else(|| offline_asset(name)))
            .collect();

        info!(target = %domain, count = %assets.len(), "Asset discovery finished.");
        assets
    }

    async fn profile(&self, subdomain: String) -> RawAsset {
        let ip = self.resolve(&subdomain).await;
        let (ports, intelligence) = self.infer(&subdomain, &ip).await;
        RawAsset { subdomain, ip, ports, intelligence }
    }
}

// At least one worker, never more than there can be assets.
fn worker_permits(concurrency: usize) -> usize {
    concurrency.clamp(1, MAX_ASSETS)
}

// Used only if a worker task dies; builds the asset from fallbacks alone.
fn offline_asset(subdomain: String) -> RawAsset {
    let ip = mock_ip(&subdomain);
    let ports = simulate_ports(&subdomain);
    RawAsset { subdomain, ip, ports, intelligence: None }
}

/// Cleans a user-supplied target down to a bare domain: trims, lowercases,
/// drops any scheme, path or port, and a leading `www.`.
pub fn normalize_target(input: &str) -> String {
    let trimmed = input.trim().to_lowercase();
    let bare = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(&trimmed)
        .trim();
    if bare.is_empty() {
        return String::new();
    }

    let host = url::Url::parse(&format!("https://{bare}"))
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_else(|| bare.split(['/', '?', '#', ':']).next().unwrap_or_default().to_string());

    host.strip_prefix("www.").map(String::from).unwrap_or(host)
}

/// Runs the whole pipeline for one target: normalization, discovery and
/// risk scoring, producing the immutable `ScanResult`.
pub async fn run_full_scan(scanner: &Scanner, target: &str) -> Result<ScanResult, ReconError> {
    let domain = normalize_target(target);
    if domain.is_empty() {
        return Err(ReconError::EmptyDomain);
    }

    let raw_assets = scanner.scan(&domain).await;
    let (assets, risk_score, severity_distribution) = run_risk_engine(raw_assets);

    info!(target = %domain, risk_score, dist = ?severity_distribution, "Scan complete.");
    Ok(ScanResult {
        domain,
        assets,
        risk_score,
        severity_distribution,
        scanned_at: Utc::now(),
    })
}
