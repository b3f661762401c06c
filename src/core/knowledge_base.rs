//! Static, read-only catalogue of every risk factor the scorer can emit,
//! with a human-readable explanation and remediation for each one.
//! The UI looks factors up here by code when showing an asset's breakdown.

use std::fmt;

/// Groups factors by what they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FactorCategory {
    /// Exposure every public host carries.
    Baseline,
    /// Derived from the subdomain name.
    Naming,
    /// Derived from the exposed port set.
    Network,
    /// Derived from third-party host intelligence.
    Intelligence,
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorCategory::Baseline => write!(f, "Baseline"),
            FactorCategory::Naming => write!(f, "Naming"),
            FactorCategory::Network => write!(f, "Network"),
            FactorCategory::Intelligence => write!(f, "Intelligence"),
        }
    }
}

pub struct FactorDetail {
    /// Matches `RiskFactor::code`.
    pub code: &'static str,
    pub title: &'static str,
    pub category: FactorCategory,
    pub description: &'static str,
    pub remediation: &'static str,
}

static FACTORS: &[FactorDetail] = &[
    FactorDetail {
        code: "BASELINE_EXPOSURE",
        title: "Internet-Facing Host",
        category: FactorCategory::Baseline,
        description: "Every host that resolves publicly can be found and probed by anyone. This baseline applies to all discovered assets.",
        remediation: "Keep an inventory of public hosts and retire any that no longer serve a purpose."
    },
    FactorDetail {
        code: "SENSITIVE_NAME",
        title: "Sensitive Hostname",
        category: FactorCategory::Naming,
        description: "The hostname suggests an administrative, development, staging or legacy system. Such hosts are often less hardened than production and are a favourite first target.",
        remediation: "Move administrative and pre-production systems behind a VPN or identity-aware proxy, and remove DNS records for hosts that are no longer used."
    },
    FactorDetail {
        code: "RISKY_PORT",
        title: "High-Risk Service Exposed",
        category: FactorCategory::Network,
        description: "A remote administration, database, cache or alternate web port is reachable. These services are frequently brute-forced or exploited when exposed to the internet.",
        remediation: "Restrict the port with firewall rules or security groups so only trusted networks can reach it. Databases and caches should never listen publicly."
    },
    FactorDetail {
        code: "MILD_RISK_PORT",
        title: "Mail or Search Service Exposed",
        category: FactorCategory::Network,
        description: "A mail, search or auxiliary web service is reachable. These are lower risk but widen the attack surface and may leak information.",
        remediation: "Confirm the service must be public. Enforce TLS and authentication, and disable any unused protocols."
    },
    FactorDetail {
        code: "KNOWN_VULNERABILITY",
        title: "Known Vulnerability Reported",
        category: FactorCategory::Intelligence,
        description: "The intelligence source associates a published CVE with this host. Public exploits may exist.",
        remediation: "Patch or upgrade the affected software, then confirm the CVE is no longer reported on the next scan."
    },
    FactorDetail {
        code: "EOL_OPERATING_SYSTEM",
        title: "End-of-Life Operating System",
        category: FactorCategory::Intelligence,
        description: "The host fingerprint matches an operating system that no longer receives security updates.",
        remediation: "Migrate the workload to a supported operating system. Until then, isolate the host and limit its exposed services."
    },
    FactorDetail {
        code: "LINUX_DETECTED",
        title: "Operating System Fingerprinted",
        category: FactorCategory::Intelligence,
        description: "The host's operating system could be identified remotely, which helps an attacker choose exploits.",
        remediation: "Reduce banner and stack fingerprinting where practical and keep the kernel and packages up to date."
    },
    FactorDetail {
        code: "EXPLOITABLE_BANNER",
        title: "Exploitable Software Signature",
        category: FactorCategory::Intelligence,
        description: "A service banner contains the signature of software with well-known, widely exploited flaws (ThinkPHP, Magento, Log4j, EternalBlue).",
        remediation: "Identify the exact version behind the banner and apply vendor patches immediately. Treat the host as potentially compromised until verified."
    },
    FactorDetail {
        code: "WEB_ONLY_EXPOSURE",
        title: "Standard Web Exposure Only",
        category: FactorCategory::Network,
        description: "Only standard web ports are open. This is the expected footprint of a public website and slightly lowers the score.",
        remediation: "Keep TLS configuration current and redirect plain HTTP to HTTPS."
    },
];

/// Looks up the catalogue entry for a factor code.
pub fn get_factor_detail(code: &str) -> Option<&'static FactorDetail> {
    FACTORS.iter().find(|f| f.code == code)
}
