//! Engine configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trustcheck_core::{Result, TrustError};

/// Settings for building a [`crate::TrustEngine`] with live probes.
///
/// Credentials are plain values here; the engine never reads them from
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Time each probe gets before its fallback is used
    #[serde(default = "default_probe_budget")]
    pub probe_budget_secs: u64,

    /// Per-request timeout for page fetches, TLS and WHOIS
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User-Agent sent with page fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// WHOIS server asked first
    #[serde(default = "default_whois_server")]
    pub whois_server: String,

    /// WHOIS referrals followed after the first server
    #[serde(default = "default_whois_follow")]
    pub whois_follow: u8,

    /// Optional threat-intelligence sources
    #[serde(default)]
    pub intel: IntelConfig,
}

/// Threat-intelligence credentials; a missing key skips that source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelConfig {
    /// Google Safe Browsing API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_browsing_key: Option<String>,

    /// VirusTotal API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virustotal_key: Option<String>,

    /// Request pacing per source
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            probe_budget_secs: default_probe_budget(),
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
            whois_server: default_whois_server(),
            whois_follow: default_whois_follow(),
            intel: IntelConfig::default(),
        }
    }
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            safe_browsing_key: None,
            virustotal_key: None,
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| TrustError::Config(format!("{}: {e}", path.display())))?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TrustError::Config(e.to_string()))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TrustError::Config(e.to_string()))
    }

    pub const fn probe_budget(&self) -> Duration {
        Duration::from_secs(self.probe_budget_secs)
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

// Default value functions for serde.
const fn default_probe_budget() -> u64 {
    15
}

const fn default_http_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from(trustcheck_recon::BROWSER_USER_AGENT)
}

fn default_whois_server() -> String {
    String::from(trustcheck_recon::DEFAULT_WHOIS_SERVER)
}

const fn default_whois_follow() -> u8 {
    3
}

const fn default_requests_per_second() -> u32 {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.probe_budget(), Duration::from_secs(15));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.whois_server, "whois.iana.org");
        assert_eq!(config.whois_follow, 3);
        assert!(config.intel.safe_browsing_key.is_none());
        assert!(config.intel.virustotal_key.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_toml(
            "probe_budget_secs = 5\n\n[intel]\nvirustotal_key = \"vt\"\n",
        )
        .unwrap();
        assert_eq!(config.probe_budget_secs, 5);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.intel.virustotal_key.as_deref(), Some("vt"));
        assert_eq!(config.intel.requests_per_second, 4);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = EngineConfig::default();
        config.intel.safe_browsing_key = Some("sb".into());
        let parsed = EngineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "probe_budget_secs = \"soon\"").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(TrustError::Config(_))));
    }
}
