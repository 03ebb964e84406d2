//! VirusTotal v3 domain reports.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use crate::client::IntelHttp;
use crate::config::ClientConfig;
use crate::error::{IntelError, IntelResult};
use crate::source::{ThreatSource, ThreatVerdict};

const DEFAULT_BASE_URL: &str = "https://www.virustotal.com";

const SOURCE_NAME: &str = "VirusTotal";

/// VirusTotal domain report client
pub struct VirusTotalClient {
    http: IntelHttp,
    api_key: String,
}

impl VirusTotalClient {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> IntelResult<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> IntelResult<Self> {
        Ok(Self {
            http: IntelHttp::new("virustotal", DEFAULT_BASE_URL, config)?,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ThreatSource for VirusTotalClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    #[instrument(skip(self), fields(source = "virustotal"))]
    async fn check(&self, _url: &str, domain: &str) -> IntelResult<ThreatVerdict> {
        let request = self
            .http
            .http()
            .get(self.http.url(&format!("/api/v3/domains/{domain}")))
            .header("x-apikey", &self.api_key);

        match self.http.send::<DomainReport>(request).await {
            Ok(report) => Ok(verdict_from(&report)),
            // Never-seen domains have no report and nothing against them
            Err(IntelError::NotFound { .. }) => Ok(ThreatVerdict::clean(SOURCE_NAME)),
            Err(e) => Err(e),
        }
    }
}

fn verdict_from(report: &DomainReport) -> ThreatVerdict {
    let stats = report
        .data
        .as_ref()
        .and_then(|d| d.attributes.last_analysis_stats)
        .unwrap_or_default();

    ThreatVerdict {
        source: SOURCE_NAME.to_string(),
        listed: stats.malicious > 0,
        phishing: false,
        malware: stats.malicious > 0,
        malicious: stats.malicious,
        suspicious: stats.suspicious,
    }
}

#[derive(Debug, Deserialize)]
struct DomainReport {
    data: Option<DomainData>,
}

#[derive(Debug, Deserialize)]
struct DomainData {
    #[serde(default)]
    attributes: DomainAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct DomainAttributes {
    last_analysis_stats: Option<AnalysisStats>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct AnalysisStats {
    #[serde(default)]
    malicious: u32,
    #[serde(default)]
    suspicious: u32,
}
