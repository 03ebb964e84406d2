//! Google Safe Browsing v4 lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::IntelHttp;
use crate::config::ClientConfig;
use crate::error::IntelResult;
use crate::source::{ThreatSource, ThreatVerdict};

const DEFAULT_BASE_URL: &str = "https://safebrowsing.googleapis.com";

const SOURCE_NAME: &str = "Google Safe Browsing";

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// Safe Browsing `threatMatches:find` client
pub struct SafeBrowsingClient {
    http: IntelHttp,
    api_key: String,
}

impl SafeBrowsingClient {
    /// Create a client with default settings
    pub fn new(api_key: impl Into<String>) -> IntelResult<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom settings
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> IntelResult<Self> {
        Ok(Self {
            http: IntelHttp::new("safe-browsing", DEFAULT_BASE_URL, config)?,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ThreatSource for SafeBrowsingClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    #[instrument(skip(self), fields(source = "safe-browsing"))]
    async fn check(&self, url: &str, _domain: &str) -> IntelResult<ThreatVerdict> {
        let body = FindRequest {
            client: ClientInfo {
                client_id: "trustcheck",
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: &THREAT_TYPES,
                platform_types: &["ANY_PLATFORM"],
                threat_entry_types: &["URL"],
                threat_entries: vec![ThreatEntry { url }],
            },
        };

        let request = self
            .http
            .http()
            .post(self.http.url("/v4/threatMatches:find"))
            .query(&[("key", self.api_key.as_str())])
            .json(&body);

        let response: FindResponse = self.http.send(request).await?;
        Ok(verdict_from(&response.matches))
    }
}

fn verdict_from(matches: &[ThreatMatch]) -> ThreatVerdict {
    let mut verdict = ThreatVerdict::clean(SOURCE_NAME);
    verdict.listed = !matches.is_empty();
    for m in matches {
        match m.threat_type.as_str() {
            "SOCIAL_ENGINEERING" => verdict.phishing = true,
            "MALWARE" => verdict.malware = true,
            _ => {}
        }
    }
    verdict
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo<'a>,
    threat_info: ThreatInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_id: &'a str,
    client_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'a [&'a str],
    platform_types: &'a [&'a str],
    threat_entry_types: &'a [&'a str],
    threat_entries: Vec<ThreatEntry<'a>>,
}

#[derive(Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

// An empty object means no matches
#[derive(Debug, Default, Deserialize)]
struct FindResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_is_clean() {
        let response: FindResponse = serde_json::from_str("{}").unwrap();
        let verdict = verdict_from(&response.matches);
        assert!(!verdict.listed);
        assert_eq!(verdict.source, SOURCE_NAME);
    }

    #[test]
    fn threat_types_map_to_flags() {
        let response: FindResponse = serde_json::from_str(
            r#"{"matches":[{"threatType":"SOCIAL_ENGINEERING"},{"threatType":"UNWANTED_SOFTWARE"}]}"#,
        )
        .unwrap();
        let verdict = verdict_from(&response.matches);
        assert!(verdict.listed);
        assert!(verdict.phishing);
        assert!(!verdict.malware);
    }
}
