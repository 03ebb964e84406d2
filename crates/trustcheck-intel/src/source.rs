//! The capability shared by every threat-intelligence source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IntelResult;

/// What one source says about a target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatVerdict {
    /// Display name of the source
    pub source: String,
    /// The source lists the target as harmful
    pub listed: bool,
    /// Listed for social engineering / phishing
    pub phishing: bool,
    /// Listed for malware distribution
    pub malware: bool,
    /// Engines flagging the target as malicious, where the source reports counts
    pub malicious: u32,
    /// Engines flagging the target as suspicious, where the source reports counts
    pub suspicious: u32,
}

impl ThreatVerdict {
    /// A verdict with nothing listed
    #[must_use]
    pub fn clean(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

/// A blacklist or reputation feed that can vouch against a target
#[async_trait]
pub trait ThreatSource: Send + Sync {
    /// Display name used in findings and red flags
    fn name(&self) -> &'static str;

    /// Look up the target by full URL and bare domain
    async fn check(&self, url: &str, domain: &str) -> IntelResult<ThreatVerdict>;
}
