//! The fixed-shape collection of all six probe results.

use serde::{Deserialize, Serialize};

use super::findings::{
    ContentFindings, DomainFindings, FraudFindings, ReputationFindings, SecurityFindings,
    TransparencyFindings,
};
use super::probe::{ProbeResult, ProbeStatus};

/// Identifier for each of the six probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProbeId {
    DomainTrust,
    Security,
    FraudIndicators,
    ContentSignals,
    Transparency,
    Reputation,
}

impl ProbeId {
    /// All probes in report order
    pub const ALL: [Self; 6] = [
        Self::DomainTrust,
        Self::Security,
        Self::FraudIndicators,
        Self::ContentSignals,
        Self::Transparency,
        Self::Reputation,
    ];

    /// Key used at the serialization boundary
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomainTrust => "domainTrust",
            Self::Security => "security",
            Self::FraudIndicators => "fraudIndicators",
            Self::ContentSignals => "contentSignals",
            Self::Transparency => "transparency",
            Self::Reputation => "reputation",
        }
    }

    /// Human-readable probe name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DomainTrust => "Domain trust",
            Self::Security => "Security",
            Self::FraudIndicators => "Fraud indicators",
            Self::ContentSignals => "Content signals",
            Self::Transparency => "Transparency",
            Self::Reputation => "Reputation",
        }
    }
}

impl std::fmt::Display for ProbeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Findings-independent view of one probe result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSummary {
    pub id: ProbeId,
    pub score: u8,
    pub status: ProbeStatus,
    pub degraded: bool,
}

/// All six probe results for one assessment.
///
/// Every probe has a field, so a missing result cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSet {
    pub domain_trust: ProbeResult<DomainFindings>,
    pub security: ProbeResult<SecurityFindings>,
    pub fraud_indicators: ProbeResult<FraudFindings>,
    pub content_signals: ProbeResult<ContentFindings>,
    pub transparency: ProbeResult<TransparencyFindings>,
    pub reputation: ProbeResult<ReputationFindings>,
}

impl CheckSet {
    /// Score, status and degradation of every probe, in report order
    #[must_use]
    pub fn summaries(&self) -> [ProbeSummary; 6] {
        ProbeId::ALL.map(|id| self.summary(id))
    }

    /// Score, status and degradation of one probe
    #[must_use]
    pub fn summary(&self, id: ProbeId) -> ProbeSummary {
        let (score, status, degraded) = match id {
            ProbeId::DomainTrust => parts(&self.domain_trust),
            ProbeId::Security => parts(&self.security),
            ProbeId::FraudIndicators => parts(&self.fraud_indicators),
            ProbeId::ContentSignals => parts(&self.content_signals),
            ProbeId::Transparency => parts(&self.transparency),
            ProbeId::Reputation => parts(&self.reputation),
        };
        ProbeSummary {
            id,
            score,
            status,
            degraded,
        }
    }

    /// Whether any probe fell back to its default
    #[must_use]
    pub fn any_degraded(&self) -> bool {
        self.summaries().iter().any(|s| s.degraded)
    }

    /// Whether every probe fell back to its default
    #[must_use]
    pub fn all_degraded(&self) -> bool {
        self.summaries().iter().all(|s| s.degraded)
    }
}

fn parts<F>(result: &ProbeResult<F>) -> (u8, ProbeStatus, bool) {
    (result.score(), result.status(), result.is_degraded())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> CheckSet {
        CheckSet {
            domain_trust: ProbeResult::observed(score, DomainFindings::default()),
            security: ProbeResult::observed(score, SecurityFindings::default()),
            fraud_indicators: ProbeResult::observed(score, FraudFindings::default()),
            content_signals: ProbeResult::observed(score, ContentFindings::default()),
            transparency: ProbeResult::observed(score, TransparencyFindings::default()),
            reputation: ProbeResult::observed(score, ReputationFindings::default()),
        }
    }

    #[test]
    fn summaries_cover_every_probe() {
        let checks = uniform(90);
        let summaries = checks.summaries();
        assert_eq!(summaries.len(), 6);
        for (summary, id) in summaries.iter().zip(ProbeId::ALL) {
            assert_eq!(summary.id, id);
            assert_eq!(summary.score, 90);
            assert_eq!(summary.status, ProbeStatus::Pass);
        }
        assert!(!checks.any_degraded());
    }

    #[test]
    fn serialized_keys_are_stable() {
        let json = serde_json::to_value(uniform(100)).unwrap();
        for id in ProbeId::ALL {
            let entry = &json[id.as_str()];
            assert_eq!(entry["score"], 100);
            assert_eq!(entry["status"], "pass");
            assert_eq!(entry["degraded"], false);
        }
    }

    #[test]
    fn findings_are_flattened_into_entry() {
        let mut checks = uniform(100);
        checks.security = ProbeResult::observed(
            70,
            SecurityFindings {
                https: Some(true),
                tls_version: Some("TLSv1.3".into()),
                ..SecurityFindings::default()
            },
        );
        let json = serde_json::to_value(&checks).unwrap();
        assert_eq!(json["security"]["https"], true);
        assert_eq!(json["security"]["tlsVersion"], "TLSv1.3");
        assert_eq!(json["security"]["status"], "warning");
        assert!(json["security"].get("sslValid").is_none());
    }

    #[test]
    fn checkset_round_trips_through_json() {
        let checks = uniform(64);
        let json = serde_json::to_string(&checks).unwrap();
        let parsed: CheckSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, checks);
    }
}
