//! Weighted overall score and risk band.

use trustcheck_core::{CheckSet, ProbeId, RiskLevel};

/// Per-probe weights in percent.
///
/// All weights should sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeWeights {
    pub domain_trust: u32,
    pub security: u32,
    pub fraud_indicators: u32,
    pub content_signals: u32,
    pub transparency: u32,
    pub reputation: u32,
}

impl Default for ProbeWeights {
    fn default() -> Self {
        Self {
            domain_trust: 20,
            security: 25,
            fraud_indicators: 25,
            content_signals: 10,
            transparency: 10,
            reputation: 10,
        }
    }
}

impl ProbeWeights {
    pub const fn weight(&self, id: ProbeId) -> u32 {
        match id {
            ProbeId::DomainTrust => self.domain_trust,
            ProbeId::Security => self.security,
            ProbeId::FraudIndicators => self.fraud_indicators,
            ProbeId::ContentSignals => self.content_signals,
            ProbeId::Transparency => self.transparency,
            ProbeId::Reputation => self.reputation,
        }
    }

    pub fn total(&self) -> u32 {
        ProbeId::ALL.iter().map(|id| self.weight(*id)).sum()
    }

    /// Weighted mean of the probe scores, rounded half up
    pub fn overall_score(&self, checks: &CheckSet) -> u8 {
        let total = self.total().max(1);
        let weighted: u32 = checks
            .summaries()
            .iter()
            .map(|s| u32::from(s.score) * self.weight(s.id))
            .sum();
        ((weighted + total / 2) / total).min(100) as u8
    }
}

/// Overall score with the standard weights
pub fn overall_score(checks: &CheckSet) -> u8 {
    ProbeWeights::default().overall_score(checks)
}

/// Band for an overall score
pub const fn risk_level(score: u8) -> RiskLevel {
    RiskLevel::from_score(score)
}
