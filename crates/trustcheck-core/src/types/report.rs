//! Final assessment report and risk banding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checks::CheckSet;
use super::probe::{PASS_THRESHOLD, WARNING_THRESHOLD};
use super::target::Target;

/// Three-level classification of the overall score.
///
/// Uses the same thresholds as [`ProbeStatus`](super::ProbeStatus) so a
/// report reads consistently with its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band an overall score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= PASS_THRESHOLD {
            Self::Low
        } else if score >= WARNING_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Immutable outcome of one assessment.
///
/// Serializes to the boundary shape
/// `{url, domain, overallScore, riskLevel, checks, redFlags, recommendations, analyzedAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustReport {
    #[serde(flatten)]
    target: Target,
    overall_score: u8,
    risk_level: RiskLevel,
    checks: CheckSet,
    red_flags: Vec<String>,
    recommendations: Vec<String>,
    analyzed_at: DateTime<Utc>,
}

impl TrustReport {
    /// Assemble a report from already-computed parts
    #[must_use]
    pub fn new(
        target: Target,
        checks: CheckSet,
        overall_score: u8,
        risk_level: RiskLevel,
        red_flags: Vec<String>,
        recommendations: Vec<String>,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            target,
            overall_score: overall_score.min(100),
            risk_level,
            checks,
            red_flags,
            recommendations,
            analyzed_at,
        }
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub const fn checks(&self) -> &CheckSet {
        &self.checks
    }

    /// Weighted overall score in `0..=100`
    #[must_use]
    pub const fn overall_score(&self) -> u8 {
        self.overall_score
    }

    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Warning statements, in rule order
    #[must_use]
    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    /// Guidance statements, in rule order
    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// When the assessment was computed
    #[must_use]
    pub const fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }
}
