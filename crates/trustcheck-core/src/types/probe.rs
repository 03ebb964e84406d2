//! Per-probe result record and the shared score/status rules.

use serde::{Deserialize, Serialize};

/// Lowest score that still counts as a pass
pub const PASS_THRESHOLD: u8 = 80;

/// Lowest score that counts as a warning rather than a failure
pub const WARNING_THRESHOLD: u8 = 60;

/// Outcome band for a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// Score of 80 or more
    Pass,
    /// Score from 60 to 79
    Warning,
    /// Score below 60
    Fail,
}

impl ProbeStatus {
    /// Derive the status from a 0-100 score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= PASS_THRESHOLD {
            Self::Pass
        } else if score >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Fail
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warning => write!(f, "warning"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Bounded sub-score plus supporting facts from one probe.
///
/// `F` is the probe's findings record; it is flattened into the
/// serialized form next to `score`, `status` and `degraded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult<F> {
    score: u8,
    status: ProbeStatus,
    degraded: bool,
    #[serde(flatten)]
    findings: F,
}

impl<F> ProbeResult<F> {
    /// A result backed by genuine observation; status follows the score
    pub fn observed(score: u8, findings: F) -> Self {
        let score = score.min(100);
        Self {
            score,
            status: ProbeStatus::from_score(score),
            degraded: false,
            findings,
        }
    }

    /// A result produced by the probe's fallback policy.
    ///
    /// Fallbacks carry the status the probe documents for its default,
    /// since an unknown outcome is not necessarily a failed one.
    pub fn degraded(score: u8, status: ProbeStatus, findings: F) -> Self {
        Self {
            score: score.min(100),
            status,
            degraded: true,
            findings,
        }
    }

    /// Score in `0..=100`
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Status derived from the score
    pub const fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Whether the result came from a fallback rather than observation
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The facts the probe observed
    pub const fn findings(&self) -> &F {
        &self.findings
    }
}

/// Accumulates signed adjustments from a baseline, clamped on finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    raw: i32,
}

impl ScoreCard {
    /// Start from the given baseline
    #[must_use]
    pub const fn new(baseline: i32) -> Self {
        Self { raw: baseline }
    }

    /// Apply a signed adjustment
    pub fn adjust(&mut self, delta: i32) {
        self.raw = self.raw.saturating_add(delta);
    }

    /// Apply `delta` only when `condition` holds
    pub fn adjust_if(&mut self, condition: bool, delta: i32) {
        if condition {
            self.adjust(delta);
        }
    }

    /// Unclamped running total
    #[must_use]
    pub const fn raw(&self) -> i32 {
        self.raw
    }

    /// Final score clamped to `0..=100`
    #[must_use]
    pub fn finish(&self) -> u8 {
        self.raw.clamp(0, 100) as u8
    }
}
