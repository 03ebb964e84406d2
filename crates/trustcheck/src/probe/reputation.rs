use std::hash::Hasher;
use std::sync::Arc;

use async_trait::async_trait;
use fnv::FnvHasher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;
use trustcheck_core::{ProbeId, ProbeResult, ProbeStatus, ReputationFindings, ScoreCard, Target};

use super::Probe;
use crate::error::ProbeError;

/// Review and complaint figures for a host
#[derive(Debug, Clone, PartialEq)]
pub struct ReputationData {
    pub user_reviews: u32,
    pub avg_rating: f64,
    pub fraud_reports: u32,
    /// Figures are placeholders rather than real data
    pub synthetic: bool,
}

/// Where review and complaint figures come from
#[async_trait]
pub trait ReputationSource: Send + Sync {
    async fn lookup(&self, host: &str) -> Result<ReputationData, ProbeError>;
}

/// Placeholder figures derived from the host name.
///
/// No live reputation feed is wired in, so this stands in for one. The
/// same host always gets the same figures and every result is marked
/// `synthetic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticReputation;

#[async_trait]
impl ReputationSource for SyntheticReputation {
    async fn lookup(&self, host: &str) -> Result<ReputationData, ProbeError> {
        let mut rng = StdRng::seed_from_u64(host_seed(host));
        Ok(ReputationData {
            user_reviews: rng.gen_range(50..550),
            avg_rating: f64::from(rng.gen_range(30_u8..=50)) / 10.0,
            fraud_reports: rng.gen_range(0..5),
            synthetic: true,
        })
    }
}

// FNV-1a over the raw bytes; stable across runs and platforms, unlike the std hasher
fn host_seed(host: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(host.as_bytes());
    hasher.finish()
}

/// Review volume, rating and fraud-report count
pub struct ReputationProbe {
    source: Arc<dyn ReputationSource>,
}

impl ReputationProbe {
    pub fn new(source: Arc<dyn ReputationSource>) -> Self {
        Self { source }
    }

    pub fn synthetic() -> Self {
        Self::new(Arc::new(SyntheticReputation))
    }
}

#[async_trait]
impl Probe for ReputationProbe {
    type Findings = ReputationFindings;

    fn id(&self) -> ProbeId {
        ProbeId::Reputation
    }

    #[instrument(skip_all, fields(domain = %target.host()))]
    async fn observe(
        &self,
        target: &Target,
    ) -> Result<ProbeResult<ReputationFindings>, ProbeError> {
        let data = self.source.lookup(target.host()).await?;
        Ok(score_reputation(&data))
    }

    fn fallback(&self) -> ProbeResult<ReputationFindings> {
        ProbeResult::degraded(50, ProbeStatus::Warning, ReputationFindings::default())
    }
}

fn score_reputation(data: &ReputationData) -> ProbeResult<ReputationFindings> {
    let mut card = ScoreCard::new(50);

    card.adjust(match data.user_reviews {
        n if n > 1000 => 20,
        n if n > 100 => 15,
        n if n > 10 => 10,
        _ => 0,
    });

    let rating = data.avg_rating;
    card.adjust(if rating >= 4.5 {
        15
    } else if rating >= 4.0 {
        10
    } else if rating >= 3.5 {
        5
    } else if rating < 3.0 {
        -20
    } else {
        0
    });

    card.adjust(match data.fraud_reports {
        n if n > 10 => -30,
        n if n > 5 => -20,
        n if n > 0 => -10,
        _ => 0,
    });

    let findings = ReputationFindings {
        user_reviews: Some(data.user_reviews),
        avg_rating: Some(data.avg_rating),
        fraud_reports: Some(data.fraud_reports),
        synthetic: data.synthetic,
    };
    ProbeResult::observed(card.finish(), findings)
}
