//! The probe capability and its six implementations.
//!
//! A probe observes one category of trust signal. [`Probe::observe`] may
//! fail; [`Probe::run`] never does, because errors, timeouts and panics are
//! turned into the probe's documented fallback there.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{debug, warn};
use trustcheck_core::{
    ContentFindings, DomainFindings, FraudFindings, ProbeId, ProbeResult, ReputationFindings,
    SecurityFindings, Target, TransparencyFindings,
};

use crate::error::ProbeError;

mod content;
mod domain;
mod fraud;
mod reputation;
mod security;
mod transparency;

pub use content::ContentProbe;
pub use domain::DomainProbe;
pub use fraud::FraudProbe;
pub use reputation::{ReputationData, ReputationProbe, ReputationSource, SyntheticReputation};
pub use security::SecurityProbe;
pub use transparency::TransparencyProbe;

/// One category of trust signal
#[async_trait]
pub trait Probe: Send + Sync {
    /// Facts this probe reports
    type Findings: Send;

    /// Which check this probe fills
    fn id(&self) -> ProbeId;

    /// Observe the target. Errors are absorbed by [`Probe::run`].
    async fn observe(&self, target: &Target) -> Result<ProbeResult<Self::Findings>, ProbeError>;

    /// Conservative result used when observation fails or runs out of time
    fn fallback(&self) -> ProbeResult<Self::Findings>;

    /// Observe within `budget`, falling back on error, timeout or panic
    async fn run(&self, target: &Target, budget: Duration) -> ProbeResult<Self::Findings> {
        let id = self.id();
        let observed = AssertUnwindSafe(tokio::time::timeout(budget, self.observe(target)))
            .catch_unwind()
            .await;

        match observed {
            Ok(Ok(Ok(result))) => {
                debug!(probe = %id, score = result.score(), "probe finished");
                result
            }
            Ok(Ok(Err(e))) => {
                warn!(probe = %id, error = %e, "probe failed, using fallback");
                self.fallback()
            }
            Ok(Err(_)) => {
                warn!(probe = %id, ?budget, "probe timed out, using fallback");
                self.fallback()
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(probe = %id, %message, "probe panicked, using fallback");
                self.fallback()
            }
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "internal error".to_string())
}

/// The six probes an assessment runs
#[derive(Clone)]
pub struct ProbeSet {
    pub domain_trust: Arc<dyn Probe<Findings = DomainFindings>>,
    pub security: Arc<dyn Probe<Findings = SecurityFindings>>,
    pub fraud_indicators: Arc<dyn Probe<Findings = FraudFindings>>,
    pub content_signals: Arc<dyn Probe<Findings = ContentFindings>>,
    pub transparency: Arc<dyn Probe<Findings = TransparencyFindings>>,
    pub reputation: Arc<dyn Probe<Findings = ReputationFindings>>,
}
