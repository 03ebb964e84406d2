//! Concurrent dispatch of all six probes against one target.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};
use trustcheck_core::{CheckSet, Result, Target, TrustError};

use crate::probe::{Probe, ProbeSet};

/// Runs every probe with the same budget and collects a [`CheckSet`]
#[derive(Clone)]
pub struct Orchestrator {
    probes: ProbeSet,
    budget: Duration,
}

impl Orchestrator {
    pub const fn new(probes: ProbeSet, budget: Duration) -> Self {
        Self { probes, budget }
    }

    /// Per-probe time budget
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Run all probes concurrently.
    ///
    /// Probes share the caller's task, so dropping this future cancels any
    /// that are still running. Each probe falls back on its own, so the
    /// result is always complete.
    #[instrument(skip_all, fields(domain = %target.host()))]
    pub async fn assess(&self, target: &Target) -> CheckSet {
        let p = &self.probes;
        let budget = self.budget;

        let (domain_trust, security, fraud_indicators, content_signals, transparency, reputation) = tokio::join!(
            p.domain_trust.run(target, budget),
            p.security.run(target, budget),
            p.fraud_indicators.run(target, budget),
            p.content_signals.run(target, budget),
            p.transparency.run(target, budget),
            p.reputation.run(target, budget),
        );
        debug!("all probes settled");

        CheckSet {
            domain_trust,
            security,
            fraud_indicators,
            content_signals,
            transparency,
            reputation,
        }
    }

    /// Like [`Self::assess`], but abandons every probe once `cancel` completes
    pub async fn assess_until<C>(&self, target: &Target, cancel: C) -> Result<CheckSet>
    where
        C: Future<Output = ()> + Send,
    {
        tokio::select! {
            checks = self.assess(target) => Ok(checks),
            () = cancel => {
                debug!(domain = %target.host(), "assessment cancelled");
                Err(TrustError::Cancelled)
            }
        }
    }
}
