//! The public assessment entry point.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::FutureExt;
use tracing::{error, info, instrument};
use trustcheck_core::{Result, Target, TrustError, TrustReport};
use trustcheck_intel::{
    ClientConfig, RateLimitConfig, SafeBrowsingClient, ThreatSource, VirusTotalClient,
};
use trustcheck_recon::{CertificateInspector, DnsResolver, HttpFetcher, WhoisClient};

use crate::aggregate;
use crate::config::EngineConfig;
use crate::explain::explain;
use crate::orchestrator::Orchestrator;
use crate::probe::{
    panic_message, ContentProbe, DomainProbe, FraudProbe, ProbeSet, ReputationProbe, SecurityProbe,
    TransparencyProbe,
};
use crate::report;

/// Assesses websites and produces [`TrustReport`]s.
///
/// Cheap to clone; clones share the same probes and network clients.
/// Independent assessments may run concurrently.
#[derive(Clone)]
pub struct TrustEngine {
    orchestrator: Arc<Orchestrator>,
}

impl TrustEngine {
    /// Build an engine with live network probes
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let timeout = config.http_timeout();
        let whois = Arc::new(
            WhoisClient::new(config.whois_server.clone(), config.whois_follow, timeout)
                .map_err(config_error)?,
        );
        let resolver = Arc::new(DnsResolver::new().map_err(config_error)?);
        let tls = Arc::new(CertificateInspector::new(timeout).map_err(config_error)?);
        let fetcher =
            Arc::new(HttpFetcher::new(timeout, &config.user_agent).map_err(config_error)?);

        let client_config = ClientConfig::default()
            .timeout(timeout)
            .rate_limit(RateLimitConfig {
                requests_per_second: config.intel.requests_per_second.max(1),
                burst_size: config.intel.requests_per_second.max(1),
            });
        let mut sources: Vec<Arc<dyn ThreatSource>> = Vec::new();
        if let Some(key) = &config.intel.safe_browsing_key {
            let client = SafeBrowsingClient::with_config(key.clone(), client_config.clone())
                .map_err(config_error)?;
            sources.push(Arc::new(client));
        }
        if let Some(key) = &config.intel.virustotal_key {
            let client = VirusTotalClient::with_config(key.clone(), client_config)
                .map_err(config_error)?;
            sources.push(Arc::new(client));
        }
        if sources.is_empty() {
            info!("no threat-intelligence keys configured, fraud checks use URL heuristics only");
        }

        let probes = ProbeSet {
            domain_trust: Arc::new(DomainProbe::new(whois, resolver)),
            security: Arc::new(SecurityProbe::new(tls, fetcher.clone())),
            fraud_indicators: Arc::new(FraudProbe::new(sources)),
            content_signals: Arc::new(ContentProbe::new(fetcher.clone())),
            transparency: Arc::new(TransparencyProbe::new(fetcher)),
            reputation: Arc::new(ReputationProbe::synthetic()),
        };

        Ok(Self::with_probes(probes, config.probe_budget()))
    }

    /// Build an engine around caller-supplied probes
    pub fn with_probes(probes: ProbeSet, budget: Duration) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(probes, budget)),
        }
    }

    /// Per-probe time budget
    pub fn budget(&self) -> Duration {
        self.orchestrator.budget()
    }

    /// Assess a raw user-supplied URL or host name
    pub async fn assess_target(&self, raw: &str) -> Result<TrustReport> {
        self.assess_target_until(raw, std::future::pending()).await
    }

    /// Like [`Self::assess_target`], but gives up with
    /// [`TrustError::Cancelled`] once `cancel` completes
    #[instrument(skip(self, cancel))]
    pub async fn assess_target_until<C>(&self, raw: &str, cancel: C) -> Result<TrustReport>
    where
        C: Future<Output = ()> + Send,
    {
        let target = Target::parse(raw)?;

        let pipeline = async {
            let checks = self.orchestrator.assess_until(&target, cancel).await?;
            let score = aggregate::overall_score(&checks);
            let risk = aggregate::risk_level(score);
            let explanation = explain(&checks, risk);
            Ok::<_, TrustError>((checks, score, risk, explanation))
        };

        let (checks, score, risk, explanation) = match AssertUnwindSafe(pipeline)
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome?,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(domain = %target.host(), %message, "assessment panicked");
                return Err(TrustError::Assessment(message));
            }
        };

        info!(
            domain = %target.host(),
            score,
            risk = %risk,
            degraded = checks.any_degraded(),
            "assessment complete"
        );
        Ok(report::assemble(
            target,
            checks,
            score,
            risk,
            explanation,
            Utc::now(),
        ))
    }
}

fn config_error(e: impl std::fmt::Display) -> TrustError {
    TrustError::Config(e.to_string())
}
