use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{instrument, warn};
use trustcheck_core::{FraudFindings, ProbeId, ProbeResult, ProbeStatus, ScoreCard, Target};
use trustcheck_intel::{ThreatSource, ThreatVerdict};

use super::Probe;
use crate::error::ProbeError;

const SUSPICIOUS_KEYWORDS: [&str; 10] = [
    "verify", "suspend", "urgent", "confirm", "update", "secure", "account", "login", "signin",
    "wallet",
];

const IMPERSONATED_BRANDS: [&str; 8] = [
    "google",
    "facebook",
    "amazon",
    "paypal",
    "microsoft",
    "apple",
    "netflix",
    "instagram",
];

const CHARACTER_SWAPS: [(char, char); 5] = [('o', '0'), ('l', '1'), ('i', '1'), ('a', '4'), ('e', '3')];

/// Blacklist membership and lexical phishing heuristics
pub struct FraudProbe {
    sources: Vec<Arc<dyn ThreatSource>>,
}

impl FraudProbe {
    /// Create with the configured threat sources; an empty list checks only the host name
    pub fn new(sources: Vec<Arc<dyn ThreatSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl Probe for FraudProbe {
    type Findings = FraudFindings;

    fn id(&self) -> ProbeId {
        ProbeId::FraudIndicators
    }

    #[instrument(skip_all, fields(domain = %target.host(), sources = self.sources.len()))]
    async fn observe(&self, target: &Target) -> Result<ProbeResult<FraudFindings>, ProbeError> {
        let lookups = self
            .sources
            .iter()
            .map(|source| source.check(target.canonical_url(), target.host()));

        let verdicts: Vec<ThreatVerdict> = join_all(lookups)
            .await
            .into_iter()
            .zip(&self.sources)
            .filter_map(|(outcome, source)| match outcome {
                Ok(verdict) => Some(verdict),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "threat source failed, skipping");
                    None
                }
            })
            .collect();

        Ok(score_fraud(&verdicts, target.host()))
    }

    fn fallback(&self) -> ProbeResult<FraudFindings> {
        ProbeResult::degraded(70, ProbeStatus::Warning, FraudFindings::default())
    }
}

fn score_fraud(verdicts: &[ThreatVerdict], host: &str) -> ProbeResult<FraudFindings> {
    let mut card = ScoreCard::new(100);
    let mut findings = FraudFindings::default();
    let mut phishing = false;
    let mut malware = false;

    for verdict in verdicts {
        if verdict.listed {
            findings.blacklist_sources.push(verdict.source.clone());
            if verdict.malicious > 0 {
                card.adjust(-(verdict.malicious.saturating_mul(10).min(50) as i32));
            } else {
                card.adjust(-60);
            }
        }
        if verdict.suspicious > 2 {
            card.adjust(-(verdict.suspicious.min(20) as i32) * 5);
        }
        phishing |= verdict.phishing;
        malware |= verdict.malware;
    }

    let host = host.to_lowercase();
    let suspicious_keyword = SUSPICIOUS_KEYWORDS.iter().any(|k| host.contains(k));
    let brand_lookalike = is_brand_lookalike(&host);
    let excessive_hyphens = host.matches('-').count() > 2;
    let lexical = suspicious_keyword || brand_lookalike || excessive_hyphens;
    card.adjust_if(lexical, -20);

    findings.blacklisted = Some(!findings.blacklist_sources.is_empty());
    findings.phishing_patterns = Some(phishing || lexical);
    findings.malware_detected = Some(malware);
    findings.suspicious_keyword = Some(suspicious_keyword);
    findings.brand_lookalike = Some(brand_lookalike);
    findings.excessive_hyphens = Some(excessive_hyphens);

    ProbeResult::observed(card.finish(), findings)
}

/// Host imitates a well-known brand without being that brand's own domain
fn is_brand_lookalike(host: &str) -> bool {
    IMPERSONATED_BRANDS.iter().any(|brand| {
        let official = format!("{brand}.com");
        if host == official || host.ends_with(&format!(".{official}")) {
            return false;
        }

        let swapped = CHARACTER_SWAPS
            .iter()
            .filter(|(from, _)| brand.contains(*from))
            .map(|(from, to)| brand.replacen(*from, &to.to_string(), 1));
        let decorated = ["-", "secure", "verify"]
            .iter()
            .map(|suffix| format!("{brand}{suffix}"));

        swapped.chain(decorated).any(|variant| host.contains(&variant))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use trustcheck_intel::{IntelError, IntelResult};

    fn listed(source: &str, malicious: u32, suspicious: u32) -> ThreatVerdict {
        ThreatVerdict {
            source: source.into(),
            listed: malicious > 0 || source == "Google Safe Browsing",
            malware: malicious > 0,
            malicious,
            suspicious,
            ..ThreatVerdict::default()
        }
    }

    #[test]
    fn clean_host_scores_full() {
        let result = score_fraud(&[], "example.com");
        assert_eq!(result.score(), 100);
        let f = result.findings();
        assert_eq!(f.blacklisted, Some(false));
        assert_eq!(f.phishing_patterns, Some(false));
        assert!(f.blacklist_sources.is_empty());
    }

    #[test]
    fn safe_browsing_listing() {
        let mut verdict = listed("Google Safe Browsing", 0, 0);
        verdict.phishing = true;
        let result = score_fraud(&[verdict], "example.com");
        assert_eq!(result.score(), 40);
        assert_eq!(result.findings().blacklist_sources, ["Google Safe Browsing"]);
        assert_eq!(result.findings().phishing_patterns, Some(true));
    }

    #[test]
    fn virustotal_penalty_is_capped() {
        let result = score_fraud(&[listed("VirusTotal", 3, 0)], "example.com");
        assert_eq!(result.score(), 70);
        let result = score_fraud(&[listed("VirusTotal", 9, 4)], "example.com");
        assert_eq!(result.score(), 30);
        assert_eq!(result.findings().malware_detected, Some(true));
    }

    #[test]
    fn lexical_penalty_applies_once() {
        let result = score_fraud(&[], "secure-login-verify-paypa1.com");
        assert_eq!(result.score(), 80);
        let f = result.findings();
        assert_eq!(f.suspicious_keyword, Some(true));
        assert_eq!(f.brand_lookalike, Some(true));
        assert_eq!(f.excessive_hyphens, Some(true));
        assert_eq!(f.blacklisted, Some(false));
    }

    #[test]
    fn lookalikes() {
        assert!(is_brand_lookalike("paypa1.com"));
        assert!(is_brand_lookalike("g0ogle.net"));
        assert!(is_brand_lookalike("amaz0n-deals.shop"));
        assert!(is_brand_lookalike("applesecure.io"));
        assert!(is_brand_lookalike("netfl1x.tv"));
        assert!(!is_brand_lookalike("google.com"));
        assert!(!is_brand_lookalike("mail.google.com"));
        assert!(!is_brand_lookalike("example.org"));
    }

    struct Failing;

    #[async_trait]
    impl ThreatSource for Failing {
        fn name(&self) -> &'static str {
            "Broken"
        }

        async fn check(&self, _url: &str, _domain: &str) -> IntelResult<ThreatVerdict> {
            Err(IntelError::Timeout)
        }
    }

    struct Listing;

    #[async_trait]
    impl ThreatSource for Listing {
        fn name(&self) -> &'static str {
            "VirusTotal"
        }

        async fn check(&self, _url: &str, _domain: &str) -> IntelResult<ThreatVerdict> {
            Ok(listed("VirusTotal", 2, 0))
        }
    }

    #[tokio::test]
    async fn failing_source_is_skipped() {
        let probe = FraudProbe::new(vec![Arc::new(Failing), Arc::new(Listing)]);
        let target = Target::parse("example.com").unwrap();
        let result = probe.run(&target, Duration::from_secs(1)).await;
        assert!(!result.is_degraded());
        assert_eq!(result.score(), 80);
        assert_eq!(result.findings().blacklist_sources, ["VirusTotal"]);
    }

    #[tokio::test]
    async fn no_sources_checks_host_only() {
        let probe = FraudProbe::new(Vec::new());
        let target = Target::parse("example.com").unwrap();
        let result = probe.run(&target, Duration::from_secs(1)).await;
        assert_eq!(result.score(), 100);
        assert!(!result.is_degraded());
    }
}
