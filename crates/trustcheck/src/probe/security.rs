use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use trustcheck_core::{ProbeId, ProbeResult, ProbeStatus, ScoreCard, SecurityFindings, Target};
use trustcheck_recon::{HeadInfo, PageFetcher, ReconResult, TlsInfo, TlsInspector};
use url::{Host, Url};

use super::Probe;
use crate::error::ProbeError;

/// Transport security: scheme, certificate, HSTS and protocol version
pub struct SecurityProbe {
    tls: Arc<dyn TlsInspector>,
    fetcher: Arc<dyn PageFetcher>,
}

impl SecurityProbe {
    pub fn new(tls: Arc<dyn TlsInspector>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { tls, fetcher }
    }
}

#[async_trait]
impl Probe for SecurityProbe {
    type Findings = SecurityFindings;

    fn id(&self) -> ProbeId {
        ProbeId::Security
    }

    #[instrument(skip_all, fields(domain = %target.host()))]
    async fn observe(&self, target: &Target) -> Result<ProbeResult<SecurityFindings>, ProbeError> {
        if !target.is_https() {
            let findings = SecurityFindings {
                https: Some(false),
                ..SecurityFindings::default()
            };
            return Ok(ProbeResult::observed(0, findings));
        }

        let url = Url::parse(target.canonical_url())
            .map_err(|e| ProbeError::Unavailable(format!("unusable URL: {e}")))?;
        let (host, port) = tls_endpoint(&url)
            .ok_or_else(|| ProbeError::Unavailable("URL has no host".into()))?;

        let (tls, head) = tokio::join!(
            self.tls.inspect(&host, port),
            self.fetcher.head(target.canonical_url())
        );

        if let (Err(tls_err), Err(_)) = (&tls, &head) {
            return Err(ProbeError::Unavailable(format!("endpoint unreachable: {tls_err}")));
        }

        Ok(score_security(tls, head, Utc::now()))
    }

    fn fallback(&self) -> ProbeResult<SecurityFindings> {
        ProbeResult::degraded(0, ProbeStatus::Fail, SecurityFindings::default())
    }
}

/// Host and port to handshake with; IPv6 literals lose their URL brackets
fn tls_endpoint(url: &Url) -> Option<(String, u16)> {
    let host = match url.host()? {
        Host::Domain(domain) => domain.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    Some((host, url.port_or_known_default().unwrap_or(443)))
}

fn score_security(
    tls: ReconResult<TlsInfo>,
    head: ReconResult<HeadInfo>,
    now: DateTime<Utc>,
) -> ProbeResult<SecurityFindings> {
    let mut card = ScoreCard::new(0);
    let mut findings = SecurityFindings {
        https: Some(true),
        ..SecurityFindings::default()
    };
    card.adjust(30);

    match tls {
        Ok(info) => {
            findings.ssl_valid = Some(info.verified);
            card.adjust(if info.verified { 25 } else { -20 });

            if let Some(days) = info.days_remaining(now) {
                findings.cert_expiry_days = Some(days);
                card.adjust(match days {
                    d if d > 60 => 10,
                    d if d > 30 => 5,
                    _ => 0,
                });
            }

            card.adjust(match info.protocol.as_deref() {
                Some("TLSv1.3") => 15,
                Some("TLSv1.2") => 10,
                _ => 0,
            });
            findings.tls_version = info.protocol;
            findings.cert_issuer = info.issuer;
        }
        Err(e) => debug!(error = %e, "certificate inspection failed"),
    }

    match head {
        Ok(head) => {
            findings.hsts = Some(head.hsts);
            card.adjust_if(head.hsts, 10);
        }
        Err(e) => debug!(error = %e, "header probe failed"),
    }

    ProbeResult::observed(card.finish(), findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Duration as Days;
    use trustcheck_recon::{Page, ReconError};

    #[test]
    fn tls_endpoint_strips_ipv6_brackets() {
        let url = Url::parse("https://[::1]:8443/login").unwrap();
        assert_eq!(tls_endpoint(&url), Some(("::1".to_string(), 8443)));

        let url = Url::parse("https://192.0.2.7/").unwrap();
        assert_eq!(tls_endpoint(&url), Some(("192.0.2.7".to_string(), 443)));

        let url = Url::parse("https://shop.example.com/").unwrap();
        assert_eq!(tls_endpoint(&url), Some(("shop.example.com".to_string(), 443)));
    }

    fn tls(verified: bool, protocol: &str, days: i64, now: DateTime<Utc>) -> ReconResult<TlsInfo> {
        Ok(TlsInfo {
            verified,
            protocol: Some(protocol.to_string()),
            not_after: Some(now + Days::days(days) + Days::hours(1)),
            issuer: Some("Let's Encrypt".into()),
        })
    }

    #[test]
    fn best_case_is_full_marks() {
        let now = Utc::now();
        let result = score_security(tls(true, "TLSv1.3", 90, now), Ok(HeadInfo { hsts: true }), now);
        assert_eq!(result.score(), 90);
        assert_eq!(result.status(), ProbeStatus::Pass);
        let f = result.findings();
        assert_eq!(f.ssl_valid, Some(true));
        assert_eq!(f.tls_version.as_deref(), Some("TLSv1.3"));
        assert_eq!(f.cert_expiry_days, Some(90));
        assert_eq!(f.cert_issuer.as_deref(), Some("Let's Encrypt"));
    }

    #[test]
    fn short_lived_tls12_without_hsts() {
        let now = Utc::now();
        let result = score_security(tls(true, "TLSv1.2", 45, now), Ok(HeadInfo { hsts: false }), now);
        assert_eq!(result.score(), 70);
        assert_eq!(result.findings().hsts, Some(false));
    }

    #[test]
    fn rejected_certificate() {
        let now = Utc::now();
        let rejected = Ok(TlsInfo::default());
        let result = score_security(rejected, Ok(HeadInfo { hsts: false }), now);
        assert_eq!(result.score(), 10);
        assert_eq!(result.findings().ssl_valid, Some(false));
        assert!(result.findings().tls_version.is_none());
    }

    #[test]
    fn failed_inspection_leaves_facts_unknown() {
        let now = Utc::now();
        let result = score_security(Err(ReconError::Timeout), Ok(HeadInfo { hsts: true }), now);
        assert_eq!(result.score(), 40);
        assert!(result.findings().ssl_valid.is_none());
    }

    struct NoTls;

    #[async_trait]
    impl TlsInspector for NoTls {
        async fn inspect(&self, _host: &str, _port: u16) -> ReconResult<TlsInfo> {
            Err(ReconError::Timeout)
        }
    }

    struct NoHttp;

    #[async_trait]
    impl PageFetcher for NoHttp {
        async fn fetch(&self, url: &str) -> ReconResult<Page> {
            Err(ReconError::Http(format!("{url} refused")))
        }

        async fn head(&self, url: &str) -> ReconResult<HeadInfo> {
            Err(ReconError::Http(format!("{url} refused")))
        }
    }

    #[tokio::test]
    async fn plain_http_fails_without_network() {
        let probe = SecurityProbe::new(Arc::new(NoTls), Arc::new(NoHttp));
        let target = Target::parse("http://example.com").unwrap();
        let result = probe.run(&target, Duration::from_secs(1)).await;
        assert_eq!(result.score(), 0);
        assert_eq!(result.status(), ProbeStatus::Fail);
        assert!(!result.is_degraded());
        assert_eq!(result.findings().https, Some(false));
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades() {
        let probe = SecurityProbe::new(Arc::new(NoTls), Arc::new(NoHttp));
        let target = Target::parse("example.com").unwrap();
        let result = probe.run(&target, Duration::from_secs(1)).await;
        assert!(result.is_degraded());
        assert_eq!(result.score(), 0);
        assert!(result.findings().https.is_none());
    }
}
