use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use trustcheck_core::{DomainFindings, ProbeId, ProbeResult, ProbeStatus, ScoreCard, Target};
use trustcheck_recon::{HostResolver, ReconError, WhoisInfo, WhoisLookup};

use super::Probe;
use crate::error::ProbeError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Registration age, privacy, expiry and resolvability
pub struct DomainProbe {
    whois: Arc<dyn WhoisLookup>,
    resolver: Arc<dyn HostResolver>,
}

impl DomainProbe {
    pub fn new(whois: Arc<dyn WhoisLookup>, resolver: Arc<dyn HostResolver>) -> Self {
        Self { whois, resolver }
    }

    // Subdomains have no registration of their own; walk up to the parent
    async fn registration(&self, host: &str) -> Result<WhoisInfo, ReconError> {
        let mut name = host;
        loop {
            match self.whois.lookup(name).await {
                Ok(info) => return Ok(info),
                Err(e) => match name.split_once('.') {
                    Some((_, parent)) if parent.contains('.') => {
                        debug!(name, error = %e, "no registration, trying parent domain");
                        name = parent;
                    }
                    _ => return Err(e),
                },
            }
        }
    }

    async fn resolvable(&self, host: &str) -> bool {
        if host.trim_matches(['[', ']']).parse::<IpAddr>().is_ok() {
            return true;
        }
        match self.resolver.resolve_ipv4(host).await {
            Ok(addrs) => !addrs.is_empty(),
            Err(e) => {
                debug!(host, error = %e, "host did not resolve");
                false
            }
        }
    }
}

#[async_trait]
impl Probe for DomainProbe {
    type Findings = DomainFindings;

    fn id(&self) -> ProbeId {
        ProbeId::DomainTrust
    }

    #[instrument(skip_all, fields(domain = %target.host()))]
    async fn observe(&self, target: &Target) -> Result<ProbeResult<DomainFindings>, ProbeError> {
        let host = target.host();
        let (registration, resolvable) =
            tokio::join!(self.registration(host), self.resolvable(host));

        Ok(score_domain(&registration?, resolvable, Utc::now()))
    }

    fn fallback(&self) -> ProbeResult<DomainFindings> {
        ProbeResult::degraded(50, ProbeStatus::Warning, DomainFindings::default())
    }
}

fn score_domain(info: &WhoisInfo, resolvable: bool, now: DateTime<Utc>) -> ProbeResult<DomainFindings> {
    let mut card = ScoreCard::new(100);
    let privacy = info.privacy_protected();

    let age_in_days = info
        .creation_date
        .map(|created| (now - created).num_days().max(0));
    if let Some(age) = age_in_days {
        card.adjust(match age {
            a if a < 30 => -40,
            a if a < 180 => -25,
            a if a < 365 => -15,
            a if a < 730 => -5,
            _ => 0,
        });
    }
    card.adjust_if(privacy && age_in_days.is_some_and(|a| a < 365), -10);

    let days_until_expiry = info.expiration_date.map(|expires| whole_days_between(now, expires));
    card.adjust_if(days_until_expiry.is_some_and(|d| d > 0 && d < 90), -10);

    card.adjust_if(!resolvable, -30);

    let findings = DomainFindings {
        age: age_in_days.map(format_age),
        age_in_days,
        registrar: info.registrar.clone(),
        whois_privacy: Some(privacy),
        creation_date: info.creation_date,
        expiration_date: info.expiration_date,
        days_until_expiry,
        resolvable: Some(resolvable),
    };
    ProbeResult::observed(card.finish(), findings)
}

/// Days from `from` to `to`, rounded up
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let secs = (to - from).num_seconds();
    (secs + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

/// "12 days", "3 months", "2 years 1 month"
fn format_age(days: i64) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }

    if days < 30 {
        return plural(days, "day");
    }
    if days < 365 {
        return plural(days / 30, "month");
    }
    let years = plural(days / 365, "year");
    match (days % 365) / 30 {
        0 => years,
        months => format!("{years} {}", plural(months, "month")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    use chrono::Duration as Days;
    use trustcheck_recon::{ReconResult, RegistrantInfo};

    struct FixedWhois(Option<WhoisInfo>);

    #[async_trait]
    impl WhoisLookup for FixedWhois {
        async fn lookup(&self, domain: &str) -> ReconResult<WhoisInfo> {
            self.0
                .clone()
                .ok_or_else(|| ReconError::Whois(format!("no data for {domain}")))
        }
    }

    /// Only answers for one exact name
    struct ApexOnlyWhois(&'static str, WhoisInfo);

    #[async_trait]
    impl WhoisLookup for ApexOnlyWhois {
        async fn lookup(&self, domain: &str) -> ReconResult<WhoisInfo> {
            if domain == self.0 {
                Ok(self.1.clone())
            } else {
                Err(ReconError::Whois("not found".into()))
            }
        }
    }

    struct FixedResolver(bool);

    #[async_trait]
    impl HostResolver for FixedResolver {
        async fn resolve_ipv4(&self, host: &str) -> ReconResult<Vec<Ipv4Addr>> {
            if self.0 {
                Ok(vec![Ipv4Addr::new(93, 184, 216, 34)])
            } else {
                Err(ReconError::Dns(format!("NXDOMAIN {host}")))
            }
        }
    }

    fn registered(days_ago: i64) -> WhoisInfo {
        WhoisInfo {
            registrar: Some("Example Registrar".into()),
            creation_date: Some(Utc::now() - Days::days(days_ago)),
            expiration_date: Some(Utc::now() + Days::days(400)),
            ..WhoisInfo::default()
        }
    }

    fn probe(whois: Option<WhoisInfo>, resolves: bool) -> DomainProbe {
        DomainProbe::new(Arc::new(FixedWhois(whois)), Arc::new(FixedResolver(resolves)))
    }

    #[test]
    fn age_penalties() {
        let now = Utc::now();
        let score = |days| score_domain(&registered(days), true, now).score();
        assert_eq!(score(10), 60);
        assert_eq!(score(100), 75);
        assert_eq!(score(300), 85);
        assert_eq!(score(500), 95);
        assert_eq!(score(3000), 100);
    }

    #[test]
    fn privacy_only_matters_for_young_domains() {
        let now = Utc::now();
        let mut young = registered(100);
        young.registrant = RegistrantInfo {
            name: Some("REDACTED FOR PRIVACY".into()),
            organization: None,
        };
        let result = score_domain(&young, true, now);
        assert_eq!(result.score(), 65);
        assert_eq!(result.findings().whois_privacy, Some(true));

        let mut old = registered(3000);
        old.registrant = young.registrant.clone();
        assert_eq!(score_domain(&old, true, now).score(), 100);
    }

    #[test]
    fn expiring_soon_and_unresolvable() {
        let now = Utc::now();
        let mut info = registered(3000);
        info.expiration_date = Some(now + Days::days(30));
        let result = score_domain(&info, false, now);
        assert_eq!(result.score(), 60);
        assert_eq!(result.findings().days_until_expiry, Some(30));
        assert_eq!(result.findings().resolvable, Some(false));
        assert_eq!(result.status(), ProbeStatus::Warning);
    }

    #[test]
    fn unknown_dates_are_not_penalized() {
        let info = WhoisInfo {
            registrar: Some("R".into()),
            ..WhoisInfo::default()
        };
        let result = score_domain(&info, true, Utc::now());
        assert_eq!(result.score(), 100);
        assert!(result.findings().age_in_days.is_none());
        assert!(result.findings().age.is_none());
    }

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(1), "1 day");
        assert_eq!(format_age(12), "12 days");
        assert_eq!(format_age(45), "1 month");
        assert_eq!(format_age(200), "6 months");
        assert_eq!(format_age(365), "1 year");
        assert_eq!(format_age(800), "2 years 2 months");
    }

    #[test]
    fn day_rounding() {
        let now = Utc::now();
        assert_eq!(whole_days_between(now, now + Days::hours(1)), 1);
        assert_eq!(whole_days_between(now, now + Days::days(2)), 2);
        assert_eq!(whole_days_between(now, now - Days::hours(25)), -1);
    }

    #[tokio::test]
    async fn missing_registration_degrades() {
        let target = Target::parse("example.com").unwrap();
        let result = probe(None, true).run(&target, Duration::from_secs(1)).await;
        assert!(result.is_degraded());
        assert_eq!(result.score(), 50);
        assert_eq!(result.status(), ProbeStatus::Warning);
    }

    #[tokio::test]
    async fn subdomain_uses_parent_registration() {
        let probe = DomainProbe::new(
            Arc::new(ApexOnlyWhois("example.com", registered(3000))),
            Arc::new(FixedResolver(true)),
        );
        let target = Target::parse("shop.example.com").unwrap();
        let result = probe.run(&target, Duration::from_secs(1)).await;
        assert!(!result.is_degraded());
        assert_eq!(result.score(), 100);
    }

    #[tokio::test]
    async fn observed_result_is_not_degraded() {
        let target = Target::parse("example.com").unwrap();
        let result = probe(Some(registered(10)), false).run(&target, Duration::from_secs(1)).await;
        assert!(!result.is_degraded());
        assert_eq!(result.score(), 30);
        assert_eq!(result.findings().age_in_days, Some(10));
    }
}
