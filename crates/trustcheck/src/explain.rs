//! Red flags and recommendations derived from a [`CheckSet`].
//!
//! Both lists come from fixed, ordered rule tables. A rule only fires on a
//! fact that was actually observed; unknown facts keep it silent.

use trustcheck_core::{CheckSet, RiskLevel};

/// Ordered user-facing statements about one assessment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
}

type Rule = fn(&CheckSet) -> Option<String>;

const RED_FLAG_RULES: [Rule; 10] = [
    domain_age,
    missing_https,
    invalid_certificate,
    blacklisted,
    phishing_patterns,
    malware,
    missing_privacy_policy,
    missing_contact_info,
    fake_offers,
    fraud_reports,
];

const RECOMMENDATION_RULES: [Rule; 4] = [
    avoid_plain_http,
    note_missing_privacy_policy,
    avoid_blacklisted,
    incomplete_assessment,
];

/// Evaluate both rule tables against the checks and band
pub fn explain(checks: &CheckSet, risk: RiskLevel) -> Explanation {
    let red_flags = RED_FLAG_RULES.iter().filter_map(|rule| rule(checks)).collect();

    let mut recommendations: Vec<String> = band_guidance(risk)
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    recommendations.extend(RECOMMENDATION_RULES.iter().filter_map(|rule| rule(checks)));

    Explanation {
        red_flags,
        recommendations,
    }
}

fn band_guidance(risk: RiskLevel) -> &'static [&'static str] {
    match risk {
        RiskLevel::High => &[
            "Exercise extreme caution when interacting with this website",
            "Do not enter personal or financial information",
            "Consider reporting this website if it appears fraudulent",
        ],
        RiskLevel::Medium => &[
            "Proceed with caution when using this website",
            "Verify the legitimacy before making any purchases",
            "Check for customer reviews from trusted sources",
        ],
        RiskLevel::Low => &[],
    }
}

fn flag(condition: bool, message: &str) -> Option<String> {
    condition.then(|| message.to_string())
}

// Younger rule first; at most one age flag
fn domain_age(checks: &CheckSet) -> Option<String> {
    match checks.domain_trust.findings().age_in_days? {
        age if age < 30 => Some("Domain registered very recently (less than 30 days)".into()),
        age if age < 180 => Some("Domain is relatively new (less than 6 months)".into()),
        _ => None,
    }
}

fn missing_https(checks: &CheckSet) -> Option<String> {
    flag(
        checks.security.findings().https == Some(false),
        "Website does not use HTTPS encryption",
    )
}

fn invalid_certificate(checks: &CheckSet) -> Option<String> {
    flag(
        checks.security.findings().ssl_valid == Some(false),
        "SSL certificate is invalid or expired",
    )
}

fn blacklisted(checks: &CheckSet) -> Option<String> {
    let findings = checks.fraud_indicators.findings();
    (findings.blacklisted == Some(true)).then(|| {
        format!(
            "Website appears on security blacklists: {}",
            findings.blacklist_sources.join(", ")
        )
    })
}

fn phishing_patterns(checks: &CheckSet) -> Option<String> {
    flag(
        checks.fraud_indicators.findings().phishing_patterns == Some(true),
        "Potential phishing patterns detected",
    )
}

fn malware(checks: &CheckSet) -> Option<String> {
    flag(
        checks.fraud_indicators.findings().malware_detected == Some(true),
        "Malware or malicious content detected",
    )
}

fn missing_privacy_policy(checks: &CheckSet) -> Option<String> {
    flag(
        checks.transparency.findings().privacy_policy == Some(false),
        "No privacy policy found",
    )
}

fn missing_contact_info(checks: &CheckSet) -> Option<String> {
    flag(
        checks.transparency.findings().contact_info == Some(false),
        "No contact information available",
    )
}

fn fake_offers(checks: &CheckSet) -> Option<String> {
    flag(
        checks.content_signals.findings().fake_offers == Some(true),
        "Suspicious promotional content detected",
    )
}

fn fraud_reports(checks: &CheckSet) -> Option<String> {
    checks
        .reputation
        .findings()
        .fraud_reports
        .filter(|n| *n > 5)
        .map(|n| format!("Multiple fraud reports found ({n})"))
}

fn avoid_plain_http(checks: &CheckSet) -> Option<String> {
    flag(
        checks.security.findings().https == Some(false),
        "Avoid entering sensitive information without HTTPS",
    )
}

fn note_missing_privacy_policy(checks: &CheckSet) -> Option<String> {
    flag(
        checks.transparency.findings().privacy_policy == Some(false),
        "Be aware that there is no privacy policy",
    )
}

fn avoid_blacklisted(checks: &CheckSet) -> Option<String> {
    flag(
        checks.fraud_indicators.findings().blacklisted == Some(true),
        "This website is flagged by security services - avoid use",
    )
}

fn incomplete_assessment(checks: &CheckSet) -> Option<String> {
    flag(
        checks.any_degraded(),
        "Some checks could not be completed; treat this assessment as incomplete",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustcheck_core::{
        DomainFindings, FraudFindings, ProbeResult, ProbeStatus, ReputationFindings,
        SecurityFindings, TransparencyFindings,
    };

    fn clean() -> CheckSet {
        CheckSet {
            domain_trust: ProbeResult::observed(100, Default::default()),
            security: ProbeResult::observed(100, Default::default()),
            fraud_indicators: ProbeResult::observed(100, Default::default()),
            content_signals: ProbeResult::observed(100, Default::default()),
            transparency: ProbeResult::observed(100, Default::default()),
            reputation: ProbeResult::observed(100, Default::default()),
        }
    }

    fn aged(days: i64) -> CheckSet {
        let mut checks = clean();
        checks.domain_trust = ProbeResult::observed(
            60,
            DomainFindings {
                age_in_days: Some(days),
                ..DomainFindings::default()
            },
        );
        checks
    }

    #[test]
    fn no_findings_no_statements() {
        let explanation = explain(&clean(), RiskLevel::Low);
        assert!(explanation.red_flags.is_empty());
        assert!(explanation.recommendations.is_empty());
    }

    #[test]
    fn young_domain_gets_exactly_one_age_flag() {
        let flags = explain(&aged(10), RiskLevel::Low).red_flags;
        assert_eq!(flags, ["Domain registered very recently (less than 30 days)"]);

        let flags = explain(&aged(90), RiskLevel::Low).red_flags;
        assert_eq!(flags, ["Domain is relatively new (less than 6 months)"]);

        assert!(explain(&aged(400), RiskLevel::Low).red_flags.is_empty());
    }

    #[test]
    fn flags_follow_table_order() {
        let mut checks = aged(5);
        checks.security = ProbeResult::observed(
            0,
            SecurityFindings {
                https: Some(false),
                ..SecurityFindings::default()
            },
        );
        checks.fraud_indicators = ProbeResult::observed(
            20,
            FraudFindings {
                blacklisted: Some(true),
                blacklist_sources: vec!["Google Safe Browsing".into(), "VirusTotal".into()],
                phishing_patterns: Some(true),
                malware_detected: Some(false),
                ..FraudFindings::default()
            },
        );
        checks.transparency = ProbeResult::observed(
            25,
            TransparencyFindings {
                privacy_policy: Some(false),
                contact_info: Some(true),
                ..TransparencyFindings::default()
            },
        );
        checks.reputation = ProbeResult::observed(
            30,
            ReputationFindings {
                fraud_reports: Some(8),
                ..ReputationFindings::default()
            },
        );

        let explanation = explain(&checks, RiskLevel::High);
        assert_eq!(
            explanation.red_flags,
            [
                "Domain registered very recently (less than 30 days)",
                "Website does not use HTTPS encryption",
                "Website appears on security blacklists: Google Safe Browsing, VirusTotal",
                "Potential phishing patterns detected",
                "No privacy policy found",
                "Multiple fraud reports found (8)",
            ]
        );
        assert_eq!(
            explanation.recommendations,
            [
                "Exercise extreme caution when interacting with this website",
                "Do not enter personal or financial information",
                "Consider reporting this website if it appears fraudulent",
                "Avoid entering sensitive information without HTTPS",
                "Be aware that there is no privacy policy",
                "This website is flagged by security services - avoid use",
            ]
        );
    }

    #[test]
    fn medium_band_boilerplate() {
        let recommendations = explain(&clean(), RiskLevel::Medium).recommendations;
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0], "Proceed with caution when using this website");
    }

    #[test]
    fn degraded_probe_marks_assessment_incomplete() {
        let mut checks = clean();
        checks.content_signals =
            ProbeResult::degraded(70, ProbeStatus::Warning, Default::default());
        let explanation = explain(&checks, RiskLevel::Low);
        assert!(explanation.red_flags.is_empty());
        assert_eq!(
            explanation.recommendations,
            ["Some checks could not be completed; treat this assessment as incomplete"]
        );
    }

    #[test]
    fn few_fraud_reports_are_not_flagged() {
        let mut checks = clean();
        checks.reputation = ProbeResult::observed(
            40,
            ReputationFindings {
                fraud_reports: Some(5),
                ..ReputationFindings::default()
            },
        );
        assert!(explain(&checks, RiskLevel::Low).red_flags.is_empty());
    }
}
