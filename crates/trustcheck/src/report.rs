//! Final report composition.

use chrono::{DateTime, Utc};
use trustcheck_core::{CheckSet, RiskLevel, Target, TrustReport};

use crate::explain::Explanation;

/// Combine the pipeline's outputs into an immutable report
pub fn assemble(
    target: Target,
    checks: CheckSet,
    overall_score: u8,
    risk_level: RiskLevel,
    explanation: Explanation,
    analyzed_at: DateTime<Utc>,
) -> TrustReport {
    TrustReport::new(
        target,
        checks,
        overall_score,
        risk_level,
        explanation.red_flags,
        explanation.recommendations,
        analyzed_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustcheck_core::ProbeResult;

    #[test]
    fn carries_every_part_through() {
        let target = Target::parse("https://www.example.com/shop").unwrap();
        let checks = CheckSet {
            domain_trust: ProbeResult::observed(90, Default::default()),
            security: ProbeResult::observed(90, Default::default()),
            fraud_indicators: ProbeResult::observed(90, Default::default()),
            content_signals: ProbeResult::observed(90, Default::default()),
            transparency: ProbeResult::observed(90, Default::default()),
            reputation: ProbeResult::observed(90, Default::default()),
        };
        let explanation = Explanation {
            red_flags: vec!["flag".into()],
            recommendations: vec!["advice".into()],
        };
        let at = Utc::now();

        let report = assemble(target.clone(), checks.clone(), 90, RiskLevel::Low, explanation, at);

        assert_eq!(report.target(), &target);
        assert_eq!(report.checks(), &checks);
        assert_eq!(report.overall_score(), 90);
        assert_eq!(report.risk_level(), RiskLevel::Low);
        assert_eq!(report.red_flags(), ["flag"]);
        assert_eq!(report.recommendations(), ["advice"]);
        assert_eq!(report.analyzed_at(), at);
    }
}
