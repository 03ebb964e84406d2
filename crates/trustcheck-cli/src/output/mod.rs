//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use tabled::{settings::Style, Table, Tabled};
use trustcheck::{ProbeStatus, RiskLevel, TrustReport};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render reports as JSON or YAML; one report is a document, several a list.
pub fn serialize(reports: &[TrustReport], format: OutputFormat) -> Result<String> {
    let text = match (format, reports) {
        (OutputFormat::Json, [report]) => serde_json::to_string_pretty(report)?,
        (OutputFormat::Json, _) => serde_json::to_string_pretty(reports)?,
        (OutputFormat::Yaml, [report]) => serde_yaml::to_string(report)?,
        (OutputFormat::Yaml, _) => serde_yaml::to_string(reports)?,
        (OutputFormat::Pretty, _) => reports
            .iter()
            .map(render_pretty)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(text)
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    name: &'static str,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Human-readable report with a table of checks.
pub fn render_pretty(report: &TrustReport) -> String {
    let risk = report.risk_level();
    let mut lines = vec![
        format!(
            "{} {}",
            "Target:".bold(),
            report.target().canonical_url().cyan().bold()
        ),
        format!("  {} {}", "Domain:".bold(), report.target().host()),
        format!(
            "  {} {}  {}",
            "Trust score:".bold(),
            paint(format!("{}/100", report.overall_score()), risk).bold(),
            paint(format!("{risk} risk"), risk)
        ),
        String::new(),
    ];

    let checks = report.checks();
    let rows: Vec<CheckRow> = checks
        .summaries()
        .iter()
        .map(|s| CheckRow {
            name: s.id.label(),
            score: s.score,
            status: status_label(s.status).to_string(),
            note: if s.degraded {
                "incomplete".to_string()
            } else {
                String::new()
            },
        })
        .collect();
    lines.push(Table::new(&rows).with(Style::rounded()).to_string());

    if checks.reputation.findings().synthetic {
        lines.push(
            "Reputation figures are placeholders, not live review data."
                .dimmed()
                .to_string(),
        );
    }

    if !report.red_flags().is_empty() {
        lines.push(String::new());
        lines.push("Red flags:".bold().red().to_string());
        for flag in report.red_flags() {
            lines.push(format!("  {} {}", "-".red(), flag));
        }
    }

    if !report.recommendations().is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".bold().to_string());
        for rec in report.recommendations() {
            lines.push(format!("  {} {}", "-".cyan(), rec));
        }
    }

    lines.push(String::new());
    lines.push(
        format!(
            "Analyzed at {}",
            report.analyzed_at().format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
        .to_string(),
    );

    lines.join("\n")
}

fn paint(text: String, risk: RiskLevel) -> ColoredString {
    match risk {
        RiskLevel::Low => text.green(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::High => text.red(),
    }
}

fn status_label(status: ProbeStatus) -> ColoredString {
    match status {
        ProbeStatus::Pass => "pass".green(),
        ProbeStatus::Warning => "warning".yellow(),
        ProbeStatus::Fail => "fail".red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustcheck::{
        explain, CheckSet, DomainFindings, ProbeResult, ReputationFindings, Target,
    };

    fn sample() -> TrustReport {
        let checks = CheckSet {
            domain_trust: ProbeResult::observed(
                40,
                DomainFindings {
                    age_in_days: Some(12),
                    ..DomainFindings::default()
                },
            ),
            security: ProbeResult::observed(90, Default::default()),
            fraud_indicators: ProbeResult::observed(100, Default::default()),
            content_signals: ProbeResult::degraded(70, ProbeStatus::Warning, Default::default()),
            transparency: ProbeResult::observed(80, Default::default()),
            reputation: ProbeResult::observed(
                65,
                ReputationFindings {
                    synthetic: true,
                    ..ReputationFindings::default()
                },
            ),
        };
        let score = trustcheck::aggregate::overall_score(&checks);
        let risk = trustcheck::aggregate::risk_level(score);
        trustcheck::report::assemble(
            Target::parse("shop.example.com").unwrap(),
            checks.clone(),
            score,
            risk,
            explain(&checks, risk),
            chrono::Utc::now(),
        )
    }

    #[test]
    fn pretty_lists_every_check_and_flag() {
        colored::control::set_override(false);
        let text = render_pretty(&sample());

        assert!(text.contains("https://shop.example.com"));
        for label in [
            "Domain trust",
            "Security",
            "Fraud indicators",
            "Content signals",
            "Transparency",
            "Reputation",
        ] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("incomplete"));
        assert!(text.contains("Domain registered very recently (less than 30 days)"));
        assert!(text.contains("placeholders"));
    }

    #[test]
    fn single_report_is_an_object_and_many_are_a_list() {
        let one = serialize(&[sample()], OutputFormat::Json).unwrap();
        assert!(one.trim_start().starts_with('{'));

        let two = serialize(&[sample(), sample()], OutputFormat::Json).unwrap();
        assert!(two.trim_start().starts_with('['));

        let yaml = serialize(&[sample()], OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("overallScore:"));
    }
}
