//! Facts observed by each probe.
//!
//! Every fact is optional: `None` means the probe did not observe it,
//! which keeps explanation rules silent rather than guessing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration and resolvability facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFindings {
    /// Human-readable registration age ("3 months", "2 years 4 months")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    /// Days since registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_in_days: Option<i64>,

    /// Registrar of record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,

    /// Registrant details hidden behind a privacy service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whois_privacy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Days until the registration lapses (negative once expired)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,

    /// Host resolves to at least one IPv4 address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolvable: Option<bool>,
}

/// Transport security facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFindings {
    /// Target is served over https
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,

    /// Certificate chain verified against the web PKI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_valid: Option<bool>,

    /// Negotiated protocol, e.g. "TLSv1.3"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<String>,

    /// Days until the leaf certificate expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_expiry_days: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_issuer: Option<String>,

    /// `Strict-Transport-Security` header present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsts: Option<bool>,
}

/// Blacklist membership and lexical phishing facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudFindings {
    /// Listed by at least one threat-intelligence source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<bool>,

    /// Names of the sources that list the target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blacklist_sources: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phishing_patterns: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malware_detected: Option<bool>,

    /// Host contains a credential-bait keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious_keyword: Option<bool>,

    /// Host imitates a well-known brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_lookalike: Option<bool>,

    /// More than two hyphens in the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excessive_hyphens: Option<bool>,
}

/// Writing quality judged from capitalization and punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrammarQuality {
    Good,
    Fair,
    Poor,
}

/// Page content heuristics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_language: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_offers: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_quality: Option<GrammarQuality>,

    /// Share of letters in the visible text that are uppercase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caps_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_logo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_navigation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_footer: Option<bool>,

    /// Logo, navigation and footer all present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_design: Option<bool>,
}

/// Operator transparency affordances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_page: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<bool>,
}

/// Review and fraud-report signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_reviews: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_reports: Option<u32>,

    /// Values are placeholders, not drawn from a real reputation source
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}
