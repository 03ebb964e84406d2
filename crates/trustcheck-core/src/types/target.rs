//! Assessment target and input normalization.

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::{InvalidTargetReason, Result, TrustError};

/// Longest URL accepted before normalization gives up
const MAX_URL_LEN: usize = 2083;

/// A validated, canonical website to assess.
///
/// Only produced by [`Target::parse`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    #[serde(skip)]
    original_input: String,
    #[serde(rename = "url")]
    canonical_url: String,
    #[serde(rename = "domain")]
    host: String,
}

impl Target {
    /// Normalize a raw user-supplied string into a target.
    ///
    /// Rules, in order: trim whitespace and quotes; keep an explicit
    /// `http://`/`https://` prefix; reject any other `://` scheme; otherwise
    /// prepend `https://`. If the result is not a well-formed URL, retry
    /// with just `https://<host>` before giving up.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();

        if trimmed.is_empty() {
            return Err(TrustError::invalid_target(InvalidTargetReason::Empty));
        }

        let formatted = with_scheme(trimmed)?;

        let (canonical_url, url) = match well_formed(&formatted) {
            Some(url) => (formatted, url),
            None => recover_host(&formatted)
                .ok_or(TrustError::invalid_target(InvalidTargetReason::Malformed))?,
        };

        let host = url
            .host_str()
            .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
            .filter(|h| !h.is_empty())
            .ok_or(TrustError::invalid_target(InvalidTargetReason::Malformed))?;

        Ok(Self {
            original_input: input.to_string(),
            canonical_url,
            host,
        })
    }

    /// The string the caller originally supplied
    #[must_use]
    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    /// Absolute http(s) URL to probe
    #[must_use]
    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    /// Bare host name with any leading `www.` removed
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the canonical URL uses the https scheme
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.canonical_url.starts_with("https://")
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_url)
    }
}

impl std::str::FromStr for Target {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Apply the scheme rules, lowercasing an explicit http(s) scheme.
fn with_scheme(input: &str) -> Result<String> {
    for scheme in ["http://", "https://"] {
        if input.len() >= scheme.len()
            && input.is_char_boundary(scheme.len())
            && input[..scheme.len()].eq_ignore_ascii_case(scheme)
        {
            return Ok(format!("{scheme}{}", &input[scheme.len()..]));
        }
    }

    if input.contains("://") {
        return Err(TrustError::invalid_target(
            InvalidTargetReason::UnsupportedScheme,
        ));
    }

    Ok(format!("https://{input}"))
}

/// Second chance for complex pastes: keep only the host component.
fn recover_host(formatted: &str) -> Option<(String, Url)> {
    let parsed = Url::parse(formatted).ok()?;
    let host = parsed.host_str()?;
    let rebuilt = format!("https://{host}");
    let url = well_formed(&rebuilt)?;
    Some((rebuilt, url))
}

/// Strict absolute-URL check restricted to http/https with a routable host.
fn well_formed(candidate: &str) -> Option<Url> {
    if candidate.len() > MAX_URL_LEN || candidate.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    match url.host()? {
        Host::Domain(domain) if is_valid_domain(domain) => Some(url),
        Host::Ipv4(_) | Host::Ipv6(_) => Some(url),
        Host::Domain(_) => None,
    }
}

/// Fully-qualified domain check: dotted labels and an alphabetic TLD.
fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"));

    labels_ok && tld_ok
}
