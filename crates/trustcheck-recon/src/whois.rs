//! WHOIS lookups with referral following.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, instrument, warn};
use whois_rs::{WhoIs, WhoIsLookupOptions, WhoIsServerValue};

use crate::error::{ReconError, ReconResult};

/// Root server asked first
pub const DEFAULT_WHOIS_SERVER: &str = "whois.iana.org";

// Every query names its server, so the table only needs the mandatory IP entry
const SERVER_TABLE: &str = r#"{"_": {"ip": {"host": "whois.arin.net", "query": "n + $addr\r\n"}}}"#;

/// WHOIS lookup result
#[derive(Debug, Clone, Default)]
pub struct WhoisInfo {
    /// Raw response from the last server that answered
    pub raw: String,
    /// Registrar name
    pub registrar: Option<String>,
    /// Registrant information
    pub registrant: RegistrantInfo,
    /// Domain creation date
    pub creation_date: Option<DateTime<Utc>>,
    /// Domain expiration date
    pub expiration_date: Option<DateTime<Utc>>,
    /// Name servers
    pub name_servers: Vec<String>,
    /// Domain status codes
    pub status: Vec<String>,
    /// Next server named by this response
    pub referral: Option<String>,
}

/// Registrant information from WHOIS
#[derive(Debug, Clone, Default)]
pub struct RegistrantInfo {
    /// Registrant name
    pub name: Option<String>,
    /// Organization name
    pub organization: Option<String>,
}

impl WhoisInfo {
    /// Registrant details are masked by a privacy or redaction service
    pub fn privacy_protected(&self) -> bool {
        let name = self.registrant.name.as_deref().unwrap_or_default().to_lowercase();
        let org = self
            .registrant
            .organization
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        ["privacy", "protected", "redacted"]
            .iter()
            .any(|marker| name.contains(marker) || org.contains(marker))
    }

    /// Whether the response carried any registration facts
    pub const fn has_registration(&self) -> bool {
        self.creation_date.is_some() || self.expiration_date.is_some() || self.registrar.is_some()
    }

    // Later responses are more specific; keep earlier facts they omit
    fn merge(mut self, newer: Self) -> Self {
        self.raw = newer.raw;
        self.referral = newer.referral;
        self.registrar = newer.registrar.or(self.registrar);
        self.registrant.name = newer.registrant.name.or(self.registrant.name);
        self.registrant.organization = newer.registrant.organization.or(self.registrant.organization);
        self.creation_date = newer.creation_date.or(self.creation_date);
        self.expiration_date = newer.expiration_date.or(self.expiration_date);
        if !newer.name_servers.is_empty() {
            self.name_servers = newer.name_servers;
        }
        if !newer.status.is_empty() {
            self.status = newer.status;
        }
        self
    }
}

/// Registration data lookup
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Look up registration facts for a domain
    async fn lookup(&self, domain: &str) -> ReconResult<WhoisInfo>;
}

/// WHOIS client
#[derive(Clone)]
pub struct WhoisClient {
    whois: Arc<WhoIs>,
    root_server: String,
    max_referrals: u8,
    timeout: Duration,
}

impl WhoisClient {
    /// Create a client that starts at `root_server` and follows up to `max_referrals` hops
    pub fn new(
        root_server: impl Into<String>,
        max_referrals: u8,
        timeout: Duration,
    ) -> ReconResult<Self> {
        let whois = WhoIs::from_string(SERVER_TABLE).map_err(whois_error)?;
        Ok(Self {
            whois: Arc::new(whois),
            root_server: root_server.into(),
            max_referrals,
            timeout,
        })
    }

    async fn query(&self, server: String, domain: &str, follow: u8) -> ReconResult<String> {
        debug!(server, domain, follow, "querying WHOIS server");
        let whois = Arc::clone(&self.whois);
        let target = domain.to_string();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || {
            let mut options = WhoIsLookupOptions::from_string(&target).map_err(whois_error)?;
            options.server = Some(WhoIsServerValue::from_string(&server).map_err(whois_error)?);
            options.follow = u16::from(follow);
            options.timeout = Some(timeout);
            whois.lookup(options).map_err(whois_error)
        })
        .await
        .map_err(|e| ReconError::Whois(format!("lookup task failed: {e}")))?
    }
}

#[async_trait]
impl WhoisLookup for WhoisClient {
    #[instrument(skip(self))]
    async fn lookup(&self, domain: &str) -> ReconResult<WhoisInfo> {
        // The root only knows the TLD; one hop reaches the registry
        let raw = self
            .query(self.root_server.clone(), domain, self.max_referrals.min(1))
            .await?;
        let mut info = parse_whois_response(&raw);

        // Registrar servers are flaky; keep what the registry said
        let registrar = info.referral.clone().filter(|server| {
            self.max_referrals > 1 && !server.eq_ignore_ascii_case(&self.root_server)
        });
        if let Some(server) = registrar {
            match self.query(server.clone(), domain, self.max_referrals - 2).await {
                Ok(raw) => info = info.merge(parse_whois_response(&raw)),
                Err(e) => warn!(server = %server, error = %e, "WHOIS referral failed"),
            }
        }

        if info.has_registration() {
            Ok(info)
        } else {
            Err(ReconError::Whois(format!("no registration data for {domain}")))
        }
    }
}

fn whois_error(err: impl Display) -> ReconError {
    ReconError::Whois(err.to_string())
}

/// Parse raw WHOIS response into structured data
fn parse_whois_response(raw: &str) -> WhoisInfo {
    let mut info = WhoisInfo {
        raw: raw.to_string(),
        ..WhoisInfo::default()
    };

    for line in raw.lines() {
        let line = line.trim();
        if line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "registrar" | "registrar name" | "sponsoring registrar" => {
                info.registrar.get_or_insert_with(|| value.to_string());
            }
            "creation date" | "created" | "created on" | "registered on" | "registration time"
            | "domain registration date" => {
                if info.creation_date.is_none() {
                    info.creation_date = parse_whois_date(value);
                }
            }
            "registry expiry date" | "expiration date" | "expiry date" | "expires"
            | "expires on" | "paid-till" | "registrar registration expiration date" => {
                if info.expiration_date.is_none() {
                    info.expiration_date = parse_whois_date(value);
                }
            }
            "registrant name" | "registrant" => {
                info.registrant.name.get_or_insert_with(|| value.to_string());
            }
            "registrant organization" | "registrant organisation" => {
                info.registrant
                    .organization
                    .get_or_insert_with(|| value.to_string());
            }
            "name server" | "nserver" => info.name_servers.push(value.to_lowercase()),
            "status" | "domain status" => info.status.push(value.to_string()),
            "refer" | "whois" | "registrar whois server" => {
                if info.referral.is_none() {
                    info.referral = referral_host(value);
                }
            }
            _ => {}
        }
    }

    info
}

fn referral_host(value: &str) -> Option<String> {
    let host = value
        .trim_start_matches("whois://")
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_lowercase();
    (!host.is_empty() && !host.contains(char::is_whitespace)).then_some(host)
}

/// Parse the date formats registries actually emit
fn parse_whois_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    let trimmed = value.trim_end_matches('Z');
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    let first = value.split_whitespace().next()?;
    ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%Y/%m/%d", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(first, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
