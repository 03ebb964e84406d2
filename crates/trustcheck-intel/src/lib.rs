//! Threat-intelligence source clients for trustcheck.
//!
//! Each source implements [`ThreatSource`]. Sources are optional: a caller
//! without a credential simply does not construct one.
//!
//! # Example
//!
//! ```rust,ignore
//! use trustcheck_intel::{SafeBrowsingClient, ThreatSource};
//!
//! let client = SafeBrowsingClient::new("api-key")?;
//! let verdict = client.check("https://example.com", "example.com").await?;
//! println!("listed: {}", verdict.listed);
//! ```

#![doc(html_root_url = "https://docs.rs/trustcheck-intel/1.0.0")]

mod client;
mod config;
mod error;
mod safe_browsing;
mod source;
mod virustotal;

pub use config::{ClientConfig, RateLimitConfig, RetryConfig};
pub use error::{IntelError, IntelResult};
pub use safe_browsing::SafeBrowsingClient;
pub use source::{ThreatSource, ThreatVerdict};
pub use virustotal::VirusTotalClient;
