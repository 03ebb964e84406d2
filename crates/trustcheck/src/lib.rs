//! Website trust assessment engine.
//!
//! Given a URL or host name, the engine runs six independent probes
//! concurrently, combines their sub-scores into a weighted overall score
//! and risk band, and explains the result with red flags and
//! recommendations.
//!
//! | Probe | Weight | Looks at |
//! |-------|--------|----------|
//! | domain trust | 20% | WHOIS age, registrar, privacy, expiry, DNS |
//! | security | 25% | HTTPS, certificate, TLS version, HSTS |
//! | fraud indicators | 25% | threat-intel verdicts, URL lexical patterns |
//! | content signals | 10% | urgency and fake-offer language, page structure |
//! | transparency | 10% | policy, terms, about and contact pages |
//! | reputation | 10% | reviews, rating, fraud reports |
//!
//! A probe that fails or exceeds its time budget is replaced by a
//! conservative degraded result, so an assessment of a valid target always
//! yields a complete report.
//!
//! # Example
//!
//! ```rust,no_run
//! use trustcheck::{EngineConfig, TrustEngine};
//!
//! # async fn run() -> trustcheck::Result<()> {
//! let engine = TrustEngine::from_config(&EngineConfig::default())?;
//! let report = engine.assess_target("example.com").await?;
//! println!("{} scored {} ({})", report.target(), report.overall_score(), report.risk_level());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
mod config;
mod engine;
mod error;
pub mod explain;
mod orchestrator;
pub mod probe;
pub mod report;

pub use config::{EngineConfig, IntelConfig};
pub use engine::TrustEngine;
pub use error::ProbeError;
pub use explain::{explain, Explanation};
pub use orchestrator::Orchestrator;
pub use probe::{Probe, ProbeSet};

pub use trustcheck_core::*;
