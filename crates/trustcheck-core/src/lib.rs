//! Core types for the trustcheck website trust assessment engine.
//!
//! This crate provides the data model shared by the engine, its probes and
//! anything consuming a report:
//!
//! - **Target**: a validated, canonical website produced by [`Target::parse`]
//! - **Probe results**: bounded sub-scores with typed findings ([`ProbeResult`])
//! - **CheckSet**: the fixed-shape collection of all six probe results
//! - **TrustReport**: the immutable, serializable assessment outcome
//! - **Errors**: the boundary error taxonomy in [`TrustError`]
//!
//! # Example
//!
//! ```rust
//! use trustcheck_core::{RiskLevel, Target};
//!
//! let target = Target::parse("www.example.com").unwrap();
//! assert_eq!(target.host(), "example.com");
//! assert_eq!(RiskLevel::from_score(72), RiskLevel::Medium);
//! ```

#![doc(html_root_url = "https://docs.rs/trustcheck-core/1.0.0")]

mod error;
pub mod types;

pub use error::{InvalidTargetReason, Result, TrustError};
pub use types::*;
