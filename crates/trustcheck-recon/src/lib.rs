//! Network collaborators for trustcheck probes.
//!
//! Each collaborator sits behind a trait so probes can be exercised with
//! in-memory doubles: [`WhoisLookup`], [`HostResolver`], [`TlsInspector`]
//! and [`PageFetcher`]. [`Document`] turns fetched markup into the facts
//! content-based probes score.

#![doc(html_root_url = "https://docs.rs/trustcheck-recon/1.0.0")]

mod error;

pub mod dns;
pub mod html;
pub mod http;
pub mod tls;
pub mod whois;

pub use dns::{DnsResolver, HostResolver};
pub use error::{ReconError, ReconResult};
pub use html::{Anchor, Document};
pub use http::{HeadInfo, HttpFetcher, Page, PageFetcher, BROWSER_USER_AGENT};
pub use tls::{CertificateInspector, TlsInfo, TlsInspector};
pub use whois::{RegistrantInfo, WhoisClient, WhoisInfo, WhoisLookup, DEFAULT_WHOIS_SERVER};
