//! TLS handshake and leaf certificate inspection.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, ProtocolVersion, RootCertStore};
use tracing::debug;

use crate::error::{ReconError, ReconResult};

/// What the handshake revealed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsInfo {
    /// Chain verified against the webpki roots for this host name
    pub verified: bool,
    /// Negotiated protocol, e.g. `TLSv1.3`
    pub protocol: Option<String>,
    /// Leaf certificate expiry
    pub not_after: Option<DateTime<Utc>>,
    /// Leaf certificate issuer organization
    pub issuer: Option<String>,
}

impl TlsInfo {
    /// Days until the leaf certificate expires, relative to `now`
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.not_after.map(|t| (t - now).num_days())
    }
}

/// Inspects a host's TLS endpoint
#[async_trait]
pub trait TlsInspector: Send + Sync {
    /// Handshake with `host:port`. A certificate the roots reject is reported
    /// as `verified = false`; connection failures are errors.
    async fn inspect(&self, host: &str, port: u16) -> ReconResult<TlsInfo>;
}

/// rustls-based inspector
pub struct CertificateInspector {
    config: Arc<ClientConfig>,
    timeout: Duration,
}

impl CertificateInspector {
    /// Create an inspector trusting the webpki root set.
    ///
    /// Uses the ring provider explicitly; the process-wide default is
    /// ambiguous when more than one rustls backend is compiled in.
    pub fn new(timeout: Duration) -> ReconResult<Self> {
        let root_store = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| ReconError::Tls(format!("TLS configuration failed: {e}")))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

        Ok(Self {
            config: Arc::new(config),
            timeout,
        })
    }
}

#[async_trait]
impl TlsInspector for CertificateInspector {
    async fn inspect(&self, host: &str, port: u16) -> ReconResult<TlsInfo> {
        let config = Arc::clone(&self.config);
        let host = host.to_string();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || handshake(&config, &host, port, timeout))
            .await
            .map_err(|e| ReconError::Tls(format!("handshake task failed: {e}")))?
    }
}

fn handshake(
    config: &Arc<ClientConfig>,
    host: &str,
    port: u16,
    timeout: Duration,
) -> ReconResult<TlsInfo> {
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| ReconError::Tls(format!("no address for {host}")))?;

    let mut tcp = TcpStream::connect_timeout(&addr, timeout).map_err(io_error)?;
    tcp.set_read_timeout(Some(timeout))?;
    tcp.set_write_timeout(Some(timeout))?;

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| ReconError::Tls(format!("invalid server name: {host}")))?;
    let mut conn = ClientConnection::new(Arc::clone(config), server_name)
        .map_err(|e| ReconError::Tls(format!("TLS setup failed: {e}")))?;

    while conn.is_handshaking() {
        if let Err(e) = conn.complete_io(&mut tcp) {
            if is_certificate_rejection(&e) {
                debug!(host, error = %e, "certificate rejected");
                return Ok(TlsInfo::default());
            }
            return Err(io_error(e));
        }
    }

    let protocol = conn.protocol_version().map(|v| match v {
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        other => format!("{other:?}"),
    });

    let (not_after, issuer) = conn
        .peer_certificates()
        .and_then(|chain| chain.first())
        .map_or((None, None), |leaf| leaf_facts(leaf.as_ref()));

    debug!(host, ?protocol, "TLS handshake complete");
    Ok(TlsInfo {
        verified: true,
        protocol,
        not_after,
        issuer,
    })
}

fn leaf_facts(der: &[u8]) -> (Option<DateTime<Utc>>, Option<String>) {
    let Ok((_, cert)) = x509_parser::parse_x509_certificate(der) else {
        return (None, None);
    };

    let not_after = Utc
        .timestamp_opt(cert.validity().not_after.timestamp(), 0)
        .single();
    let issuer = cert
        .issuer()
        .iter_organization()
        .next()
        .and_then(|o| o.as_str().ok())
        .or_else(|| cert.issuer().iter_common_name().next().and_then(|cn| cn.as_str().ok()))
        .map(String::from);

    (not_after, issuer)
}

fn is_certificate_rejection(err: &io::Error) -> bool {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
        .is_some_and(|e| matches!(e, rustls::Error::InvalidCertificate(_)))
}

fn io_error(err: io::Error) -> ReconError {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ReconError::Timeout,
        _ => ReconError::Network(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn days_remaining_counts_whole_days() {
        let now = Utc::now();
        let info = TlsInfo {
            not_after: Some(now + ChronoDuration::days(45) + ChronoDuration::hours(3)),
            ..TlsInfo::default()
        };
        assert_eq!(info.days_remaining(now), Some(45));
        assert_eq!(TlsInfo::default().days_remaining(now), None);
    }

    #[test]
    fn inspector_builds_with_ring_provider() {
        let inspector = CertificateInspector::new(Duration::from_secs(1)).unwrap();
        assert_eq!(inspector.timeout, Duration::from_secs(1));
        assert!(inspector.config.alpn_protocols.is_empty());
    }

    #[test]
    fn garbage_certificate_yields_no_facts() {
        assert_eq!(leaf_facts(b"not a certificate"), (None, None));
    }

    #[test]
    fn timeouts_map_to_timeout() {
        let err = io_error(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(matches!(err, ReconError::Timeout));
    }

    #[test]
    fn certificate_errors_are_recognized() {
        let err = io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::InvalidCertificate(rustls::CertificateError::Expired),
        );
        assert!(is_certificate_rejection(&err));
        assert!(!is_certificate_rejection(&io::Error::other("reset")));
    }
}
