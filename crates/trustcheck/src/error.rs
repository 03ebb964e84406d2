use thiserror::Error;
use trustcheck_intel::IntelError;
use trustcheck_recon::ReconError;

/// Failure inside a single probe.
///
/// Never crosses the probe boundary: [`crate::Probe::run`] turns it into
/// the probe's degraded fallback.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// A network collaborator failed
    #[error(transparent)]
    Recon(#[from] ReconError),

    /// A threat-intelligence source failed
    #[error(transparent)]
    Intel(#[from] IntelError),

    /// The probe's data was not available
    #[error("unavailable: {0}")]
    Unavailable(String),
}
