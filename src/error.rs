use hickory_resolver::error::ResolveError;
use thiserror::Error;

/// Non-fatal scan errors. A fetch failure skips one origin, a resolution
/// failure skips subdomain discovery; neither stops the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("resolution failed: {0}")]
    Resolution(String),
}

impl From<ResolveError> for ScanError {
    fn from(err: ResolveError) -> ScanError {
        ScanError::Resolution(err.to_string())
    }
}
