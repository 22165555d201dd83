//! Browser-side error types.

use thiserror::Error;

/// Errors from launching, driving, or tearing down a Chrome instance.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("timed out: {0}")]
    Timeout(String),
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Cdp(err.to_string())
    }
}
