//! Audit error taxonomy and fault classification.

use thiserror::Error;

/// Errors that can occur while resolving or executing an audit run.
///
/// The `Unknown*` variants keep the exact message text the HTTP boundary
/// surfaces verbatim on a 400 response.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Unknown device {0}")]
    UnknownDevice(String),

    #[error("Unknown throttling profile {0}")]
    UnknownThrottlingProfile(String),

    #[error("url must be a non-empty string")]
    EmptyUrl,

    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("cookie injection failed: {0}")]
    Cookie(String),

    #[error("audit engine failed: {0}")]
    Engine(String),

    #[error("malformed audit report: {0}")]
    MalformedReport(String),
}

/// Two-way fault split for the HTTP boundary: caller-fixable input problems
/// versus execution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Bad request input. Surfaced to the caller with the original message.
    Client,
    /// Launch, cookie, or engine failure. Surfaced as an opaque 500.
    Server,
}

impl AuditError {
    /// Classify this error for the HTTP boundary.
    pub fn fault(&self) -> Fault {
        match self {
            Self::UnknownDevice(_) | Self::UnknownThrottlingProfile(_) | Self::EmptyUrl => {
                Fault::Client
            },
            Self::Launch(_) | Self::Cookie(_) | Self::Engine(_) | Self::MalformedReport(_) => {
                Fault::Server
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_faults() {
        assert_eq!(
            AuditError::UnknownDevice("tablet".into()).fault(),
            Fault::Client
        );
        assert_eq!(
            AuditError::UnknownThrottlingProfile("wifi".into()).fault(),
            Fault::Client
        );
        assert_eq!(AuditError::EmptyUrl.fault(), Fault::Client);
    }

    #[test]
    fn execution_errors_are_server_faults() {
        assert_eq!(AuditError::Launch("boom".into()).fault(), Fault::Server);
        assert_eq!(AuditError::Cookie("boom".into()).fault(), Fault::Server);
        assert_eq!(AuditError::Engine("boom".into()).fault(), Fault::Server);
        assert_eq!(
            AuditError::MalformedReport("no score".into()).fault(),
            Fault::Server
        );
    }

    #[test]
    fn unknown_device_message_matches_wire_contract() {
        let err = AuditError::UnknownDevice("tablet".into());
        assert_eq!(err.to_string(), "Unknown device tablet");
    }

    #[test]
    fn unknown_throttling_message_matches_wire_contract() {
        let err = AuditError::UnknownThrottlingProfile("desktopSlow2G".into());
        assert_eq!(err.to_string(), "Unknown throttling profile desktopSlow2G");
    }
}
