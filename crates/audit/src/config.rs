//! Per-request run configuration and its resolver.

use crate::{
    error::{AuditError, Result},
    profiles::{Device, ThrottlingProfile},
    request::ReportRequest,
};

/// Service-level defaults fed into the resolver. Read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RunDefaults {
    /// Attempt count used when the request omits one.
    pub attempts: u32,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self { attempts: 3 }
    }
}

/// Cookie injected into the browser session before navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// Fully resolved configuration for one audit run. Immutable once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub device: Device,
    pub throttling: ThrottlingProfile,
    pub attempts: u32,
    pub blocked_url_patterns: Vec<String>,
    pub cookie: Option<SessionCookie>,
}

impl RunConfig {
    /// Validate and normalize raw request parameters.
    ///
    /// Pure and deterministic. Unrecognized `device` or `throttling` values
    /// fail with the validation errors the HTTP boundary surfaces verbatim;
    /// everything else falls back to defaults rather than erroring.
    pub fn resolve(request: ReportRequest, defaults: RunDefaults) -> Result<Self> {
        if request.url.is_empty() {
            return Err(AuditError::EmptyUrl);
        }

        let device = match request.device.as_deref() {
            Some(raw) => raw.parse::<Device>()?,
            None => Device::default(),
        };

        // An explicit profile wins regardless of device; otherwise the device
        // picks its own default.
        let throttling = match request.throttling.as_deref() {
            Some(raw) => raw.parse::<ThrottlingProfile>()?,
            None => device.default_throttling(),
        };

        // No upper bound on attempts; non-positive values fall back to the
        // default the same way non-numeric ones do.
        let attempts = match request.attempts {
            Some(n) if n >= 1 => n as u32,
            _ => defaults.attempts,
        };

        let cookie = request.cookie.and_then(|c| {
            if c.name.is_empty() || c.value.is_empty() {
                None
            } else {
                Some(SessionCookie {
                    name: c.name,
                    value: c.value,
                })
            }
        });

        Ok(Self {
            url: request.url,
            device,
            throttling,
            attempts,
            blocked_url_patterns: request.blocked_url_patterns.unwrap_or_default(),
            cookie,
        })
    }
}
