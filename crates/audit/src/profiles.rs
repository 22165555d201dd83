//! Device emulation and network throttling presets.
//!
//! The names and values mirror the audit engine's constant tables; the
//! orchestration core only ever treats them as lookup keys.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::AuditError;

/// Device form factor to emulate during an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
}

impl Default for Device {
    fn default() -> Self {
        Self::Mobile
    }
}

impl Device {
    /// Throttling profile applied when the request names none.
    pub fn default_throttling(self) -> ThrottlingProfile {
        match self {
            Self::Desktop => ThrottlingProfile::DesktopDense4G,
            Self::Mobile => ThrottlingProfile::MobileSlow4G,
        }
    }

    /// Screen emulation settings for this form factor.
    pub fn profile(self) -> DeviceProfile {
        match self {
            Self::Mobile => DeviceProfile {
                width: 412,
                height: 823,
                device_scale_factor: 1.75,
                mobile: true,
                user_agent: MOBILE_USER_AGENT,
            },
            Self::Desktop => DeviceProfile {
                width: 1350,
                height: 940,
                device_scale_factor: 1.0,
                mobile: false,
                user_agent: DESKTOP_USER_AGENT,
            },
        }
    }
}

impl FromStr for Device {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(AuditError::UnknownDevice(other.to_string())),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "mobile"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}

/// Named network/CPU condition preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThrottlingProfile {
    #[serde(rename = "desktopDense4G")]
    DesktopDense4G,
    #[serde(rename = "mobileSlow4G")]
    MobileSlow4G,
    #[serde(rename = "mobileRegular3G")]
    MobileRegular3G,
}

impl ThrottlingProfile {
    /// Concrete conditions for this preset, from the engine's constant table.
    pub fn conditions(self) -> NetworkConditions {
        match self {
            Self::DesktopDense4G => NetworkConditions {
                latency_ms: 40.0,
                download_kbps: 10240.0,
                upload_kbps: 10240.0,
                cpu_slowdown: 1.0,
            },
            Self::MobileSlow4G => NetworkConditions {
                latency_ms: 150.0,
                download_kbps: 1638.4,
                upload_kbps: 675.0,
                cpu_slowdown: 4.0,
            },
            Self::MobileRegular3G => NetworkConditions {
                latency_ms: 300.0,
                download_kbps: 700.0,
                upload_kbps: 700.0,
                cpu_slowdown: 4.0,
            },
        }
    }
}

impl FromStr for ThrottlingProfile {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktopDense4G" => Ok(Self::DesktopDense4G),
            "mobileSlow4G" => Ok(Self::MobileSlow4G),
            "mobileRegular3G" => Ok(Self::MobileRegular3G),
            other => Err(AuditError::UnknownThrottlingProfile(other.to_string())),
        }
    }
}

impl fmt::Display for ThrottlingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DesktopDense4G => write!(f, "desktopDense4G"),
            Self::MobileSlow4G => write!(f, "mobileSlow4G"),
            Self::MobileRegular3G => write!(f, "mobileRegular3G"),
        }
    }
}

/// Screen emulation parameters for a device form factor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviceProfile {
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub mobile: bool,
    pub user_agent: &'static str,
}

/// Network latency/throughput and CPU slowdown applied during an audit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NetworkConditions {
    pub latency_ms: f64,
    pub download_kbps: f64,
    pub upload_kbps: f64,
    pub cpu_slowdown: f64,
}

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 11; moto g power (2022)) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_defaults_to_mobile() {
        assert_eq!(Device::default(), Device::Mobile);
    }

    #[test]
    fn device_parse_roundtrip() {
        assert_eq!("mobile".parse::<Device>().ok(), Some(Device::Mobile));
        assert_eq!("desktop".parse::<Device>().ok(), Some(Device::Desktop));
        assert!("tablet".parse::<Device>().is_err());
    }

    #[test]
    fn derived_throttling_per_device() {
        assert_eq!(
            Device::Mobile.default_throttling(),
            ThrottlingProfile::MobileSlow4G
        );
        assert_eq!(
            Device::Desktop.default_throttling(),
            ThrottlingProfile::DesktopDense4G
        );
    }

    #[test]
    fn throttling_parse_accepts_exact_wire_names() {
        for name in ["desktopDense4G", "mobileSlow4G", "mobileRegular3G"] {
            assert_eq!(name.parse::<ThrottlingProfile>().ok().map(|p| p.to_string()), Some(name.to_string()));
        }
        assert!("MobileSlow4G".parse::<ThrottlingProfile>().is_err());
        assert!("wifi".parse::<ThrottlingProfile>().is_err());
    }

    #[test]
    fn conditions_slow_down_mobile_more() {
        let desktop = ThrottlingProfile::DesktopDense4G.conditions();
        let slow4g = ThrottlingProfile::MobileSlow4G.conditions();
        let regular3g = ThrottlingProfile::MobileRegular3G.conditions();
        assert!(desktop.latency_ms < slow4g.latency_ms);
        assert!(slow4g.latency_ms < regular3g.latency_ms);
        assert!(desktop.cpu_slowdown < slow4g.cpu_slowdown);
    }
}
