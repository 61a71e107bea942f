use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque device identifier. Never interpreted, only passed through to the
/// status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u64);

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw integer returned by a status-check call. Zero means enabled; any
/// nonzero value means disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const ENABLED: StatusCode = StatusCode(0);

    pub fn is_enabled(self) -> bool {
        self.0 == 0
    }
}

/// Outcome of checking a single device during a fleet sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device: DeviceId,
    pub code: Option<StatusCode>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeviceReport {
    pub fn resolved(device: DeviceId, code: StatusCode) -> Self {
        Self {
            device,
            code: Some(code),
            enabled: code.is_enabled(),
            error: None,
        }
    }

    pub fn failed(device: DeviceId, error: String) -> Self {
        Self {
            device,
            code: None,
            enabled: false,
            error: Some(error),
        }
    }
}

/// Aggregate outcome of a fleet sweep.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    pub generated_at: DateTime<Utc>,
    pub checked: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub failed: usize,
    pub devices: Vec<DeviceReport>,
}

impl FleetReport {
    pub fn from_devices(mut devices: Vec<DeviceReport>) -> Self {
        devices.sort_by_key(|r| r.device);

        let enabled = devices.iter().filter(|r| r.enabled).count();
        let failed = devices.iter().filter(|r| r.error.is_some()).count();
        let disabled = devices.len() - enabled - failed;

        Self {
            generated_at: Utc::now(),
            checked: devices.len(),
            enabled,
            disabled,
            failed,
            devices,
        }
    }

    pub fn all_enabled(&self) -> bool {
        self.failed == 0 && self.enabled == self.checked
    }
}
