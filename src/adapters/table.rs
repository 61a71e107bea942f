use crate::domain::model::{DeviceId, StatusCode};
use crate::domain::ports::StatusProbe;
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// In-memory substitute for the HTTP probe: answers from a fixed id -> code
/// table, with a default code for unknown devices. Doubles as the CLI's
/// offline mode and as the hand-written fake in tests.
#[derive(Debug, Clone)]
pub struct TableStatusProbe {
    codes: HashMap<DeviceId, StatusCode>,
    default_code: StatusCode,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    default_code: Option<i32>,
    devices: Option<HashMap<String, i32>>,
}

impl TableStatusProbe {
    pub fn new(default_code: StatusCode) -> Self {
        Self {
            codes: HashMap::new(),
            default_code,
        }
    }

    /// Every device reports status zero.
    pub fn always_enabled() -> Self {
        Self::new(StatusCode::ENABLED)
    }

    pub fn with_code(mut self, device: DeviceId, code: StatusCode) -> Self {
        self.codes.insert(device, code);
        self
    }

    /// Load a status table from a TOML file:
    ///
    /// ```toml
    /// default_code = 1
    ///
    /// [devices]
    /// 1337 = 0
    /// 2001 = 4
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(content).map_err(|e| GateError::ConfigError {
            message: format!("Status table parsing error: {}", e),
        })?;

        let mut codes = HashMap::new();
        for (key, code) in file.devices.unwrap_or_default() {
            let id = key
                .parse::<u64>()
                .map_err(|_| GateError::InvalidConfigValueError {
                    field: "devices".to_string(),
                    value: key.clone(),
                    reason: "Device id must be an unsigned integer".to_string(),
                })?;
            codes.insert(DeviceId(id), StatusCode(code));
        }

        Ok(Self {
            codes,
            default_code: StatusCode(file.default_code.unwrap_or(0)),
        })
    }
}

#[async_trait]
impl StatusProbe for TableStatusProbe {
    async fn status(&self, device: DeviceId) -> Result<StatusCode> {
        let code = self.codes.get(&device).copied().unwrap_or(self.default_code);
        tracing::debug!("Table probe answering {} for device {}", code.0, device);
        Ok(code)
    }
}
