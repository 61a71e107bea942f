use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Status request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Status endpoint returned HTTP {status} for device {device}")]
    StatusEndpointError { device: u64, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GateError {
    /// Whether retrying the same request can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GateError::ApiError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            GateError::StatusEndpointError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
