pub mod toml_config;

use crate::utils::error::GateError;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = GateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(GateError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: text, json, csv".to_string(),
            }),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "devgate")]
#[command(about = "Check whether fleet devices are enabled via the status API")]
pub struct CliConfig {
    #[arg(long, default_value = "https://status.example.com")]
    pub endpoint: String,

    /// Device ids to check; repeatable or comma-separated.
    #[arg(long = "device", value_delimiter = ',')]
    pub devices: Vec<u64>,

    /// TOML config file; CLI devices override its device list.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "2")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "1")]
    pub retry_delay_seconds: u64,

    #[arg(long, default_value = "5")]
    pub concurrent_requests: usize,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Answer from a local status table file instead of the HTTP API.
    #[arg(long)]
    pub status_table: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.retry_delay_seconds
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;

        if let Some(table) = &self.status_table {
            validation::validate_path("status_table", table)?;
        }

        Ok(())
    }
}
