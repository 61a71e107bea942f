use crate::config::OutputFormat;
use crate::domain::model::DeviceId;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub probe: ProbeSection,
    pub sweep: Option<SweepSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSection {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSection {
    pub devices: Option<Vec<u64>>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<String>,
}

impl GateConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GateError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` references with environment values. Unset
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GateError::ConfigError {
            message: format!("Env substitution pattern error: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("probe.endpoint", &self.probe.endpoint)?;

        if let Some(sweep) = &self.sweep {
            if let Some(concurrent) = sweep.concurrent_requests {
                crate::utils::validation::validate_positive_number(
                    "sweep.concurrent_requests",
                    concurrent,
                    1,
                )?;
            }
        }

        if let Some(output) = &self.output {
            if let Some(format) = &output.format {
                format.parse::<OutputFormat>()?;
            }
        }

        Ok(())
    }

    pub fn devices(&self) -> Vec<DeviceId> {
        self.sweep
            .as_ref()
            .and_then(|s| s.devices.as_ref())
            .map(|ids| ids.iter().copied().map(DeviceId).collect())
            .unwrap_or_default()
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        match self.output.as_ref().and_then(|o| o.format.as_ref()) {
            Some(format) => format.parse(),
            None => Ok(OutputFormat::Text),
        }
    }
}

impl ConfigProvider for GateConfig {
    fn endpoint(&self) -> &str {
        &self.probe.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.probe.timeout_seconds.unwrap_or(10)
    }

    fn retry_attempts(&self) -> u32 {
        self.probe.retry_attempts.unwrap_or(2)
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.probe.retry_delay_seconds.unwrap_or(1)
    }

    fn concurrent_requests(&self) -> usize {
        self.sweep
            .as_ref()
            .and_then(|s| s.concurrent_requests)
            .unwrap_or(5)
    }
}
