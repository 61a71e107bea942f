use crate::domain::model::{DeviceId, StatusCode};
use crate::domain::ports::{ConfigProvider, StatusProbe};
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    device: u64,
    status: i32,
}

/// The real status-check implementer: asks the fleet status API over HTTP.
///
/// `GET {endpoint}/devices/{id}/status` must answer with
/// `{"device": <id>, "status": <code>}`. Transient transport failures and
/// 5xx answers are retried a bounded number of times.
#[derive(Debug, Clone)]
pub struct HttpStatusProbe {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl HttpStatusProbe {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retry_attempts: 0,
            retry_delay: Duration::from_secs(1),
        })
    }

    pub fn from_config(config: &dyn ConfigProvider) -> Result<Self> {
        let probe = Self::new(
            config.endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )?;

        Ok(probe.with_retries(
            config.retry_attempts(),
            Duration::from_secs(config.retry_delay_seconds()),
        ))
    }

    pub fn with_retries(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    fn status_url(&self, device: DeviceId) -> String {
        format!(
            "{}/devices/{}/status",
            self.endpoint.trim_end_matches('/'),
            device
        )
    }

    async fn fetch_status(&self, device: DeviceId) -> Result<StatusCode> {
        let url = self.status_url(device);
        tracing::debug!("Requesting device status from: {}", url);

        let response = self.client.get(&url).send().await?;
        let http_status = response.status();
        tracing::debug!("Status endpoint response: {}", http_status);

        if !http_status.is_success() {
            return Err(GateError::StatusEndpointError {
                device: device.0,
                status: http_status.as_u16(),
            });
        }

        let body: StatusResponse = response.json().await?;
        if body.device != device.0 {
            tracing::warn!(
                "Status endpoint answered for device {} instead of {}",
                body.device,
                device
            );
        }

        Ok(StatusCode(body.status))
    }
}

#[async_trait]
impl StatusProbe for HttpStatusProbe {
    async fn status(&self, device: DeviceId) -> Result<StatusCode> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.fetch_status(device).await {
                Ok(code) => return Ok(code),
                Err(e) if e.is_transient() && attempt <= self.retry_attempts => {
                    tracing::warn!(
                        "Attempt {} for device {} failed: {}; retrying in {:?}",
                        attempt,
                        device,
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
