use crate::domain::model::{DeviceId, StatusCode};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The one capability the decision logic depends on: ask an external system
/// for the raw status code of a device.
///
/// Object-safe so callers can hold `&dyn StatusProbe` / `Arc<dyn StatusProbe>`
/// and swap the implementer at runtime; generic callers get a monomorphized
/// path instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn status(&self, device: DeviceId) -> Result<StatusCode>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn concurrent_requests(&self) -> usize;
}
