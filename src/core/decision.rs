use crate::domain::model::DeviceId;
use crate::domain::ports::StatusProbe;
use crate::utils::error::Result;

/// Reports whether a device is enabled: true exactly when the status-check
/// call answers zero for that device.
///
/// Generic over the probe type, so substituting a probe produces a distinct
/// monomorphized decision function with no runtime indirection. The `?Sized`
/// bound lets the same definition serve trait-object callers.
pub async fn device_enabled<P: StatusProbe + ?Sized>(probe: &P, device: DeviceId) -> Result<bool> {
    let code = probe.status(device).await?;
    tracing::debug!("Device {} reported status {}", device, code.0);
    Ok(code.is_enabled())
}

/// Same decision through dynamic dispatch, for callers that pick the
/// implementer at runtime.
pub async fn device_enabled_dyn(probe: &dyn StatusProbe, device: DeviceId) -> Result<bool> {
    device_enabled(probe, device).await
}
