use crate::domain::model::{DeviceId, DeviceReport, FleetReport};
use crate::domain::ports::StatusProbe;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Checks a list of devices against one probe with bounded concurrency and
/// assembles a [`FleetReport`]. Individual probe failures are recorded per
/// device and never abort the sweep.
pub struct FleetSweep {
    probe: Arc<dyn StatusProbe>,
    concurrent_requests: usize,
}

impl FleetSweep {
    pub fn new(probe: Arc<dyn StatusProbe>, concurrent_requests: usize) -> Self {
        Self {
            probe,
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    pub async fn run(&self, devices: &[DeviceId]) -> FleetReport {
        tracing::info!(
            "Checking {} devices ({} concurrent requests)",
            devices.len(),
            self.concurrent_requests
        );

        let mut tasks: JoinSet<DeviceReport> = JoinSet::new();
        let mut reports = Vec::with_capacity(devices.len());

        for &device in devices {
            while tasks.len() >= self.concurrent_requests {
                Self::collect_next(&mut tasks, &mut reports).await;
            }

            let probe = Arc::clone(&self.probe);
            tasks.spawn(async move {
                match probe.status(device).await {
                    Ok(code) => DeviceReport::resolved(device, code),
                    Err(e) => {
                        tracing::warn!("Probe failed for device {}: {}", device, e);
                        DeviceReport::failed(device, e.to_string())
                    }
                }
            });
        }

        while !tasks.is_empty() {
            Self::collect_next(&mut tasks, &mut reports).await;
        }

        let report = FleetReport::from_devices(reports);
        tracing::info!(
            "Sweep finished: {} enabled, {} disabled, {} failed",
            report.enabled,
            report.disabled,
            report.failed
        );
        report
    }

    async fn collect_next(tasks: &mut JoinSet<DeviceReport>, reports: &mut Vec<DeviceReport>) {
        if let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!("Probe task aborted: {}", e),
            }
        }
    }
}
