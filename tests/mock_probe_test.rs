use async_trait::async_trait;
use devgate::{
    acquire_probe, device_enabled, install_probe_factory_guarded, ConfigProvider, DeviceId,
    GateError, StatusCode, StatusProbe,
};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static SEAM: Mutex<()> = Mutex::new(());

mock! {
    pub Probe {}

    #[async_trait]
    impl StatusProbe for Probe {
        async fn status(&self, device: DeviceId) -> Result<StatusCode, GateError>;
    }
}

struct TestSettings;

impl ConfigProvider for TestSettings {
    fn endpoint(&self) -> &str {
        "http://127.0.0.1:1"
    }
    fn timeout_seconds(&self) -> u64 {
        1
    }
    fn retry_attempts(&self) -> u32 {
        0
    }
    fn retry_delay_seconds(&self) -> u64 {
        0
    }
    fn concurrent_requests(&self) -> usize {
        1
    }
}

#[tokio::test]
async fn mock_probe_enables_device_1337_when_told_to_return_zero() {
    let mut probe = MockProbe::new();
    probe
        .expect_status()
        .with(eq(DeviceId(1337)))
        .times(1)
        .returning(|_| Ok(StatusCode(0)));

    assert!(device_enabled(&probe, DeviceId(1337)).await.unwrap());
}

#[tokio::test]
async fn mock_probe_disables_device_on_nonzero_status() {
    let mut probe = MockProbe::new();
    probe
        .expect_status()
        .with(eq(DeviceId(1337)))
        .times(1)
        .returning(|_| Ok(StatusCode(11)));

    assert!(!device_enabled(&probe, DeviceId(1337)).await.unwrap());
}

#[tokio::test]
async fn mock_probe_verifies_one_call_per_device() {
    let mut probe = MockProbe::new();
    probe
        .expect_status()
        .with(eq(DeviceId(1)))
        .times(1)
        .returning(|_| Ok(StatusCode(0)));
    probe
        .expect_status()
        .with(eq(DeviceId(2)))
        .times(1)
        .returning(|_| Ok(StatusCode(5)));

    assert!(device_enabled(&probe, DeviceId(1)).await.unwrap());
    assert!(!device_enabled(&probe, DeviceId(2)).await.unwrap());
}

#[tokio::test]
async fn mock_probe_failure_surfaces_as_error() {
    let mut probe = MockProbe::new();
    probe.expect_status().times(1).returning(|device| {
        Err(GateError::StatusEndpointError {
            device: device.0,
            status: 502,
        })
    });

    assert!(device_enabled(&probe, DeviceId(9)).await.is_err());
}

#[tokio::test]
async fn mocked_factory_builds_a_mock_probe_per_acquire() {
    let _seam = SEAM.lock().unwrap_or_else(|e| e.into_inner());

    let factory_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&factory_calls);

    let _guard = install_probe_factory_guarded(move || {
        counter.fetch_add(1, Ordering::SeqCst);

        let mut probe = MockProbe::new();
        probe
            .expect_status()
            .with(eq(DeviceId(1337)))
            .times(1)
            .returning(|_| Ok(StatusCode(0)));
        Arc::new(probe)
    });

    let probe = acquire_probe(&TestSettings).unwrap();
    assert!(device_enabled(probe.as_ref(), DeviceId(1337)).await.unwrap());

    let probe = acquire_probe(&TestSettings).unwrap();
    assert!(device_enabled(probe.as_ref(), DeviceId(1337)).await.unwrap());

    assert_eq!(factory_calls.load(Ordering::SeqCst), 2);
}
