//! Process-wide probe factory seam.
//!
//! `acquire_probe` normally constructs the real HTTP implementer from the
//! runtime configuration. A test (or an embedding host) can install a factory
//! producing any substitute; the installed factory wins until it is cleared.
//! Prefer passing a probe explicitly (`device_enabled`, `FleetSweep`) when
//! the call site allows it; this seam exists for callers that cannot thread
//! one through. Tests touching it must serialize and clear it afterwards,
//! or hold a [`ProbeFactoryGuard`].

use crate::adapters::http::HttpStatusProbe;
use crate::domain::ports::{ConfigProvider, StatusProbe};
use crate::utils::error::Result;
use std::sync::{Arc, RwLock};

pub type ProbeFactory = Box<dyn Fn() -> Arc<dyn StatusProbe> + Send + Sync>;

static PROBE_FACTORY: RwLock<Option<ProbeFactory>> = RwLock::new(None);

pub fn install_probe_factory<F>(factory: F)
where
    F: Fn() -> Arc<dyn StatusProbe> + Send + Sync + 'static,
{
    let mut slot = PROBE_FACTORY.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(Box::new(factory));
    tracing::debug!("Probe factory installed");
}

pub fn clear_probe_factory() {
    let mut slot = PROBE_FACTORY.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
    tracing::debug!("Probe factory cleared");
}

pub fn probe_factory_installed() -> bool {
    PROBE_FACTORY
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .is_some()
}

/// Construct the status probe: an installed factory wins, otherwise the real
/// HTTP implementer is built from the configuration.
pub fn acquire_probe(config: &dyn ConfigProvider) -> Result<Arc<dyn StatusProbe>> {
    {
        let slot = PROBE_FACTORY.read().unwrap_or_else(|e| e.into_inner());
        if let Some(factory) = slot.as_ref() {
            tracing::debug!("Using injected probe factory");
            return Ok(factory());
        }
    }

    tracing::debug!("No probe factory installed, using HTTP probe");
    Ok(Arc::new(HttpStatusProbe::from_config(config)?))
}

/// Clears the installed factory when dropped.
#[must_use]
pub struct ProbeFactoryGuard {
    _private: (),
}

pub fn install_probe_factory_guarded<F>(factory: F) -> ProbeFactoryGuard
where
    F: Fn() -> Arc<dyn StatusProbe> + Send + Sync + 'static,
{
    install_probe_factory(factory);
    ProbeFactoryGuard { _private: () }
}

impl Drop for ProbeFactoryGuard {
    fn drop(&mut self) {
        clear_probe_factory();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::table::TableStatusProbe;
    use crate::core::decision::device_enabled_dyn;
    use crate::domain::model::{DeviceId, StatusCode};
    use std::sync::Mutex;

    // The factory slot is process state; these tests take turns.
    static SEAM: Mutex<()> = Mutex::new(());

    struct TestConfig;

    impl ConfigProvider for TestConfig {
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
    async fn installed_factory_wins_and_clearing_restores_fallback() {
        let _seam = SEAM.lock().unwrap_or_else(|e| e.into_inner());

        install_probe_factory(|| Arc::new(TableStatusProbe::always_enabled()));
        assert!(probe_factory_installed());

        let probe = acquire_probe(&TestConfig).unwrap();
        assert!(device_enabled_dyn(probe.as_ref(), DeviceId(1337))
            .await
            .unwrap());

        clear_probe_factory();
        assert!(!probe_factory_installed());

        // Fallback constructs the HTTP implementer without connecting.
        assert!(acquire_probe(&TestConfig).is_ok());
    }

    #[tokio::test]
    async fn factory_substitute_controls_the_decision() {
        let _seam = SEAM.lock().unwrap_or_else(|e| e.into_inner());

        let _guard = install_probe_factory_guarded(|| {
            Arc::new(TableStatusProbe::new(StatusCode(9)).with_code(DeviceId(7), StatusCode(0)))
        });

        let probe = acquire_probe(&TestConfig).unwrap();
        assert!(device_enabled_dyn(probe.as_ref(), DeviceId(7)).await.unwrap());
        assert!(!device_enabled_dyn(probe.as_ref(), DeviceId(8)).await.unwrap());
    }

    #[test]
    fn guard_clears_factory_on_drop() {
        let _seam = SEAM.lock().unwrap_or_else(|e| e.into_inner());

        {
            let _guard =
                install_probe_factory_guarded(|| Arc::new(TableStatusProbe::always_enabled()));
            assert!(probe_factory_installed());
        }

        assert!(!probe_factory_installed());
    }
}
