pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::GateConfig, OutputFormat};

pub use adapters::{http::HttpStatusProbe, table::TableStatusProbe};
pub use self::core::decision::{device_enabled, device_enabled_dyn};
pub use self::core::injection::{
    acquire_probe, clear_probe_factory, install_probe_factory, install_probe_factory_guarded,
    probe_factory_installed, ProbeFactory, ProbeFactoryGuard,
};
pub use self::core::sweep::FleetSweep;
pub use domain::model::{DeviceId, DeviceReport, FleetReport, StatusCode};
pub use domain::ports::{ConfigProvider, StatusProbe};
pub use utils::error::{GateError, Result};
