pub mod decision;
pub mod injection;
pub mod report;
pub mod sweep;

pub use crate::domain::model::{DeviceId, DeviceReport, FleetReport, StatusCode};
pub use crate::domain::ports::{ConfigProvider, StatusProbe};
pub use crate::utils::error::Result;
