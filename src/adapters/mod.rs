// Adapters layer: concrete status-check implementers behind the probe port.

pub mod http;
pub mod table;
