// hcelink/src/device/mod.rs
//! The per-device facade used by the host

pub mod builder;
pub mod handle;

pub use builder::DeviceBuilder;
pub use handle::Device;
