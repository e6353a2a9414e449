// hcelink/src/device/builder.rs
//! Builder for `Device`

use std::sync::Arc;

use crate::device::handle::Device;
use crate::reader::ReaderConfig;
use crate::transport::Adapter;

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    adapter: Option<Arc<dyn Adapter>>,
    config: ReaderConfig,
}

impl DeviceBuilder {
    /// Builder with no adapter and the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the platform radio (or a MockAdapter)
    pub fn with_adapter(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Reader timing to use
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder. Without an adapter the device can still serve
    /// a payload through `process_command` but every read fails with
    /// `NoAdapter`.
    pub fn build(self) -> Device {
        Device::new(self.adapter, self.config)
    }
}
