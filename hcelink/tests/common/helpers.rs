// helpers.rs: wiring a reader device to an in-process card peer

use std::sync::Arc;
use std::time::Duration;

use hcelink::card::CardResponder;
use hcelink::test_support::{card_with_payload, loopback_tag, mock_device, present_when_reading};
use hcelink::transport::mock::MockAdapter;
use hcelink::transport::Tag;
use hcelink::{Device, Result};

/// A reader device plus its mock radio.
pub struct ReaderRig {
    pub device: Device,
    pub adapter: Arc<MockAdapter>,
}

impl ReaderRig {
    pub fn new() -> Self {
        let (device, adapter) = mock_device();
        Self { device, adapter }
    }

    /// Run `read_once` while another thread brings `tag` into range.
    pub fn read_from(&self, tag: Arc<dyn Tag>, timeout: Duration) -> Result<Vec<u8>> {
        let presenter = present_when_reading(self.adapter.clone(), tag);
        let result = self.device.read_once(timeout);
        let delivered = presenter.join().unwrap_or(false);
        assert!(delivered, "tag was never delivered to the reader");
        result
    }
}

/// A card peer serving `payload`. Bypasses the device's size check so
/// tests can serve payloads a device would refuse.
pub fn card_serving(payload: &[u8]) -> CardResponder {
    card_with_payload(payload)
}

/// A tag backed by `responder` that can be acquired `handles` times.
pub fn peer(responder: &CardResponder, handles: usize) -> Arc<dyn Tag> {
    Arc::new(loopback_tag(responder, handles))
}
