// hcelink/src/device/handle.rs
//! The `Device` handle

use std::sync::Arc;
use std::time::Duration;

use crate::card::{CardResponder, PayloadStore};
use crate::constants::MAX_PAYLOAD_LEN;
use crate::reader::{OperationGuard, OperationId, ReaderConfig, ReaderSession};
use crate::transport::{Adapter, Tag, TagCallback};
use crate::{Error, Result};

/// One local NFC device: serves a payload in card-emulation mode and
/// fetches a peer's payload in reader mode.
///
/// Everything the platform and the host call into goes through here. State
/// lives in the instance, so tests can run several devices side by side.
pub struct Device {
    adapter: Option<Arc<dyn Adapter>>,
    store: PayloadStore,
    responder: CardResponder,
    guard: Arc<OperationGuard>,
    config: ReaderConfig,
}

impl Device {
    /// Create a Device around an optional adapter. `None` models hardware
    /// without an NFC radio.
    pub fn new(adapter: Option<Arc<dyn Adapter>>, config: ReaderConfig) -> Self {
        let store = PayloadStore::new();
        let responder = CardResponder::new(store.clone());

        let guard = match adapter.clone() {
            Some(adapter) => {
                OperationGuard::with_deactivate(move || adapter.disable_reader_mode())
            }
            None => OperationGuard::new(),
        };

        Self {
            adapter,
            store,
            responder,
            guard: Arc::new(guard),
            config,
        }
    }

    /// Reader timing in use
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Whether an adapter was supplied
    pub fn has_nfc_hardware(&self) -> bool {
        self.adapter.is_some()
    }

    /// Whether the adapter reports its radio on
    pub fn is_nfc_enabled(&self) -> bool {
        self.adapter.as_ref().is_some_and(|a| a.is_enabled())
    }

    // ---- card-emulation side ----

    /// Serve `bytes` to the next reader and make this service the preferred
    /// card-emulation target.
    pub fn set_payload(&self, bytes: impl Into<Arc<[u8]>>) -> Result<()> {
        let bytes = bytes.into();
        if bytes.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge {
                max: MAX_PAYLOAD_LEN,
                actual: bytes.len(),
            });
        }
        self.store.set(bytes);
        if let Some(adapter) = &self.adapter {
            if let Err(e) = adapter.set_preferred_service() {
                log::warn!("device: could not set preferred service: {}", e);
            }
        }
        Ok(())
    }

    /// Stop serving and withdraw the preferred service
    pub fn clear_payload(&self) {
        self.store.clear();
        self.unset_preferred_service();
    }

    /// Whether a payload is being served
    pub fn has_payload(&self) -> bool {
        self.store.is_set()
    }

    /// Entry point for the platform's inbound-APDU callback.
    pub fn process_command(&self, apdu: &[u8]) -> Vec<u8> {
        self.responder.handle(apdu)
    }

    /// Platform callback for a dropped card-emulation link.
    pub fn on_deactivated(&self, reason: i32) {
        self.responder.deactivated(reason);
    }

    /// The card-side responder, e.g. for a loopback peer
    pub fn responder(&self) -> &CardResponder {
        &self.responder
    }

    // ---- reader side ----

    /// Fetch one payload from the next peer that comes into range.
    ///
    /// Blocks until the peer's payload arrives, the read fails, `timeout`
    /// elapses or the read is cancelled from another thread. Exactly one
    /// outcome is returned and reader mode is off again by then.
    pub fn read_once(&self, timeout: Duration) -> Result<Vec<u8>> {
        let adapter = self.adapter.clone().ok_or(Error::NoAdapter)?;
        let guard = Arc::clone(&self.guard);
        let config = self.config;

        let pending = self.guard.request_read(move |id| {
            adapter.enable_reader_mode(tag_handler(guard, config, id))
        })?;
        log::info!("device: waiting up to {:?} for a peer", timeout);
        pending.wait(timeout).map_err(Error::into_read_error)
    }

    /// `read_once` with the configured default budget.
    pub fn read_once_default(&self) -> Result<Vec<u8>> {
        self.read_once(self.config.read_timeout)
    }

    /// `read_once`, decoding the payload as UTF-8 (invalid sequences are
    /// replaced).
    pub fn read_once_text(&self, timeout: Duration) -> Result<String> {
        let bytes = self.read_once(timeout)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Whether a read is armed
    pub fn is_reading(&self) -> bool {
        self.guard.is_armed()
    }

    /// Cancel an armed read and switch reader mode off.
    pub fn disable_reader(&self) {
        if self.guard.cancel() {
            log::info!("device: read cancelled");
        }
    }

    // ---- host lifecycle ----

    /// Host resumed: start from a clean slate
    pub fn on_resume(&self) {
        self.teardown("resume");
    }

    /// Host paused: cancel reads, leave card mode
    pub fn on_pause(&self) {
        self.teardown("pause");
    }

    /// Host going away: cancel reads, leave card mode
    pub fn on_destroy(&self) {
        self.teardown("destroy");
    }

    fn teardown(&self, event: &str) {
        log::debug!("device: {} -> cancelling reads and leaving card mode", event);
        self.disable_reader();
        self.unset_preferred_service();
    }

    fn unset_preferred_service(&self) {
        if let Some(adapter) = &self.adapter {
            if let Err(e) = adapter.unset_preferred_service() {
                log::warn!("device: could not unset preferred service: {}", e);
            }
        }
    }
}

/// Build the tag-detected callback for operation `id`. Runs on the
/// adapter's thread; a callback that outlives its operation does nothing.
fn tag_handler(guard: Arc<OperationGuard>, config: ReaderConfig, id: OperationId) -> TagCallback {
    Arc::new(move |tag: &dyn Tag| {
        let Some(_slot) = guard.begin_session(id) else {
            log::debug!("device: tag ignored, read {} not armed or busy", id);
            return;
        };

        let result = ReaderSession::new(config).run(tag);
        if !guard.is_armed_for(id) {
            log::debug!("device: read {} finished after it was completed", id);
            return;
        }
        guard.complete(id, result.map_err(Error::into_read_error));
    })
}

#[cfg(feature = "async")]
impl Device {
    /// Async flavour of `read_once`, run on tokio's blocking pool.
    pub async fn read_once_async(self: Arc<Self>, timeout: Duration) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || self.read_once(timeout))
            .await
            .map_err(|e| Error::ReadError(e.to_string()))?
    }
}
