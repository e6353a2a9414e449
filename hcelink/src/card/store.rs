// hcelink/src/card/store.rs
//! Shared slot for the payload being served

use std::sync::{Arc, Mutex, MutexGuard};

/// Holds the single payload the card side is willing to serve.
///
/// Clones share the same slot, so the control thread and the platform's
/// card-emulation callback can each hold a handle. The payload is swapped
/// as a whole `Arc<[u8]>`, so a concurrent `get` sees either nothing or a
/// complete payload.
#[derive(Debug, Clone, Default)]
pub struct PayloadStore {
    slot: Arc<Mutex<Option<Arc<[u8]>>>>,
}

impl PayloadStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing payload. Last write wins.
    pub fn set(&self, bytes: impl Into<Arc<[u8]>>) {
        let bytes = bytes.into();
        log::debug!("payload store: set {} bytes", bytes.len());
        *self.lock() = Some(bytes);
    }

    /// Snapshot of the current payload
    pub fn get(&self) -> Option<Arc<[u8]>> {
        self.lock().clone()
    }

    /// Drop the payload; later chunk requests get 6A 82
    pub fn clear(&self) {
        if self.lock().take().is_some() {
            log::debug!("payload store: cleared");
        }
    }

    /// Whether a payload is present
    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    // The slot only ever holds a finished value, so a poisoned lock still
    // guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<[u8]>>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
