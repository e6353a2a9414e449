// hcelink/src/transport/traits.rs
//! Traits the platform NFC stack implements

use std::sync::Arc;
use std::time::Duration;

use crate::Result;

/// ISO-DEP (ISO 14443-4) link to a detected peer. Exchanges are strictly
/// sequential request/response pairs.
pub trait IsoDep: Send {
    /// Open the link to the peer
    fn connect(&mut self) -> Result<()>;

    /// Per-exchange timeout used by subsequent `transceive` calls
    fn set_timeout(&mut self, timeout: Duration);

    /// Send a command APDU and block until the response APDU arrives
    fn transceive(&mut self, command: &[u8]) -> Result<Vec<u8>>;

    /// Close the link. Closing an already closed link is not an error.
    fn close(&mut self) -> Result<()>;
}

/// A peer detected by the radio. A tag may hand out several ISO-DEP
/// handles over its lifetime, e.g. to reconnect after the link dropped.
pub trait Tag: Send + Sync {
    /// A fresh ISO-DEP handle, or `None` if the peer does not speak ISO-DEP
    fn iso_dep(&self) -> Option<Box<dyn IsoDep>>;
}

/// Invoked by the adapter on its own thread for every detected tag.
pub type TagCallback = Arc<dyn Fn(&dyn Tag) + Send + Sync>;

/// The platform NFC radio.
pub trait Adapter: Send + Sync {
    /// Whether the radio is switched on
    fn is_enabled(&self) -> bool {
        true
    }

    /// Start polling for peers; `on_tag` fires on an adapter-owned thread.
    /// Must not wait for `on_tag` to run.
    fn enable_reader_mode(&self, on_tag: TagCallback) -> Result<()>;

    /// Stop polling. Must be safe to call when reader mode is already off,
    /// and must not wait for a tag callback to return.
    fn disable_reader_mode(&self);

    /// Route inbound card-emulation traffic for our AID to this process
    fn set_preferred_service(&self) -> Result<()> {
        Ok(())
    }

    /// Undo `set_preferred_service`
    fn unset_preferred_service(&self) -> Result<()> {
        Ok(())
    }
}
