//! Reader-side timing configuration

use std::time::Duration;

use crate::utils::ms;

/// Per-exchange timeout applied to the ISO-DEP link (ms)
pub const EXCHANGE_TIMEOUT_MS: u64 = 10_000;

/// Pause between consecutive full chunks (ms)
pub const CHUNK_PAUSE_MS: u64 = 15;

/// Pause before reconnecting after a transport failure (ms)
pub const RECONNECT_PAUSE_MS: u64 = 120;

/// Full session attempts per detected tag: the first one plus one reconnect
pub const SESSION_ATTEMPTS: usize = 2;

/// Re-select-and-retry rounds allowed per GET-CHUNK answered with 6A82
pub const NOT_FOUND_RETRIES: usize = 1;

/// Runtime knobs for a reader session and the read operation around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Timeout for each APDU exchange
    pub exchange_timeout: Duration,
    /// Pause between consecutive chunk requests
    pub chunk_pause: Duration,
    /// Pause before reopening the link after a transport error
    pub reconnect_pause: Duration,
    /// Budget used by `read_once_default`
    pub read_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            exchange_timeout: ms(EXCHANGE_TIMEOUT_MS),
            chunk_pause: ms(CHUNK_PAUSE_MS),
            reconnect_pause: ms(RECONNECT_PAUSE_MS),
            read_timeout: crate::utils::default_read_timeout(),
        }
    }
}

impl ReaderConfig {
    /// Same as `Default`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `exchange_timeout`
    pub fn with_exchange_timeout(mut self, timeout: Duration) -> Self {
        self.exchange_timeout = timeout;
        self
    }

    /// Set `chunk_pause`
    pub fn with_chunk_pause(mut self, pause: Duration) -> Self {
        self.chunk_pause = pause;
        self
    }

    /// Set `reconnect_pause`
    pub fn with_reconnect_pause(mut self, pause: Duration) -> Self {
        self.reconnect_pause = pause;
        self
    }

    /// Set `read_timeout`
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// No pauses at all; keeps loopback tests fast.
    pub fn immediate() -> Self {
        Self::default()
            .with_chunk_pause(Duration::ZERO)
            .with_reconnect_pause(Duration::ZERO)
    }
}
