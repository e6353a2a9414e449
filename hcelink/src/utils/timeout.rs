//! Timeout helpers used across the crate.

use std::time::Duration;

/// Budget for a read when the caller does not name one (ms). A person
/// needs a moment to bring two phones together.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 20_000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Default read budget as Duration.
pub fn default_read_timeout() -> Duration {
    ms(DEFAULT_READ_TIMEOUT_MS)
}

/// Time left until `deadline`, zero once it has passed.
pub fn remaining(deadline: std::time::Instant) -> Duration {
    deadline.saturating_duration_since(std::time::Instant::now())
}
