// Shared helpers for the integration test crates. Each aggregator pulls
// this in through a `#[path]` module, so not every helper is used by every
// crate.
#![allow(dead_code)]

pub mod helpers;

/// Route `log` output through env_logger; `RUST_LOG=hcelink=trace` shows
/// every APDU exchanged.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
