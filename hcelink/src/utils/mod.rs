//! Small helpers shared across the crate: hex rendering for logs and
//! timeout conversions.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
