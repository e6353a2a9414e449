// hcelink/src/lib.rs

//! hcelink
//!
//! Moves one opaque payload from a phone in card-emulation mode to a phone
//! in reader mode over ISO 7816 APDUs. The card side serves the payload in
//! 200-byte chunks behind a SELECT of a fixed AID; the reader side selects,
//! pulls chunks in order until end-of-stream and survives a dropped link or
//! a lost selection once.
#![warn(missing_docs)]

pub mod card;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Error, Result, StatusWord and Aid live at the root; the prelude
// re-exports the rest of the everyday surface.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
