// hcelink/src/prelude.rs
//! Everyday imports: `use hcelink::prelude::*;`

pub use crate::card::{CardResponder, PayloadStore};
pub use crate::constants::{AID, CHUNK_SIZE, MAX_PAYLOAD_LEN};
pub use crate::device::{Device, DeviceBuilder};
pub use crate::protocol::{Command, CommandFrame, Response};
pub use crate::reader::{OperationGuard, PendingRead, ReaderConfig, ReaderSession, SessionState};
pub use crate::transport::{Adapter, IsoDep, Tag, TagCallback};
pub use crate::{Aid, Error, Result, StatusWord};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_read_timeout, ms};
