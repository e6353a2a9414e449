// hcelink/src/protocol/mod.rs
//! ISO 7816 command/response APDU codec

pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use codec::{decode_status, is_not_found, is_success, split_chunk};
pub use commands::*;
pub use frame::CommandFrame;
pub use responses::Response;
