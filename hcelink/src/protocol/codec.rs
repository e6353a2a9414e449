// hcelink/src/protocol/codec.rs
//! Flat helpers over the frame codec, as used by the reader loop

use crate::protocol::parser;
use crate::types::StatusWord;
use crate::Result;

pub use super::commands::{encode_get_chunk, encode_select};

/// Read the status word from the end of a response APDU.
pub fn decode_status(response: &[u8]) -> Result<StatusWord> {
    parser::split_trailer(response).map(|(_, sw)| sw)
}

/// Split a response APDU into its data portion and status word.
pub fn split_chunk(response: &[u8]) -> Result<(&[u8], StatusWord)> {
    parser::split_trailer(response)
}

/// True for 90 00
pub fn is_success(sw: StatusWord) -> bool {
    sw.is_success()
}

/// True for 6A 82
pub fn is_not_found(sw: StatusWord) -> bool {
    sw.is_not_found()
}
