// hcelink/src/protocol/commands/get_chunk.rs
//! Proprietary GET-CHUNK command

use crate::constants::{GET_CHUNK_CLA, GET_CHUNK_INS, GET_CHUNK_P2, MAX_CHUNK_INDEX};
use crate::{Error, Result};

/// Encode GET-CHUNK (80 10 <index> 00). The index travels in P1, so
/// anything above 255 is rejected instead of wrapping back to 0.
pub fn encode_get_chunk(index: usize) -> Result<Vec<u8>> {
    if index > MAX_CHUNK_INDEX {
        return Err(Error::ChunkIndexOutOfRange(index));
    }
    Ok(vec![GET_CHUNK_CLA, GET_CHUNK_INS, index as u8, GET_CHUNK_P2])
}

/// True when the frame carries the GET-CHUNK class and instruction.
/// P2 and any trailing bytes are not inspected.
pub fn is_get_chunk(apdu: &[u8]) -> bool {
    apdu.len() >= 4 && apdu[0] == GET_CHUNK_CLA && apdu[1] == GET_CHUNK_INS
}
