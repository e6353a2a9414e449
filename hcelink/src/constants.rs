// hcelink/src/constants.rs
//! Wire constants shared by the card and reader sides

use crate::types::Aid;

/// Application identifier of the emulated card: F0 01 02 03 04 05 06
pub const AID: Aid = Aid::from_bytes([0xF0, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

/// SELECT class byte (interindustry)
pub const SELECT_CLA: u8 = 0x00;
/// SELECT instruction byte
pub const SELECT_INS: u8 = 0xA4;
/// SELECT P1: select by name
pub const SELECT_P1: u8 = 0x04;
/// SELECT P2: first or only occurrence
pub const SELECT_P2: u8 = 0x00;

/// Proprietary GET-CHUNK class byte; P1 carries the chunk index
pub const GET_CHUNK_CLA: u8 = 0x80;
/// GET-CHUNK instruction byte
pub const GET_CHUNK_INS: u8 = 0x10;
/// GET-CHUNK P2, always zero
pub const GET_CHUNK_P2: u8 = 0x00;

/// Command header length (CLA INS P1 P2)
pub const APDU_HEADER_LEN: usize = 4;

/// Status word trailer length
pub const SW_LEN: usize = 2;

/// Maximum data bytes served by one GET-CHUNK response
pub const CHUNK_SIZE: usize = 200;

/// Chunk indices travel in P1, so at most 256 exchanges per payload
pub const MAX_CHUNK_INDEX: usize = u8::MAX as usize;

/// Largest payload a reader can fetch. A payload of exactly
/// `(MAX_CHUNK_INDEX + 1) * CHUNK_SIZE` bytes would need index 256 for its
/// empty end-of-stream chunk.
pub const MAX_PAYLOAD_LEN: usize = (MAX_CHUNK_INDEX + 1) * CHUNK_SIZE - 1;
