// hcelink/src/card/mod.rs
//! Card-emulation (passive) side: the payload slot and the APDU responder.

pub mod responder;
pub mod store;

pub use responder::CardResponder;
pub use store::PayloadStore;

/// Chunk `index` of `payload` as served by the responder, or `None` when
/// the index is past the end. Used by benches and test fixtures.
pub fn chunk_of(payload: &[u8], index: usize) -> Option<&[u8]> {
    let size = crate::constants::CHUNK_SIZE;
    let offset = index.checked_mul(size)?;
    if offset >= payload.len() {
        return None;
    }
    Some(&payload[offset..payload.len().min(offset + size)])
}
