// hcelink/src/protocol/parser.rs
//! Bounds-checked byte access for frame parsing

use crate::types::StatusWord;
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    let end = idx.checked_add(len).ok_or(Error::InvalidLength {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    ensure_len(data, end)?;
    Ok(&data[idx..end])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Split a response into its data portion and trailing status word.
pub fn split_trailer(data: &[u8]) -> Result<(&[u8], StatusWord)> {
    ensure_len(data, crate::constants::SW_LEN)?;
    let at = data.len() - crate::constants::SW_LEN;
    let sw = StatusWord::from_bytes(data[at], data[at + 1]);
    Ok((&data[..at], sw))
}
