//! Hex rendering for identifiers and raw APDUs in log lines and errors.

use std::fmt::Write;

/// Bytes shown by `apdu_summary` before the rest is elided
pub const SUMMARY_BYTES: usize = 16;

/// Lowercase hex without separators: `&[0x6a, 0x82]` -> `"6a82"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        // writing to a String cannot fail
        let _ = write!(s, "{:02x}", b);
        s
    })
}

/// Lowercase hex, one space between bytes: `&[0x90, 0x00]` -> `"90 00"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(s, "{:02x}", b);
    }
    s
}

/// Spaced hex of at most `SUMMARY_BYTES` bytes, noting how many were cut.
/// A full chunk response is 202 bytes, too long for a trace line.
pub fn apdu_summary(apdu: &[u8]) -> String {
    if apdu.len() <= SUMMARY_BYTES {
        return bytes_to_hex_spaced(apdu);
    }
    format!(
        "{} .. (+{} bytes)",
        bytes_to_hex_spaced(&apdu[..SUMMARY_BYTES]),
        apdu.len() - SUMMARY_BYTES
    )
}
