// hcelink/src/protocol/responses/mod.rs
//! Response APDUs: data followed by SW1 SW2

use crate::constants::SW_LEN;
use crate::protocol::parser;
use crate::types::StatusWord;
use crate::Result;

/// Response APDU: data followed by the two-byte status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response data, possibly empty
    pub data: Vec<u8>,
    /// Trailing status word
    pub status: StatusWord,
}

impl Response {
    /// Create a response from data and status
    pub fn new(data: Vec<u8>, status: StatusWord) -> Self {
        Self { data, status }
    }

    /// Status-only response with no data.
    pub fn status(status: StatusWord) -> Self {
        Self::new(Vec::new(), status)
    }

    /// Data followed by 90 00.
    pub fn success(data: Vec<u8>) -> Self {
        Self::new(data, StatusWord::SUCCESS)
    }

    /// Decode a raw response APDU. Fails if it is shorter than the trailer.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let (data, status) = parser::split_trailer(raw)?;
        Ok(Self::new(data.to_vec(), status))
    }

    /// Flat wire form: data then SW1 SW2
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + SW_LEN);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.status.to_bytes());
        out
    }

    /// Status is 90 00
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status is 6A 82
    pub fn is_not_found(&self) -> bool {
        self.status.is_not_found()
    }
}
