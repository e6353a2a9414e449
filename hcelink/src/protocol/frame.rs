// hcelink/src/protocol/frame.rs
//! Short command APDU framing

use crate::constants::APDU_HEADER_LEN;
use crate::protocol::parser;
use crate::{Error, Result};

/// Short command APDU.
/// Format: [CLA(1)] [INS(1)] [P1(1)] [P2(1)] ([Lc(1)] [Data(Lc)])
/// A header-only frame carries no Lc. Trailing bytes beyond Lc (an Le) are
/// tolerated when parsing and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    /// CLA
    pub class: u8,
    /// INS
    pub instruction: u8,
    /// P1
    pub p1: u8,
    /// P2
    pub p2: u8,
    /// Command data; its length is sent as Lc
    pub data: Vec<u8>,
}

impl CommandFrame {
    /// Create a frame from header bytes and data
    pub fn new(class: u8, instruction: u8, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self {
            class,
            instruction,
            p1,
            p2,
            data,
        }
    }

    /// Encode the frame into its flat wire form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.data.len() > u8::MAX as usize {
            return Err(Error::InvalidLength {
                expected: u8::MAX as usize,
                actual: self.data.len(),
            });
        }

        let mut out = Vec::with_capacity(APDU_HEADER_LEN + 1 + self.data.len());
        out.extend_from_slice(&[self.class, self.instruction, self.p1, self.p2]);
        if !self.data.is_empty() {
            out.push(self.data.len() as u8);
            out.extend_from_slice(&self.data);
        }
        Ok(out)
    }

    /// Parse a flat command APDU.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        parser::ensure_len(frame, APDU_HEADER_LEN)?;

        let data = match frame.get(APDU_HEADER_LEN) {
            None => Vec::new(),
            Some(&lc) => parser::slice_at(frame, APDU_HEADER_LEN + 1, lc as usize)?.to_vec(),
        };

        Ok(Self {
            class: frame[0],
            instruction: frame[1],
            p1: frame[2],
            p2: frame[3],
            data,
        })
    }

    /// Header bytes as a tuple, handy for shape matching.
    pub fn header(&self) -> (u8, u8, u8, u8) {
        (self.class, self.instruction, self.p1, self.p2)
    }
}
