// hcelink/src/protocol/commands/mod.rs
//! Command APDUs understood by the card side

pub mod get_chunk;
pub mod select;

pub use get_chunk::{encode_get_chunk, is_get_chunk};
pub use select::{encode_select, is_select};

use crate::protocol::frame::CommandFrame;
use crate::protocol::parser;
use crate::{Error, Result};

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// SELECT by application identifier
    Select {
        /// Requested application identifier
        aid: Vec<u8>,
    },
    /// Fetch the chunk at `index` of the current payload
    GetChunk {
        /// Chunk index, carried in P1
        index: u8,
    },
    /// Any other well-formed header
    Other {
        /// CLA byte
        class: u8,
        /// INS byte
        instruction: u8,
    },
}

impl Command {
    /// Encode the command into a raw command APDU.
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Select { aid } => encode_select(aid),
            Self::GetChunk { index } => encode_get_chunk(*index as usize),
            Self::Other { class, instruction } => {
                CommandFrame::new(*class, *instruction, 0x00, 0x00, Vec::new()).encode()
            }
        }
    }

    /// Classify a raw command APDU.
    ///
    /// A SELECT header whose Lc overruns the frame is an error; a 4-byte
    /// SELECT header with no Lc at all is not treated as SELECT.
    pub fn decode(apdu: &[u8]) -> Result<Self> {
        if apdu.is_empty() {
            return Err(Error::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }

        if is_select(apdu) {
            let frame = CommandFrame::parse(apdu)?;
            return Ok(Self::Select { aid: frame.data });
        }

        if is_get_chunk(apdu) {
            return Ok(Self::GetChunk {
                index: parser::byte_at(apdu, 2)?,
            });
        }

        if apdu.len() < crate::constants::APDU_HEADER_LEN {
            return Err(Error::FrameFormat(format!(
                "command header truncated: {}",
                crate::utils::bytes_to_hex_spaced(apdu)
            )));
        }

        Ok(Self::Other {
            class: apdu[0],
            instruction: apdu[1],
        })
    }
}
