// hcelink/src/protocol/commands/select.rs
//! SELECT by application identifier

use crate::constants::{SELECT_CLA, SELECT_INS, SELECT_P1, SELECT_P2};
use crate::protocol::frame::CommandFrame;
use crate::Result;

/// Encode SELECT by name (00 A4 04 00)
/// Layout: header(4) + lc(1) + aid(lc)
pub fn encode_select(aid: &[u8]) -> Result<Vec<u8>> {
    CommandFrame::new(SELECT_CLA, SELECT_INS, SELECT_P1, SELECT_P2, aid.to_vec()).encode()
}

/// True when the header is SELECT-by-name and an Lc byte is present.
pub fn is_select(apdu: &[u8]) -> bool {
    apdu.len() >= 5 && apdu[..4] == [SELECT_CLA, SELECT_INS, SELECT_P1, SELECT_P2]
}
