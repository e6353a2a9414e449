// hcelink/src/card/responder.rs
//! Command APDU in, response APDU out

use crate::card::chunk_of;
use crate::card::store::PayloadStore;
use crate::constants::AID;
use crate::protocol::{Command, Response, is_select};
use crate::types::{Aid, StatusWord};

/// Answers command APDUs on the card-emulation side.
///
/// Each command is answered from the current store contents and the
/// command itself; nothing is remembered between calls, so a reader may
/// re-select or re-request a chunk at any time.
#[derive(Debug, Clone)]
pub struct CardResponder {
    store: PayloadStore,
    aid: Aid,
}

impl CardResponder {
    /// Responder for the built-in AID
    pub fn new(store: PayloadStore) -> Self {
        Self::with_aid(store, AID)
    }

    /// Responder answering SELECT for `aid` instead
    pub fn with_aid(store: PayloadStore, aid: Aid) -> Self {
        Self { store, aid }
    }

    /// The store this responder serves from
    pub fn store(&self) -> &PayloadStore {
        &self.store
    }

    /// Produce the response APDU for a raw command APDU.
    pub fn handle(&self, apdu: &[u8]) -> Vec<u8> {
        self.respond(apdu).encode()
    }

    /// Same as `handle` but returns the structured response.
    pub fn respond(&self, apdu: &[u8]) -> Response {
        let command = match Command::decode(apdu) {
            Ok(command) => command,
            // SELECT whose Lc overruns the frame
            Err(e) if is_select(apdu) => {
                log::debug!("responder: malformed select: {}", e);
                return Response::status(StatusWord::NOT_FOUND);
            }
            Err(e) => {
                log::debug!("responder: unparseable command: {}", e);
                return Response::status(StatusWord::INS_NOT_SUPPORTED);
            }
        };

        match command {
            Command::Select { aid } => {
                if self.aid.matches(&aid) {
                    log::debug!("responder: selected {}", self.aid);
                    Response::status(StatusWord::SUCCESS)
                } else {
                    log::debug!(
                        "responder: select for unknown aid {}",
                        crate::utils::bytes_to_hex(&aid)
                    );
                    Response::status(StatusWord::NOT_FOUND)
                }
            }
            Command::GetChunk { index } => self.serve_chunk(index),
            Command::Other { class, instruction } => {
                log::debug!(
                    "responder: unsupported instruction cla={:#04x} ins={:#04x}",
                    class,
                    instruction
                );
                Response::status(StatusWord::INS_NOT_SUPPORTED)
            }
        }
    }

    fn serve_chunk(&self, index: u8) -> Response {
        let Some(payload) = self.store.get() else {
            log::debug!("responder: chunk {} requested with no payload", index);
            return Response::status(StatusWord::NOT_FOUND);
        };

        match chunk_of(&payload, index as usize) {
            Some(chunk) => {
                log::trace!("responder: chunk {} -> {} bytes", index, chunk.len());
                Response::success(chunk.to_vec())
            }
            // explicit end-of-stream, distinct from a short chunk
            None => Response::success(Vec::new()),
        }
    }

    /// Hook for the platform's link-deactivated callback. The responder
    /// keeps no per-link state, so this only records the event.
    pub fn deactivated(&self, reason: i32) {
        log::debug!("responder: link deactivated (reason {})", reason);
    }
}
