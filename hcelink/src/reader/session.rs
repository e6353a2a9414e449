// hcelink/src/reader/session.rs
//! One select-and-fetch exchange with a peer

use std::thread;

use crate::constants::{AID, CHUNK_SIZE};
use crate::protocol::{Response, encode_get_chunk, encode_select};
use crate::reader::config::{NOT_FOUND_RETRIES, ReaderConfig, SESSION_ATTEMPTS};
use crate::transport::{IsoDep, Tag};
use crate::types::{Aid, StatusWord};
use crate::utils::apdu_summary;
use crate::{Error, Result};

/// Progress of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing sent yet
    Idle,
    /// SELECT in flight
    Selecting,
    /// Requesting chunk `index` with `received` bytes so far
    Fetching {
        /// Chunk being requested
        index: usize,
        /// Payload bytes collected so far
        received: usize,
    },
    /// Payload complete
    Done,
    /// Gave up; the error was returned
    Failed,
}

/// Active-side driver: select the card application, then pull chunks in
/// order until end-of-stream.
pub struct ReaderSession {
    config: ReaderConfig,
    aid: Aid,
    state: SessionState,
}

impl ReaderSession {
    /// Session for the built-in AID
    pub fn new(config: ReaderConfig) -> Self {
        Self::with_aid(config, AID)
    }

    /// Session selecting `aid` instead
    pub fn with_aid(config: ReaderConfig, aid: Aid) -> Self {
        Self {
            config,
            aid,
            state: SessionState::Idle,
        }
    }

    /// Where the last fetch got to
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch the payload from a detected tag.
    ///
    /// A transport-level failure gets exactly one more attempt on a fresh
    /// ISO-DEP handle from the same tag. Status-word failures are final.
    pub fn run(&mut self, tag: &dyn Tag) -> Result<Vec<u8>> {
        let mut link = tag.iso_dep().ok_or(Error::TagUnsupported)?;
        let mut attempt = 1;

        loop {
            let err = match self.fetch_payload(link.as_mut()) {
                Ok(payload) => return Ok(payload),
                Err(e) => e,
            };

            if !err.is_transient() || attempt >= SESSION_ATTEMPTS {
                return Err(err);
            }

            log::warn!(
                "reader: attempt {} failed ({}), reconnecting in {:?}",
                attempt,
                err,
                self.config.reconnect_pause
            );
            thread::sleep(self.config.reconnect_pause);

            link = match tag.iso_dep() {
                Some(fresh) => fresh,
                None => return Err(err),
            };
            attempt += 1;
        }
    }

    /// One complete exchange over `link`: connect, select, fetch, close.
    /// The link is closed on every path.
    pub fn fetch_payload(&mut self, link: &mut dyn IsoDep) -> Result<Vec<u8>> {
        self.state = SessionState::Idle;
        if let Err(e) = link.connect() {
            log::debug!("reader: connect failed: {}", e);
            self.transition(SessionState::Failed);
            return Err(e);
        }
        link.set_timeout(self.config.exchange_timeout);

        let result = self.exchange(link);
        let closed = link.close();

        match result {
            Ok(payload) => {
                closed?;
                self.transition(SessionState::Done);
                log::info!("reader: received {} bytes", payload.len());
                Ok(payload)
            }
            Err(e) => {
                if let Err(close_err) = closed {
                    log::debug!("reader: close after failure: {}", close_err);
                }
                self.transition(SessionState::Failed);
                Err(e)
            }
        }
    }

    fn exchange(&mut self, link: &mut dyn IsoDep) -> Result<Vec<u8>> {
        self.transition(SessionState::Selecting);
        let sw = self.select(link)?;
        if !sw.is_success() {
            return Err(Error::SelectFailed(sw));
        }

        let mut payload = Vec::new();
        let mut index = 0usize;
        loop {
            self.transition(SessionState::Fetching {
                index,
                received: payload.len(),
            });

            let chunk = self.get_chunk(link, index)?;
            if chunk.len() > CHUNK_SIZE {
                return Err(Error::FrameFormat(format!(
                    "chunk {} carries {} bytes, limit is {}",
                    index,
                    chunk.len(),
                    CHUNK_SIZE
                )));
            }
            if chunk.is_empty() {
                break;
            }
            let last = chunk.len() < CHUNK_SIZE;
            payload.extend_from_slice(&chunk);
            if last {
                break;
            }

            index += 1;
            if !self.config.chunk_pause.is_zero() {
                thread::sleep(self.config.chunk_pause);
            }
        }
        Ok(payload)
    }

    fn select(&self, link: &mut dyn IsoDep) -> Result<StatusWord> {
        let command = encode_select(self.aid.as_bytes())?;
        let response = transmit(link, &command)?;
        log::debug!("reader: select {} -> {}", self.aid, response.status);
        Ok(response.status)
    }

    // 6A82 usually means the card side lost its application binding
    // between commands; re-select and ask for the same chunk again.
    fn get_chunk(&self, link: &mut dyn IsoDep, index: usize) -> Result<Vec<u8>> {
        let command = encode_get_chunk(index)?;
        let mut response = transmit(link, &command)?;

        let mut retries = 0;
        while response.is_not_found() && retries < NOT_FOUND_RETRIES {
            retries += 1;
            log::warn!("reader: chunk {} not found, re-selecting", index);
            if !self.select(link)?.is_success() {
                break;
            }
            response = transmit(link, &command)?;
        }

        if !response.is_success() {
            return Err(Error::ChunkFailed(response.status));
        }
        Ok(response.data)
    }

    fn transition(&mut self, next: SessionState) {
        log::trace!("reader: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn transmit(link: &mut dyn IsoDep, command: &[u8]) -> Result<Response> {
    log::trace!("reader: >> {}", apdu_summary(command));
    let raw = link.transceive(command)?;
    log::trace!("reader: << {}", apdu_summary(&raw));
    Response::decode(&raw)
}
