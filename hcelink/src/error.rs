// hcelink/src/error.rs
//! Crate-wide error type

use thiserror::Error;

use crate::types::StatusWord;

/// Common error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The device has no NFC radio
    #[error("nfc adapter not available")]
    NoAdapter,

    /// A read is already armed
    #[error("another nfc read is in progress")]
    Busy,

    /// The detected peer does not speak ISO-DEP
    #[error("tag does not support iso-dep")]
    TagUnsupported,

    /// SELECT answered with a non-success status
    #[error("select failed: {0}")]
    SelectFailed(StatusWord),

    /// GET-CHUNK answered with a non-success status
    #[error("get-chunk failed: {0}")]
    ChunkFailed(StatusWord),

    /// No outcome before the read deadline
    #[error("no peer detected before the deadline")]
    Timeout,

    /// The read was cancelled before it completed
    #[error("read cancelled")]
    Cancelled,

    /// Any other read failure, with its message
    #[error("read error: {0}")]
    ReadError(String),

    /// Frame shorter or longer than its layout allows
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Bytes the layout requires
        expected: usize,
        /// Bytes present
        actual: usize,
    },

    /// Frame with a well-formed length but bad content
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Chunk index that does not fit in P1
    #[error("chunk index {0} does not fit in a single byte")]
    ChunkIndexOutOfRange(usize),

    /// Payload longer than a reader can fetch
    #[error("payload of {actual} bytes exceeds the {max} byte transfer limit")]
    PayloadTooLarge {
        /// Largest transferable payload
        max: usize,
        /// Length that was offered
        actual: usize,
    },

    /// Link-level failure from the ISO-DEP transport
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Link-level failures that warrant a fresh connection to the same tag.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Fold errors that have no caller-facing kind into `ReadError`.
    pub fn into_read_error(self) -> Self {
        match self {
            Error::NoAdapter
            | Error::Busy
            | Error::TagUnsupported
            | Error::SelectFailed(_)
            | Error::ChunkFailed(_)
            | Error::Timeout
            | Error::Cancelled
            | Error::ReadError(_) => self,
            other => Error::ReadError(other.to_string()),
        }
    }
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;
