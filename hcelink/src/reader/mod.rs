// hcelink/src/reader/mod.rs
//! Reader (active) side: the fetch session and the single-read guard.

pub mod config;
pub mod guard;
pub mod session;

pub use config::ReaderConfig;
pub use guard::{OperationGuard, OperationId, PendingRead};
pub use session::{ReaderSession, SessionState};
