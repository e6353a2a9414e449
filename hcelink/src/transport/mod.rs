// hcelink/src/transport/mod.rs
//! Seams to the platform NFC stack

pub mod mock;
pub mod traits;

pub use mock::{LoopbackIsoDep, MockAdapter, MockIsoDep, MockTag};
pub use traits::{Adapter, IsoDep, Tag, TagCallback};
