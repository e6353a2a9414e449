//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize loopback and mock-adapter setup so tests across
//! the crate and tests/ directory wire card and reader the same way.
#![allow(dead_code)]

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::card::{CardResponder, PayloadStore};
use crate::device::{Device, DeviceBuilder};
use crate::reader::ReaderConfig;
use crate::transport::{IsoDep, LoopbackIsoDep, MockAdapter, MockTag, Tag};
use crate::utils::remaining;

/// A responder serving `payload` from its own store.
#[doc(hidden)]
pub fn card_with_payload(payload: &[u8]) -> CardResponder {
    let store = PayloadStore::new();
    store.set(payload);
    CardResponder::new(store)
}

/// A tag whose every ISO-DEP handle loops back into `responder`.
/// `handles` bounds how many times the tag can be (re)acquired.
#[doc(hidden)]
pub fn loopback_tag(responder: &CardResponder, handles: usize) -> MockTag {
    let links: Vec<Box<dyn IsoDep>> = (0..handles)
        .map(|_| Box::new(LoopbackIsoDep::new(responder.clone())) as Box<dyn IsoDep>)
        .collect();
    MockTag::new(links)
}

/// A device backed by a MockAdapter with pauses disabled.
#[doc(hidden)]
pub fn mock_device() -> (Device, Arc<MockAdapter>) {
    let adapter = Arc::new(MockAdapter::new());
    let device = DeviceBuilder::new()
        .with_adapter(adapter.clone())
        .with_config(ReaderConfig::immediate())
        .build();
    (device, adapter)
}

/// Poll `cond` until it holds or `timeout` passes.
#[doc(hidden)]
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while !cond() {
        if remaining(deadline).is_zero() {
            return false;
        }
        thread::sleep(Duration::from_millis(1));
    }
    true
}

/// Once reader mode comes on, deliver `tag` the way the platform would and
/// wait for the callback to return. Gives up after five seconds.
#[doc(hidden)]
pub fn present_when_reading(adapter: Arc<MockAdapter>, tag: Arc<dyn Tag>) -> JoinHandle<bool> {
    thread::spawn(move || {
        if !wait_for(Duration::from_secs(5), || adapter.is_reader_mode()) {
            return false;
        }
        match adapter.present(tag) {
            Some(handle) => handle.join().is_ok(),
            None => false,
        }
    })
}
