// hcelink/src/transport/mock.rs
//! In-process stand-ins for the radio, tags and ISO-DEP links

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::card::CardResponder;
use crate::transport::traits::{Adapter, IsoDep, Tag, TagCallback};
use crate::{Error, Result};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Default)]
struct LinkState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Result<Vec<u8>>>,
    connected: bool,
    connects: usize,
    closes: usize,
    timeout: Option<Duration>,
    refuse_connect: Option<Error>,
}

/// Scripted ISO-DEP link for unit tests. It records sent APDUs and returns
/// queued responses; an empty queue behaves like a lost tag. Clones share
/// state so a test can keep a handle after boxing one.
#[derive(Debug, Clone, Default)]
pub struct MockIsoDep {
    state: Arc<Mutex<LinkState>>,
}

impl MockIsoDep {
    /// Empty queue, not connected
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, resp: Vec<u8>) {
        lock(&self.state).responses.push_back(Ok(resp));
    }

    /// Queue a failing exchange
    pub fn push_error(&self, err: Error) {
        lock(&self.state).responses.push_back(Err(err));
    }

    /// Make every later `connect` fail with `err`.
    pub fn refuse_connect(&self, err: Error) {
        lock(&self.state).refuse_connect = Some(err);
    }

    /// Every command sent so far
    pub fn sent(&self) -> Vec<Vec<u8>> {
        lock(&self.state).sent.clone()
    }

    /// Number of `connect` calls
    pub fn connects(&self) -> usize {
        lock(&self.state).connects
    }

    /// Number of `close` calls
    pub fn closes(&self) -> usize {
        lock(&self.state).closes
    }

    /// Whether the link is currently open
    pub fn is_connected(&self) -> bool {
        lock(&self.state).connected
    }

    /// Timeout last set through `set_timeout`
    pub fn timeout(&self) -> Option<Duration> {
        lock(&self.state).timeout
    }
}

impl IsoDep for MockIsoDep {
    fn connect(&mut self) -> Result<()> {
        let mut s = lock(&self.state);
        if let Some(err) = &s.refuse_connect {
            return Err(err.clone());
        }
        s.connected = true;
        s.connects += 1;
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        lock(&self.state).timeout = Some(timeout);
    }

    fn transceive(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        let mut s = lock(&self.state);
        if !s.connected {
            return Err(Error::Transport("link not connected".into()));
        }
        s.sent.push(command.to_vec());
        s.responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("tag lost".into())))
    }

    fn close(&mut self) -> Result<()> {
        let mut s = lock(&self.state);
        s.connected = false;
        s.closes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LoopbackState {
    sent: Vec<Vec<u8>>,
    exchanges: usize,
    fail_after: Option<usize>,
    connected: bool,
}

/// ISO-DEP link wired straight into an in-process `CardResponder`, i.e. a
/// reader talking to a card emulator without a radio in between.
#[derive(Debug, Clone)]
pub struct LoopbackIsoDep {
    responder: CardResponder,
    state: Arc<Mutex<LoopbackState>>,
}

impl LoopbackIsoDep {
    /// Link answering from `responder`
    pub fn new(responder: CardResponder) -> Self {
        Self {
            responder,
            state: Arc::default(),
        }
    }

    /// Drop the link (transport error) once `n` exchanges have completed.
    pub fn fail_after(self, n: usize) -> Self {
        lock(&self.state).fail_after = Some(n);
        self
    }

    /// Every command that reached the responder
    pub fn sent(&self) -> Vec<Vec<u8>> {
        lock(&self.state).sent.clone()
    }

    /// Exchanges that reached the responder
    pub fn exchanges(&self) -> usize {
        lock(&self.state).exchanges
    }
}

impl IsoDep for LoopbackIsoDep {
    fn connect(&mut self) -> Result<()> {
        lock(&self.state).connected = true;
        Ok(())
    }

    fn set_timeout(&mut self, _timeout: Duration) {}

    fn transceive(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        let mut s = lock(&self.state);
        if !s.connected {
            return Err(Error::Transport("link not connected".into()));
        }
        if s.fail_after.is_some_and(|n| s.exchanges >= n) {
            s.connected = false;
            return Err(Error::Transport("tag was lost".into()));
        }
        s.exchanges += 1;
        s.sent.push(command.to_vec());
        Ok(self.responder.handle(command))
    }

    fn close(&mut self) -> Result<()> {
        lock(&self.state).connected = false;
        Ok(())
    }
}

/// Mock peer. Hands out queued ISO-DEP handles in order; once the queue is
/// empty (or if it started empty) the tag reports no ISO-DEP support.
#[derive(Default)]
pub struct MockTag {
    handles: Mutex<VecDeque<Box<dyn IsoDep>>>,
    acquired: AtomicUsize,
}

impl MockTag {
    /// Tag handing out `handles` in order
    pub fn new(handles: Vec<Box<dyn IsoDep>>) -> Self {
        Self {
            handles: Mutex::new(handles.into()),
            acquired: AtomicUsize::new(0),
        }
    }

    /// A tag that does not speak ISO-DEP at all
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// Number of handles handed out so far
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

impl Tag for MockTag {
    fn iso_dep(&self) -> Option<Box<dyn IsoDep>> {
        let handle = lock(&self.handles).pop_front()?;
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Some(handle)
    }
}

/// Mock radio. Records reader-mode and preferred-service transitions and
/// lets tests deliver tags the way the platform would: on another thread,
/// and only while reader mode is on.
pub struct MockAdapter {
    radio_on: AtomicBool,
    reader_mode: AtomicBool,
    preferred: AtomicBool,
    enable_calls: AtomicUsize,
    disable_calls: AtomicUsize,
    callback: Mutex<Option<TagCallback>>,
    last_callback: Mutex<Option<TagCallback>>,
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self {
            radio_on: AtomicBool::new(true),
            reader_mode: AtomicBool::new(false),
            preferred: AtomicBool::new(false),
            enable_calls: AtomicUsize::new(0),
            disable_calls: AtomicUsize::new(0),
            callback: Mutex::new(None),
            last_callback: Mutex::new(None),
        }
    }
}

impl MockAdapter {
    /// Radio on, reader mode off, nothing preferred
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the simulated radio on or off
    pub fn set_radio_on(&self, on: bool) {
        self.radio_on.store(on, Ordering::SeqCst);
    }

    /// Whether reader mode is on
    pub fn is_reader_mode(&self) -> bool {
        self.reader_mode.load(Ordering::SeqCst)
    }

    /// Whether the preferred service is set
    pub fn is_preferred(&self) -> bool {
        self.preferred.load(Ordering::SeqCst)
    }

    /// Number of `enable_reader_mode` calls
    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    /// Number of `disable_reader_mode` calls
    pub fn disable_calls(&self) -> usize {
        self.disable_calls.load(Ordering::SeqCst)
    }

    /// Deliver `tag` on a fresh thread if reader mode is on. Returns the
    /// thread handle so tests can join it.
    pub fn present(&self, tag: Arc<dyn Tag>) -> Option<JoinHandle<()>> {
        let callback = lock(&self.callback).clone()?;
        Some(std::thread::spawn(move || callback(tag.as_ref())))
    }

    /// Deliver `tag` to the most recently registered callback even if
    /// reader mode has been switched off since, as a late platform callback
    /// would.
    pub fn present_stale(&self, tag: &dyn Tag) -> bool {
        let Some(callback) = lock(&self.last_callback).clone() else {
            return false;
        };
        callback(tag);
        true
    }
}

impl Adapter for MockAdapter {
    fn is_enabled(&self) -> bool {
        self.radio_on.load(Ordering::SeqCst)
    }

    fn enable_reader_mode(&self, on_tag: TagCallback) -> Result<()> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_callback) = Some(on_tag.clone());
        *lock(&self.callback) = Some(on_tag);
        self.reader_mode.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable_reader_mode(&self) {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.callback).take();
        self.reader_mode.store(false, Ordering::SeqCst);
    }

    fn set_preferred_service(&self) -> Result<()> {
        self.preferred.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn unset_preferred_service(&self) -> Result<()> {
        self.preferred.store(false, Ordering::SeqCst);
        Ok(())
    }
}
