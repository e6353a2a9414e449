// hcelink/src/reader/guard.rs
//! Single-read gate between the caller and the tag callback

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::{Error, Result};

/// Identifies one armed read. Callbacks carry the id of the operation they
/// were registered for, so a late callback can never complete a newer one.
pub type OperationId = u64;

type Deactivate = Box<dyn Fn() + Send + Sync>;

struct Pending {
    id: OperationId,
    tx: Sender<Result<Vec<u8>>>,
}

/// Single-slot gate for read operations: `Idle -> Armed -> Idle`.
///
/// At most one read may be armed. The first of success, failure, timeout
/// or cancellation completes it; every later signal is ignored. The
/// deactivate hook runs before the outcome is handed to the waiter.
pub struct OperationGuard {
    armed: AtomicBool,
    session_active: AtomicBool,
    next_id: AtomicU64,
    pending: Mutex<Option<Pending>>,
    deactivate: Deactivate,
}

impl Default for OperationGuard {
    fn default() -> Self {
        Self::with_deactivate(|| {})
    }
}

impl OperationGuard {
    /// A guard with a no-op deactivate hook
    pub fn new() -> Self {
        Self::default()
    }

    /// `deactivate` runs on every completion, e.g. to turn reader mode off.
    pub fn with_deactivate(deactivate: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            armed: AtomicBool::new(false),
            session_active: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            pending: Mutex::new(None),
            deactivate: Box::new(deactivate),
        }
    }

    /// Arm a new read and run `activate` for it. Fails with `Busy` when a
    /// read is already armed; the armed read is left untouched. If
    /// `activate` fails the read completes with that error.
    ///
    /// Arming and activation happen under the slot lock, as do disarming
    /// and deactivation, so a finishing read can never switch the transport
    /// off underneath its successor.
    pub fn request_read<F>(self: &Arc<Self>, activate: F) -> Result<PendingRead>
    where
        F: FnOnce(OperationId) -> Result<()>,
    {
        let (tx, rx) = mpsc::channel();
        let mut slot = self.slot();
        if slot.is_some() {
            log::warn!("guard: read requested while another is armed");
            return Err(Error::Busy);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        *slot = Some(Pending { id, tx });
        self.armed.store(true, Ordering::SeqCst);
        log::debug!("guard: armed read {}", id);

        let pending = PendingRead {
            id,
            rx,
            guard: Arc::clone(self),
        };
        match activate(id) {
            Ok(()) => drop(slot),
            Err(e) => {
                log::warn!("guard: activation for read {} failed: {}", id, e);
                let taken = self.disarm(&mut slot);
                drop(slot);
                if let Some(taken) = taken {
                    self.deliver(taken, Err(e));
                }
            }
        }
        Ok(pending)
    }

    /// True while some read is armed.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    /// True while `id` is the armed operation.
    pub fn is_armed_for(&self, id: OperationId) -> bool {
        self.is_armed() && self.slot().as_ref().is_some_and(|p| p.id == id)
    }

    /// Claim the single reader-session slot for operation `id`. Returns
    /// `None` if `id` is not armed or another session is running.
    pub fn begin_session(&self, id: OperationId) -> Option<SessionSlot<'_>> {
        if !self.is_armed_for(id) {
            return None;
        }
        self.session_active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SessionSlot { guard: self })
    }

    /// Deliver `outcome` to operation `id`. Returns false (and does
    /// nothing) if `id` is no longer armed.
    pub fn complete(&self, id: OperationId, outcome: Result<Vec<u8>>) -> bool {
        let pending = {
            let mut slot = self.slot();
            match slot.as_ref() {
                Some(p) if p.id == id => self.disarm(&mut slot),
                _ => None,
            }
        };
        match pending {
            Some(pending) => {
                self.deliver(pending, outcome);
                true
            }
            None => {
                log::debug!("guard: ignoring late completion for read {}", id);
                false
            }
        }
    }

    /// Cancel whatever read is armed. Returns true if one was. The
    /// transport is switched off either way.
    pub fn cancel(&self) -> bool {
        let pending = {
            let mut slot = self.slot();
            self.disarm(&mut slot)
        };
        match pending {
            Some(pending) => {
                self.deliver(pending, Err(Error::Cancelled));
                true
            }
            None => false,
        }
    }

    // Caller holds the slot lock for the whole call.
    fn disarm(&self, slot: &mut MutexGuard<'_, Option<Pending>>) -> Option<Pending> {
        self.armed.store(false, Ordering::SeqCst);
        (self.deactivate)();
        slot.take()
    }

    fn deliver(&self, pending: Pending, outcome: Result<Vec<u8>>) {
        match &outcome {
            Ok(bytes) => log::debug!("guard: read {} succeeded ({} bytes)", pending.id, bytes.len()),
            Err(e) => log::debug!("guard: read {} failed: {}", pending.id, e),
        }
        // The waiter may have gone away; the outcome is simply dropped then.
        let _ = pending.tx.send(outcome);
    }

    fn slot(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Held while a reader session runs; releases the slot on drop.
pub struct SessionSlot<'a> {
    guard: &'a OperationGuard,
}

impl Drop for SessionSlot<'_> {
    fn drop(&mut self) {
        self.guard.session_active.store(false, Ordering::SeqCst);
    }
}

/// Receipt for an armed read. Exactly one outcome arrives through it.
pub struct PendingRead {
    id: OperationId,
    rx: Receiver<Result<Vec<u8>>>,
    guard: Arc<OperationGuard>,
}

impl PendingRead {
    /// Id of the armed operation
    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Block until the read completes. If nothing completes it within
    /// `timeout`, it is completed with `Timeout`; a completion that won the
    /// race just before the deadline is returned instead.
    pub fn wait(self, timeout: Duration) -> Result<Vec<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                if self.guard.complete(self.id, Err(Error::Timeout)) {
                    log::info!("guard: read {} timed out after {:?}", self.id, timeout);
                }
                self.rx.recv().unwrap_or(Err(Error::Cancelled))
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::Cancelled),
        }
    }
}

impl Drop for PendingRead {
    fn drop(&mut self) {
        // abandoned without waiting
        if self.guard.is_armed_for(self.id) {
            self.guard.complete(self.id, Err(Error::Cancelled));
        }
    }
}
