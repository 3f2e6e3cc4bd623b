#![forbid(unsafe_code)]

//! The persistence collaborator: load-once at startup, best-effort mirroring
//! afterward.
//!
//! # Design
//!
//! State in the store is the source of truth; storage is a mirror. The two
//! rules that follow:
//!
//! 1. **Load before first render.** [`bootstrap`] awaits [`CounterStorage::load`]
//!    before the store exists, so no caller can ever observe an
//!    uninitialized snapshot. Load failure falls back to
//!    [`Counter::default`] with a warning; it never leaves startup hanging.
//! 2. **Never block state on storage.** [`mirror_to_storage`] wires saving
//!    as an ordinary store subscriber: fire-and-forget, failures logged and
//!    swallowed. A save error neither blocks `replace` nor reverses the
//!    in-memory change.
//!
//! [`StubDatabase`] is the fixed-delay fake the pedagogical variants use;
//! [`JsonFileStorage`] is a real single-file backend. Both complete on the
//! calling thread (single logical thread, no executor). No retry anywhere:
//! a production system would add retry/backoff around the storage
//! collaborator only, never around the store's in-memory operations.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tally_store::{Store, Subscription};
use tracing::{debug, info, warn};

use crate::model::Counter;

/// Storage failure. Never reaches the store; callers log and fall back.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying file or device error.
    Io(std::io::Error),
    /// The stored payload exists but does not decode as a snapshot.
    Corrupt(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage I/O error: {err}"),
            Self::Corrupt(err) => write!(f, "stored snapshot is corrupt: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err)
    }
}

/// The persistence collaborator.
///
/// Both operations are single-shot and complete before returning control to
/// the event flow; there is no cancellation and no timeout.
pub trait CounterStorage {
    /// Produce the initial snapshot.
    fn load(&self) -> Result<Counter, StorageError>;

    /// Persist a snapshot. Best-effort; callers must not propagate failure
    /// into state handling.
    fn save(&self, snapshot: Counter) -> Result<(), StorageError>;
}

/// Fixed-delay stub standing in for a database.
///
/// `load` sleeps for the configured delay, then returns a constant default
/// snapshot; `save` sleeps and discards. Latency simulation only — there are
/// no failure modes to exercise.
pub struct StubDatabase {
    delay: Duration,
}

impl StubDatabase {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubDatabase {
    /// 50ms: long enough to notice in a trace, short enough for tests.
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl CounterStorage for StubDatabase {
    fn load(&self) -> Result<Counter, StorageError> {
        thread::sleep(self.delay);
        debug!(delay_ms = self.delay.as_millis() as u64, "stub load complete");
        Ok(Counter::default())
    }

    fn save(&self, snapshot: Counter) -> Result<(), StorageError> {
        thread::sleep(self.delay);
        debug!(value = snapshot.value, "stub save complete (discarded)");
        Ok(())
    }
}

/// Single-file JSON backend.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CounterStorage for JsonFileStorage {
    fn load(&self) -> Result<Counter, StorageError> {
        let bytes = fs::read(&self.path)?;
        let snapshot = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), "snapshot loaded");
        Ok(snapshot)
    }

    fn save(&self, snapshot: Counter) -> Result<(), StorageError> {
        let json = serde_json::to_vec(&snapshot)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), value = snapshot.value, "snapshot saved");
        Ok(())
    }
}

/// Load the initial snapshot, falling back to the documented default when
/// storage fails.
#[must_use]
pub fn load_or_default(storage: &dyn CounterStorage) -> Counter {
    match storage.load() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(%err, "load failed, starting from default snapshot");
            Counter::default()
        }
    }
}

/// Await the initial load, then construct the store around the result.
///
/// The load completes before the store exists, so there is no window in
/// which `get()` could observe an uninitialized snapshot.
#[must_use]
pub fn bootstrap(storage: &dyn CounterStorage) -> Store<Counter> {
    let initial = load_or_default(storage);
    info!(value = initial.value, "store initialized");
    Store::new(initial)
}

/// Mirror every published snapshot into storage, fire-and-forget.
///
/// Save failures are logged and swallowed; `replace` stays independent of
/// persistence latency and outcome. Keep the returned subscription alive for
/// as long as mirroring should continue.
#[must_use]
pub fn mirror_to_storage(
    store: &Store<Counter>,
    storage: Rc<dyn CounterStorage>,
) -> Subscription {
    store.subscribe(move |snapshot: &Counter| {
        if let Err(err) = storage.save(*snapshot) {
            warn!(%err, value = snapshot.value, "best-effort save failed");
        }
    })
}
