//! In-memory session store

use cadence_core::{CadenceError, Result, SessionStore, Track};
use std::sync::{Arc, Mutex};

/// Session store that keeps the playlist in memory
///
/// Clones share the same contents, so a test can keep one clone and hand the
/// other to a controller. Writes can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    tracks: Vec<Track>,
    saves: usize,
    fail_writes: bool,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `tracks`
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let store = Self::new();
        store.lock().tracks = tracks;
        store
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Currently stored tracks
    pub fn tracks(&self) -> Vec<Track> {
        self.lock().tracks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Vec<Track> {
        self.tracks()
    }

    fn save(&self, tracks: &[Track]) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(CadenceError::storage("memory store is read-only"));
        }
        inner.tracks = tracks.to_vec();
        inner.saves += 1;
        Ok(())
    }
}
