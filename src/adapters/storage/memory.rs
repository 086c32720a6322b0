//! # Memory Storage Adapter
//!
//! Keeps the last saved state in memory.
//! Fast, but volatile (data lost on shutdown).
//!
//! Good for:
//! - Testing
//! - Embedding the engine where persistence is handled elsewhere
//!
//! Clones share the same slot, so a test can hand one clone to the engine
//! and inspect what was saved through another.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::ports::{PersistedState, StateStore, StoreError, StoreResult};

/// In-memory storage adapter
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Mutex<MemorySlot>>,
}

#[derive(Default)]
struct MemorySlot {
    /// The last written state
    state: Option<PersistedState>,

    /// Successful writes so far
    writes: usize,

    /// Reject writes (simulates a full or read-only disk)
    fail_writes: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`
    pub fn with_state(state: PersistedState) -> Self {
        let store = Self::new();
        store.shared.lock().state = Some(state);
        store
    }

    /// The last saved state
    pub fn state(&self) -> Option<PersistedState> {
        self.shared.lock().state.clone()
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.shared.lock().writes
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.shared.lock().fail_writes = fail;
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> StoreResult<Option<PersistedState>> {
        Ok(self.shared.lock().state.clone())
    }

    fn write(&mut self, state: &PersistedState) -> StoreResult<()> {
        let mut slot = self.shared.lock();
        if slot.fail_writes {
            return Err(StoreError::Unavailable("memory store rejects writes".to_string()));
        }
        slot.state = Some(state.clone());
        slot.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
