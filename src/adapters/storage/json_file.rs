//! # JSON File Storage Adapter
//!
//! Persists state as a pretty-printed JSON document.
//! Each write replaces the whole file; there is no journaling, so a crash
//! mid-write can leave a truncated file (which the next load treats as
//! corrupt and discards).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ports::{PersistedState, StateStore, StoreResult};

/// File-backed storage adapter
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store state at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn read(&self) -> StoreResult<Option<PersistedState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        PersistedState::from_json_slice(&bytes).map(Some)
    }

    fn write(&mut self, state: &PersistedState) -> StoreResult<()> {
        let bytes = state.to_json_vec()?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
