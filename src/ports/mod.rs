//! # Ports
//!
//! Trait contracts between the engine and its storage adapters,
//! plus the data that crosses them.
//!
//! ```text
//! engine ──► PersistenceStore ──► dyn StateStore ──► JsonFileStore
//!                                                 └► MemoryStore
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::EngineStatistics;

/// Version tag written into every saved state
pub const STATE_FORMAT_VERSION: &str = "2.0";

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by a state store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed state: {0}")]
    Format(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// PERSISTED STATE
// ============================================================================

/// Composite registry and statistics as written to durable storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Adaptive binary codes of numbers proven composite
    #[serde(default)]
    pub codes: Vec<String>,

    /// Statistics snapshot (absent in older files)
    #[serde(default)]
    pub stats: Option<EngineStatistics>,

    /// Unix time of the save, in seconds
    #[serde(default)]
    pub timestamp: f64,

    #[serde(default)]
    pub version: String,
}

impl PersistedState {
    /// Stamp a snapshot with the current time and format version
    pub fn new(codes: Vec<String>, stats: EngineStatistics) -> Self {
        Self {
            codes,
            stats: Some(stats),
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
            version: STATE_FORMAT_VERSION.to_string(),
        }
    }

    /// A state carrying only codes (the older list-only layout)
    pub fn codes_only(codes: Vec<String>) -> Self {
        Self {
            codes,
            stats: None,
            timestamp: 0.0,
            version: String::new(),
        }
    }

    /// Parse either accepted layout
    pub fn from_json_slice(bytes: &[u8]) -> StoreResult<Self> {
        let file: StateFile = serde_json::from_slice(bytes)?;
        Ok(match file {
            StateFile::Codes(codes) => Self::codes_only(codes),
            StateFile::Structured(state) => state,
        })
    }

    /// Serialize in the structured layout
    pub fn to_json_vec(&self) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// Accepted on-disk layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum StateFile {
    Codes(Vec<String>),
    Structured(PersistedState),
}

// ============================================================================
// STATE STORE PORT
// ============================================================================

/// Durable home of the composite registry and statistics.
///
/// Implementations report failures; deciding whether a failure matters is
/// the caller's job.
pub trait StateStore: Send {
    /// Read the stored state (`Ok(None)` when nothing was ever saved)
    fn read(&self) -> StoreResult<Option<PersistedState>>;

    /// Replace the stored state
    fn write(&mut self, state: &PersistedState) -> StoreResult<()>;

    /// Human readable location, used in log lines
    fn location(&self) -> String;
}
