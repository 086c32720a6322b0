//! # Persistence Store
//!
//! Best-effort bridge between the engine and a `StateStore` adapter.
//!
//! Storage faults stop here: a failed load yields empty state, a failed
//! save is logged and reported as `false`. Nothing in this module returns
//! an error to the generation loop.

use tracing::{debug, error, info, warn};

use crate::core::EngineStatistics;
use crate::engine::registry::CompositeRegistry;
use crate::ports::{PersistedState, StateStore};

/// State recovered at start-up
#[derive(Debug, Default)]
pub struct LoadedState {
    /// Composite codes from earlier runs
    pub codes: Vec<String>,

    /// Statistics snapshot, if the stored layout carried one
    pub stats: Option<EngineStatistics>,
}

/// Non-fatal wrapper over a storage adapter
pub struct PersistenceStore {
    backend: Box<dyn StateStore>,
}

impl PersistenceStore {
    pub fn new(backend: Box<dyn StateStore>) -> Self {
        Self { backend }
    }

    /// Where the state lives
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Read persisted codes and statistics.
    ///
    /// Missing, unreadable and corrupt state all come back empty.
    pub fn load(&self) -> LoadedState {
        match self.backend.read() {
            Ok(Some(state)) => {
                info!(
                    location = %self.backend.location(),
                    codes = state.codes.len(),
                    has_stats = state.stats.is_some(),
                    "Persisted state loaded"
                );
                LoadedState {
                    codes: state.codes,
                    stats: state.stats,
                }
            }
            Ok(None) => {
                debug!(location = %self.backend.location(), "No persisted state");
                LoadedState::default()
            }
            Err(e) => {
                warn!(
                    location = %self.backend.location(),
                    error = %e,
                    "Persisted state unreadable, starting empty"
                );
                LoadedState::default()
            }
        }
    }

    /// Overwrite stored state with `registry` and `stats`.
    ///
    /// Returns whether the write succeeded; failures are logged only.
    pub fn save(&mut self, registry: &CompositeRegistry, stats: &EngineStatistics) -> bool {
        let state = PersistedState::new(registry.snapshot(), stats.clone());

        match self.backend.write(&state) {
            Ok(()) => {
                debug!(
                    location = %self.backend.location(),
                    codes = state.codes.len(),
                    "Persisted state saved"
                );
                true
            }
            Err(e) => {
                error!(
                    location = %self.backend.location(),
                    error = %e,
                    "Failed to save persisted state"
                );
                false
            }
        }
    }
}
