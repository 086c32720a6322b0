//! # Binary Prime Engine
//!
//! Generates successive primes from any starting point, tracks the gaps
//! between them, and remembers what it learned along the way.
//!
//! ## Philosophy
//!
//! - **Cache is memoization, never truth** - every cached verdict equals a recomputation
//! - **Storage faults are not generation faults** - load and save failures are logged, not raised
//! - **Cooperative stops** - cancellation is polled between primes, never mid-candidate
//! - **Pure core, swappable adapters** - Hexagonal architecture
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BINARY PRIME ENGINE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure data, no I/O)                                   │
//! │    encode, EngineStatistics, EngineConfig, PrimeRecord      │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    StateStore, PersistedState                               │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Cache: RecencyCache                                      │
//! │    Storage: JsonFileStore, MemoryStore                      │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    PrimalityOracle, PrimeSequenceGenerator                  │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use binary_prime_engine::{EngineConfig, PrimeSequenceGenerator};
//!
//! let config = EngineConfig::new()
//!     .with_starting_position(10)
//!     .with_max_results(3);
//!
//! for record in PrimeSequenceGenerator::new(config)? {
//!     println!("{} {} {} {}", record.sequence_index, record.prime, record.gap, record.binary_encoding);
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure data, no I/O
/// Contains: encode, EngineStatistics, EngineConfig, PrimeRecord
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: StateStore trait, PersistedState, StoreError
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: cache, storage submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: PrimalityOracle, PrimeSequenceGenerator
pub mod engine;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{encode, EngineStatistics, PrimeRecord, StatsSummary};
pub use crate::core::config::{ConfigError, ConfigResult, EngineConfig};

// Port traits
pub use crate::ports::{PersistedState, StateStore, StoreError, StoreResult};

// Adapters
pub use crate::adapters::cache::RecencyCache;
pub use crate::adapters::storage::{JsonFileStore, MemoryStore};

// Engine
pub use crate::engine::{
    CancellationToken, CompositeRegistry, GeneratorState, PersistenceStore, PrimalityOracle,
    PrimeSequenceGenerator,
};
