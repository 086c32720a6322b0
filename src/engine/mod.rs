//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - The oracle puts the recency cache in front of trial division
//! - The generator drives the oracle, statistics and checkpoints
//! - Storage adapters are wrapped so their faults never stop generation

mod cancel;
mod generator;
mod oracle;
mod persistence;
mod registry;

pub use cancel::CancellationToken;
pub use generator::{GeneratorState, PrimeSequenceGenerator};
pub use oracle::{integer_sqrt, PrimalityOracle, Probe, SMALL_ODD_PRIMES};
pub use persistence::{LoadedState, PersistenceStore};
pub use registry::CompositeRegistry;
