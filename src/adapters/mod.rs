//! # Adapters
//!
//! Swappable implementations behind the engine.
//!
//! - Cache adapters: bounded recency cache for verdicts
//! - Storage adapters: JSON file, memory
//!
//! Storage adapters implement the `StateStore` port and can be swapped
//! without touching the generation loop.

pub mod cache;
pub mod storage;
