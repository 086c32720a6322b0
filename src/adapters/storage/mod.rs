//! # Storage Adapters
//!
//! Implementations of the `StateStore` port.
//!
//! Available adapters:
//! - `JsonFileStore` - JSON document on disk (persistent)
//! - `MemoryStore` - shared in-memory slot (fast, volatile)

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
