//! # Core
//!
//! Pure data and math. No locks, no I/O.
//!
//! - `encoding` - adaptive binary codes for integers
//! - `stats` - running generation statistics
//! - `config` - engine configuration and validation
//! - `record` - the value yielded per emitted prime

pub mod config;
pub mod encoding;
pub mod stats;

mod record;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use encoding::encode;
pub use record::PrimeRecord;
pub use stats::{EngineStatistics, StatsSummary};
