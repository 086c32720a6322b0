//! # Cache Adapters
//!
//! Memoization layers in front of the primality test.
//!
//! Available adapters:
//! - `RecencyCache` - bounded LRU map, safe to share across threads

mod recency;

pub use recency::RecencyCache;
