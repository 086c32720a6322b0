//! # Primality Oracle
//!
//! Trial division with a recency cache in front.
//!
//! ```text
//! is_prime(n)
//!   n < 2, even        -> answered directly
//!   cache hit          -> cached verdict (hit counter++)
//!   miss               -> divide by 3..=31, then odd d >= 37, up to isqrt(n)
//!                         composite -> code added to registry
//!                         verdict   -> cache
//! ```
//!
//! All methods take `&self`; the oracle can be shared with threads that
//! only read diagnostics while a generator drives it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::adapters::cache::RecencyCache;
use crate::core::encode;
use crate::engine::registry::CompositeRegistry;

/// Odd primes tried before the open-ended divisor scan
pub const SMALL_ODD_PRIMES: [u64; 10] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// First divisor of the open-ended scan
const SCAN_START: u64 = 37;

/// Result of a `next_prime` search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// The prime found
    pub prime: u64,

    /// Candidates examined to find it, the prime included
    pub candidates: u64,
}

/// Cached trial-division primality test
pub struct PrimalityOracle {
    cache: RecencyCache,
    registry: Arc<CompositeRegistry>,
    cache_hits: AtomicU64,
    candidates_tested: AtomicU64,
}

impl PrimalityOracle {
    /// Create an oracle with a cache of `cache_capacity` verdicts
    pub fn new(cache_capacity: usize) -> Self {
        Self::with_registry(cache_capacity, Arc::new(CompositeRegistry::new()))
    }

    /// Create an oracle that records composites into `registry`
    pub fn with_registry(cache_capacity: usize, registry: Arc<CompositeRegistry>) -> Self {
        Self {
            cache: RecencyCache::new(cache_capacity),
            registry,
            cache_hits: AtomicU64::new(0),
            candidates_tested: AtomicU64::new(0),
        }
    }

    /// Whether `n` is prime
    pub fn is_prime(&self, n: u64) -> bool {
        if n < 2 {
            return false;
        }
        if n == 2 {
            return true;
        }
        if n % 2 == 0 {
            return false;
        }

        if let Some(verdict) = self.cache.lookup(n) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return verdict;
        }

        let verdict = !has_odd_divisor(n);
        if !verdict {
            self.registry.insert(encode(n, None));
        }
        self.cache.record(n, verdict);
        verdict
    }

    /// Smallest prime greater than `n` (for `n >= 2`), or 2 for `n < 2`.
    ///
    /// `None` when the answer does not fit in a `u64`.
    pub fn next_prime(&self, n: u64) -> Option<u64> {
        self.probe_next_prime(n).map(|probe| probe.prime)
    }

    /// Like [`next_prime`](Self::next_prime), also reporting how many
    /// candidates were examined
    pub fn probe_next_prime(&self, n: u64) -> Option<Probe> {
        let found = |prime, candidates| {
            self.candidates_tested.fetch_add(candidates, Ordering::Relaxed);
            Some(Probe { prime, candidates })
        };

        if n < 2 {
            return found(2, 1);
        }
        if n == 2 {
            return found(3, 1);
        }

        let mut candidate = if n % 2 == 0 { n.checked_add(1)? } else { n };
        let mut candidates = 1;
        while !self.is_prime(candidate) {
            candidate = match candidate.checked_add(2) {
                Some(next) => next,
                None => {
                    self.candidates_tested.fetch_add(candidates, Ordering::Relaxed);
                    return None;
                }
            };
            candidates += 1;
        }
        found(candidate, candidates)
    }

    // ========================================================================
    // DIAGNOSTICS
    // ========================================================================

    /// Verdicts served from the cache so far
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Candidates examined by `next_prime` so far
    pub fn candidates_tested(&self) -> u64 {
        self.candidates_tested.load(Ordering::Relaxed)
    }

    /// Current cache occupancy
    pub fn cache_occupancy(&self) -> usize {
        self.cache.occupancy()
    }

    /// The verdict cache
    pub fn cache(&self) -> &RecencyCache {
        &self.cache
    }

    /// Registry of proven composites
    pub fn registry(&self) -> &Arc<CompositeRegistry> {
        &self.registry
    }
}

/// Trial division of odd `n >= 3` by odd divisors up to `isqrt(n)`
fn has_odd_divisor(n: u64) -> bool {
    let limit = integer_sqrt(n) + 1;

    for p in SMALL_ODD_PRIMES {
        if p >= limit {
            return false;
        }
        if n % p == 0 {
            return true;
        }
    }

    let mut d = SCAN_START;
    while d < limit {
        if n % d == 0 {
            return true;
        }
        d += 2;
    }
    false
}

/// Floor of the square root, exact over the whole `u64` range
pub fn integer_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }
    root
}
