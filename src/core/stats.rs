//! # Running Statistics
//!
//! Counters and a smoothed gap average, owned by the generation loop.
//!
//! The struct doubles as the persisted snapshot: field names match the
//! `stats` object of the state file, missing fields default, and unknown
//! fields are ignored so older files still load.

use serde::{Deserialize, Serialize};

/// Weight of the newest gap in the moving average
pub const GAP_SMOOTHING: f64 = 0.1;

/// Statistics accumulated while generating primes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineStatistics {
    /// Primes emitted
    pub total_primes: u64,

    /// Candidates passed through the primality test
    pub total_candidates: u64,

    /// Cumulative generation time in seconds
    pub total_time: f64,

    /// Exponentially smoothed gap between consecutive primes
    pub avg_gap: f64,

    /// Largest positive gap seen
    pub max_gap: u64,

    /// Smallest positive gap seen (`None` until one is observed)
    pub min_gap: Option<u64>,

    /// `total_primes / total_time`, 0 while no time has elapsed
    pub primes_per_second: f64,

    /// Verdicts served from the recency cache
    pub cache_hits: u64,

    /// Cache occupancy at the last emission
    pub cache_size: usize,
}

impl EngineStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for candidates tested while searching for the next prime
    pub fn record_candidates(&mut self, tested: u64, cache_hits: u64) {
        self.total_candidates = self.total_candidates.saturating_add(tested);
        self.cache_hits = self.cache_hits.saturating_add(cache_hits);
    }

    /// Account for one emitted prime.
    ///
    /// `first_in_session` marks a prime with no predecessor in the current
    /// sequence; its zero gap only seeds the average when nothing has been
    /// recorded before.
    pub fn record_emission(&mut self, gap: u64, first_in_session: bool) {
        self.total_primes += 1;

        if self.total_primes == 1 {
            self.avg_gap = gap as f64;
        } else if !first_in_session {
            self.avg_gap = (1.0 - GAP_SMOOTHING) * self.avg_gap + GAP_SMOOTHING * gap as f64;
        }

        if gap > 0 {
            self.max_gap = self.max_gap.max(gap);
            self.min_gap = Some(self.min_gap.map_or(gap, |min| min.min(gap)));
        }
    }

    /// Update elapsed time and the derived throughput
    pub fn record_elapsed(&mut self, total_seconds: f64) {
        self.total_time = total_seconds;
        self.primes_per_second = if total_seconds > 0.0 {
            self.total_primes as f64 / total_seconds
        } else {
            0.0
        };
    }

    /// Final report figures
    pub fn summary(&self, registry_len: usize) -> StatsSummary {
        StatsSummary {
            primes: self.total_primes,
            candidates: self.total_candidates,
            seconds: self.total_time,
            primes_per_second: self.primes_per_second,
            avg_gap: self.avg_gap,
            max_gap: self.max_gap,
            min_gap: self.min_gap,
            cache_hits: self.cache_hits,
            cache_size: self.cache_size,
            composite_codes: registry_len,
        }
    }
}

/// Snapshot of statistics plus registry size, reported when a run stops
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub primes: u64,
    pub candidates: u64,
    pub seconds: f64,
    pub primes_per_second: f64,
    pub avg_gap: f64,
    pub max_gap: u64,
    pub min_gap: Option<u64>,
    pub cache_hits: u64,
    pub cache_size: usize,
    pub composite_codes: usize,
}
