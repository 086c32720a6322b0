//! # Prime Sequence Generator
//!
//! The generation loop, exposed as an iterator.
//!
//! ```text
//!   Idle ──first next()──► Running ──cancel token──► Cancelling ─┐
//!                             │                                   ├─► Stopped
//!                             └──max_results / u64 end──► Exhausted ┘
//! ```
//!
//! Producing a result (`step`) is separate from the side effects around it
//! (`checkpoint`, progress logging), which `Iterator::next` layers on top.
//! `Stopped` is terminal: to continue, build a new generator starting at
//! the last emitted prime + 1.

use std::iter::FusedIterator;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::adapters::storage::JsonFileStore;
use crate::core::{encode, ConfigResult, EngineConfig, EngineStatistics, PrimeRecord};
use crate::engine::cancel::CancellationToken;
use crate::engine::oracle::PrimalityOracle;
use crate::engine::persistence::PersistenceStore;
use crate::engine::registry::CompositeRegistry;
use crate::ports::StateStore;

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Constructed, nothing produced yet
    Idle,
    /// Producing results
    Running,
    /// Cancellation observed, final flush pending
    Cancelling,
    /// Result cap (or the end of the integer range) reached, final flush pending
    Exhausted,
    /// Terminal
    Stopped,
}

/// Lazy, checkpointed sequence of primes
pub struct PrimeSequenceGenerator {
    config: EngineConfig,
    oracle: Arc<PrimalityOracle>,
    persistence: PersistenceStore,
    stats: EngineStatistics,
    cancel: CancellationToken,
    state: GeneratorState,

    /// Next candidate to search from
    position: u64,

    last_prime: Option<u64>,

    /// Results produced by this instance
    emitted: u64,

    /// `total_time` restored from the snapshot
    prior_seconds: f64,

    started: Option<Instant>,
}

impl PrimeSequenceGenerator {
    /// Create a generator persisting to `config.storage_location`
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        let store = JsonFileStore::new(config.storage_location.clone());
        Self::with_store(config, Box::new(store))
    }

    /// Create a generator persisting through a custom storage adapter.
    ///
    /// Earlier state is loaded immediately: its codes are merged into the
    /// registry and its statistics (if any) become the starting point.
    pub fn with_store(config: EngineConfig, store: Box<dyn StateStore>) -> ConfigResult<Self> {
        config.validate()?;

        let persistence = PersistenceStore::new(store);
        let loaded = persistence.load();

        let registry = Arc::new(CompositeRegistry::new());
        registry.merge(loaded.codes);

        let stats = loaded.stats.unwrap_or_default();
        let oracle = Arc::new(PrimalityOracle::with_registry(config.cache_capacity, registry));

        Ok(Self {
            position: config.starting_position,
            prior_seconds: stats.total_time,
            config,
            oracle,
            persistence,
            stats,
            cancel: CancellationToken::new(),
            state: GeneratorState::Idle,
            last_prime: None,
            emitted: 0,
            started: None,
        })
    }

    /// Stop when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Collect the first `count` primes from `config.starting_position`
    pub fn collect_primes(
        config: EngineConfig,
        store: Box<dyn StateStore>,
        count: u64,
    ) -> ConfigResult<Vec<u64>> {
        let generator = Self::with_store(config.with_max_results(count), store)?;
        Ok(generator.map(|record| record.prime).collect())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// A handle that stops this generator when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn statistics(&self) -> &EngineStatistics {
        &self.stats
    }

    /// The oracle, shareable with diagnostic readers
    pub fn oracle(&self) -> &Arc<PrimalityOracle> {
        &self.oracle
    }

    pub fn registry(&self) -> &Arc<CompositeRegistry> {
        self.oracle.registry()
    }

    /// Results produced by this instance
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Where the next search starts
    pub fn position(&self) -> u64 {
        self.position
    }

    // ========================================================================
    // GENERATION
    // ========================================================================

    /// Produce the next prime without checkpointing or logging.
    ///
    /// Ignores `max_results` and the cancellation token; those are applied
    /// by `Iterator::next`. Returns `None` once the generator has left the
    /// running states or no further prime fits in a `u64`.
    pub fn step(&mut self) -> Option<PrimeRecord> {
        match self.state {
            GeneratorState::Idle => {
                self.state = GeneratorState::Running;
                self.started = Some(Instant::now());
            }
            GeneratorState::Running => {}
            _ => return None,
        }

        let hits_before = self.oracle.cache_hits();
        let Some(probe) = self.oracle.probe_next_prime(self.position) else {
            self.state = GeneratorState::Exhausted;
            return None;
        };
        let hits = self.oracle.cache_hits().saturating_sub(hits_before);
        self.stats.record_candidates(probe.candidates, hits);

        let prime = probe.prime;
        let gap = self.last_prime.map_or(0, |last| prime - last);

        self.stats.record_emission(gap, self.last_prime.is_none());
        self.stats.cache_size = self.oracle.cache_occupancy();
        self.stats.record_elapsed(self.prior_seconds + self.session_seconds());

        self.emitted += 1;
        self.last_prime = Some(prime);
        // a prime is never u64::MAX; the saturation only guards the type
        self.position = prime.saturating_add(1);

        Some(PrimeRecord {
            sequence_index: self.emitted,
            prime,
            gap,
            binary_encoding: encode(prime, None),
        })
    }

    /// Flush the registry and statistics now.
    ///
    /// Returns whether the write succeeded.
    pub fn checkpoint(&mut self) -> bool {
        self.persistence.save(self.oracle.registry(), &self.stats)
    }

    /// Perform the final flush and enter `Stopped`.
    ///
    /// Does nothing if already stopped.
    pub fn stop(&mut self) {
        if self.state == GeneratorState::Stopped {
            return;
        }

        self.checkpoint();
        self.state = GeneratorState::Stopped;

        let summary = self.stats.summary(self.oracle.registry().len());
        info!(
            primes = summary.primes,
            candidates = summary.candidates,
            seconds = summary.seconds,
            primes_per_second = summary.primes_per_second,
            avg_gap = summary.avg_gap,
            max_gap = summary.max_gap,
            min_gap = ?summary.min_gap,
            cache_hits = summary.cache_hits,
            cache_size = summary.cache_size,
            composite_codes = summary.composite_codes,
            "Prime generation stopped"
        );
    }

    fn session_seconds(&self) -> f64 {
        self.started.map_or(0.0, |started| started.elapsed().as_secs_f64())
    }

    fn limit_reached(&self) -> bool {
        self.config.max_results.is_some_and(|max| self.emitted >= max)
    }

    fn log_progress(&self, prime: u64) {
        info!(
            count = self.emitted,
            latest = prime,
            cache_hits = self.stats.cache_hits,
            cache_size = self.oracle.cache_occupancy(),
            primes_per_second = format_args!("{:.2}", self.stats.primes_per_second),
            "Progress"
        );
    }
}

impl Iterator for PrimeSequenceGenerator {
    type Item = PrimeRecord;

    fn next(&mut self) -> Option<PrimeRecord> {
        if self.state == GeneratorState::Stopped {
            return None;
        }

        if self.cancel.is_cancelled() {
            info!(emitted = self.emitted, "Cancellation received, saving state");
            self.state = GeneratorState::Cancelling;
            self.stop();
            return None;
        }

        if self.limit_reached() {
            self.state = GeneratorState::Exhausted;
            self.stop();
            return None;
        }

        let Some(record) = self.step() else {
            self.stop();
            return None;
        };

        if self.emitted % self.config.checkpoint_interval == 0 {
            self.checkpoint();
        }
        if self.emitted % self.config.progress_interval == 0 {
            self.log_progress(record.prime);
        }

        Some(record)
    }
}

impl FusedIterator for PrimeSequenceGenerator {}

impl Drop for PrimeSequenceGenerator {
    fn drop(&mut self) {
        if self.state != GeneratorState::Idle {
            self.stop();
        }
    }
}
