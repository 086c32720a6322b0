//! # Recency Cache
//!
//! Fixed-capacity map from candidate to primality verdict with
//! least-recently-used eviction.
//!
//! Every touch (lookup hit or record) stamps the entry with a fresh tick.
//! Ticks are unique and increasing, so the smallest tick in `order` is
//! always the entry to evict, and ties cannot happen.
//!
//! The map and the order index live behind one mutex and are always
//! updated inside the same critical section.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

/// Thread-safe LRU cache of primality verdicts
pub struct RecencyCache {
    /// Maximum number of entries (0 = caching disabled)
    capacity: usize,

    inner: Mutex<CacheInner>,
}

struct CacheInner {
    /// candidate -> (verdict, tick of last touch)
    entries: HashMap<u64, (bool, u64)>,

    /// tick -> candidate, oldest first
    order: BTreeMap<u64, u64>,

    next_tick: u64,
}

impl CacheInner {
    fn touch(&mut self, n: u64, old_tick: u64) -> u64 {
        self.order.remove(&old_tick);
        let tick = self.next_tick;
        self.next_tick += 1;
        self.order.insert(tick, n);
        tick
    }

    fn evict_oldest(&mut self) -> Option<u64> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }
}

impl RecencyCache {
    /// Create an empty cache holding at most `capacity` verdicts
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity.min(1 << 16)),
                order: BTreeMap::new(),
                next_tick: 0,
            }),
        }
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the cache stores anything at all
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Cached verdict for `n`, refreshing its recency on a hit
    pub fn lookup(&self, n: u64) -> Option<bool> {
        let mut inner = self.inner.lock();
        let (verdict, old_tick) = inner.entries.get(&n).copied()?;
        let tick = inner.touch(n, old_tick);
        if let Some(entry) = inner.entries.get_mut(&n) {
            entry.1 = tick;
        }
        Some(verdict)
    }

    /// Store a verdict for `n`.
    ///
    /// An existing entry only has its recency refreshed. A new entry in a
    /// full cache first evicts exactly one least-recently-used entry.
    pub fn record(&self, n: u64, verdict: bool) {
        if self.capacity == 0 {
            return;
        }

        let mut inner = self.inner.lock();

        let existing = inner.entries.get(&n).map(|&(_, tick)| tick);
        if let Some(old_tick) = existing {
            let tick = inner.touch(n, old_tick);
            if let Some(entry) = inner.entries.get_mut(&n) {
                entry.1 = tick;
            }
            return;
        }

        if inner.entries.len() >= self.capacity {
            inner.evict_oldest();
        }

        let tick = inner.next_tick;
        inner.next_tick += 1;
        inner.order.insert(tick, n);
        inner.entries.insert(n, (verdict, tick));
    }

    /// Current number of cached verdicts
    pub fn occupancy(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether `n` is cached, without touching its recency
    pub fn contains(&self, n: u64) -> bool {
        self.inner.lock().entries.contains_key(&n)
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}

impl std::fmt::Debug for RecencyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyCache")
            .field("capacity", &self.capacity)
            .field("occupancy", &self.occupancy())
            .finish()
    }
}
