//! # Composite Registry
//!
//! Set of adaptive binary codes for numbers proven composite.
//! It only grows during a run and is merged (never replaced) on load.
//! It is a diagnostic record; primality is never decided from it.

use std::collections::BTreeSet;

use parking_lot::Mutex;

/// Thread-safe, grow-only set of composite codes
#[derive(Debug, Default)]
pub struct CompositeRegistry {
    codes: Mutex<BTreeSet<String>>,
}

impl CompositeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one code; returns false if it was already present
    pub fn insert(&self, code: String) -> bool {
        self.codes.lock().insert(code)
    }

    /// Union `codes` into the registry
    pub fn merge<I>(&self, codes: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.codes.lock().extend(codes);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.lock().contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.lock().is_empty()
    }

    /// Sorted copy of every code
    pub fn snapshot(&self) -> Vec<String> {
        self.codes.lock().iter().cloned().collect()
    }
}
