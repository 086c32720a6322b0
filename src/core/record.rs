use serde::{Deserialize, Serialize};

/// One emitted prime
///
/// `sequence_index` starts at 1 for every generator instance; `gap` is 0 for
/// the first prime of that instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeRecord {
    pub sequence_index: u64,
    pub prime: u64,
    pub gap: u64,
    pub binary_encoding: String,
}

impl PrimeRecord {
    /// `(index, prime, gap)` without the encoding
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.sequence_index, self.prime, self.gap)
    }
}
