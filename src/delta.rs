use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};

use twox_hash::XxHash64;

const KEY_SEED: u64 = 0xdeadbeef;

/// How many consecutive cycles a series may go unobserved before its baseline
/// is pruned. Re-observing a pruned series starts over from a zero baseline,
/// so the next delta is the full cumulative value again.
const STALE_CYCLES: u64 = 5;

/// Last-reported cumulative values for monotonic counter series, so each
/// cycle only ships the increment.
///
/// Keys are a seeded 64-bit hash of (base name, tag sequence); a collision
/// between semantically different series is a caller error and is not
/// detected. The first observation of a key baselines at zero, which
/// over-reports a counter that was already non-zero before reporting began.
/// A decreasing cumulative value yields a negative delta; resets are not
/// specially cased.
pub(crate) struct DeltaTracker {
    generation: u64,
    last: HashMap<u64, Entry, BuildSeriesKeyHasher>,
}

struct Entry {
    value: i64,
    seen: u64,
}

impl DeltaTracker {
    pub(crate) fn new() -> Self {
        Self {
            generation: 0,
            last: HashMap::default(),
        }
    }

    /// Report `current` for the series, returning the delta since the last
    /// observation and storing `current` as the new baseline.
    pub(crate) fn delta(&mut self, name: &str, tags: &[String], current: i64) -> i64 {
        let generation = self.generation;
        let entry = self
            .last
            .entry(series_key(name, tags))
            .or_insert(Entry { value: 0, seen: generation });
        let delta = current - entry.value;
        entry.value = current;
        entry.seen = generation;
        delta
    }

    /// End-of-cycle bookkeeping: advance the generation and drop baselines
    /// that have not been observed for [`STALE_CYCLES`] cycles. The flush
    /// loop is the only caller, once per cycle, so generations count cycles.
    pub(crate) fn sweep(&mut self) {
        self.generation += 1;
        let horizon = self.generation.saturating_sub(STALE_CYCLES);
        self.last.retain(|_, entry| entry.seen >= horizon);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.last.len()
    }
}

fn series_key(name: &str, tags: &[String]) -> u64 {
    let mut hasher = XxHash64::with_seed(KEY_SEED);
    name.hash(&mut hasher);
    tags.hash(&mut hasher);
    hasher.finish()
}

/// Series keys are already hashed, so the map's hasher passes the u64
/// straight through.
struct SeriesKeyHasher {
    inner: u64,
}

impl Hasher for SeriesKeyHasher {
    fn finish(&self) -> u64 {
        self.inner
    }

    fn write(&mut self, _bytes: &[u8]) {
        debug_assert!(false, "series keys must be pre-hashed u64s");
    }

    fn write_u64(&mut self, i: u64) {
        self.inner = i;
    }
}

#[derive(Default)]
struct BuildSeriesKeyHasher;

impl BuildHasher for BuildSeriesKeyHasher {
    type Hasher = SeriesKeyHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SeriesKeyHasher { inner: 0 }
    }
}
