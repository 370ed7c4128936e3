use std::sync::{atomic, Arc};

/// A cumulative, monotonically non-decreasing event counter. The reporter
/// reads the running total and converts it to a per-cycle delta itself, so
/// reading never resets the value.
#[derive(Clone, Default)]
pub struct Counter {
    inner: Arc<atomic::AtomicU64>,
}

impl Counter {
    pub fn incr_by(&self, count: u64) {
        self.inner.fetch_add(count, atomic::Ordering::Relaxed);
    }

    pub fn incr(&self) {
        self.incr_by(1);
    }

    /// Reset the running total to zero. The next reported delta will be
    /// negative; downstream consumers treat that as a transient artifact.
    pub fn clear(&self) {
        self.inner.store(0, atomic::Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.inner.load(atomic::Ordering::Relaxed)
    }
}
