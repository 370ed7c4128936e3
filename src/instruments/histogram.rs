use std::sync::Arc;

use parking_lot::Mutex;

/// Value resolution kept by the underlying HDR histogram. Three significant
/// figures bounds the relative error of derived statistics at 0.1%.
const SIGFIGS: u8 = 3;

struct HistogramInner {
    hist: hdrhistogram::Histogram<u64>,
    // The HDR histogram quantizes recorded values, so the exact running sum
    // is tracked alongside it.
    sum: u64,
}

impl Default for HistogramInner {
    fn default() -> Self {
        Self {
            hist: hdrhistogram::Histogram::new(SIGFIGS)
                .expect("a sigfig count <= 5 is always a valid histogram configuration"),
            sum: 0,
        }
    }
}

/// A thread-safe distribution of recorded values. Reads go through
/// [`Histogram::snapshot`], which captures the state at one instant without
/// resetting it; cumulative statistics stay cumulative.
#[derive(Clone, Default)]
pub struct Histogram {
    inner: Arc<Mutex<HistogramInner>>,
}

impl Histogram {
    pub fn record(&self, value: u64) {
        let mut inner = self.inner.lock();
        inner.hist.saturating_record(value);
        inner.sum = inner.sum.saturating_add(value);
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let inner = self.inner.lock();
        HistogramSnapshot {
            hist: inner.hist.clone(),
            sum: inner.sum,
        }
    }
}

/// A point-in-time statistical summary of a [`Histogram`].
pub struct HistogramSnapshot {
    hist: hdrhistogram::Histogram<u64>,
    sum: u64,
}

impl HistogramSnapshot {
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    pub fn min(&self) -> u64 {
        if self.hist.is_empty() {
            0
        } else {
            self.hist.min()
        }
    }

    pub fn max(&self) -> u64 {
        if self.hist.is_empty() {
            0
        } else {
            self.hist.max()
        }
    }

    pub fn mean(&self) -> f64 {
        if self.hist.is_empty() {
            0.0
        } else {
            self.hist.mean()
        }
    }

    pub fn stddev(&self) -> f64 {
        if self.hist.is_empty() {
            0.0
        } else {
            self.hist.stdev()
        }
    }

    pub fn variance(&self) -> f64 {
        let stddev = self.stddev();
        stddev * stddev
    }

    /// Exact sum of every recorded value, unquantized.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// The value at quantile `q` (0 < q < 1). Zero for an empty snapshot.
    pub fn percentile(&self, q: f64) -> f64 {
        self.hist.value_at_quantile(q) as f64
    }

    pub fn percentiles(&self, qs: &[f64]) -> Vec<f64> {
        qs.iter().map(|&q| self.percentile(q)).collect()
    }
}
