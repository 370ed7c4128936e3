use std::time::{Duration, Instant};

use super::histogram::{Histogram, HistogramSnapshot};
use super::meter::{Meter, MeterSnapshot};

/// A latency instrument: the distribution of observed durations plus the
/// rate at which they are observed.
///
/// Durations are kept internally in nanoseconds. Consumers that want
/// human-scale units convert at read time; the snapshot itself stays in the
/// recorded unit.
#[derive(Clone, Default)]
pub struct Timer {
    histogram: Histogram,
    meter: Meter,
}

impl Timer {
    pub fn record(&self, duration: Duration) {
        // Durations beyond u64 nanoseconds (~584 years) saturate.
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.histogram.record(nanos);
        self.meter.mark();
    }

    /// Time a closure and record its duration.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(start.elapsed());
        result
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            histogram: self.histogram.snapshot(),
            meter: self.meter.snapshot(),
        }
    }
}

/// A point-in-time view of a [`Timer`]: the histogram set in nanoseconds
/// plus the meter's rates in events per second.
pub struct TimerSnapshot {
    histogram: HistogramSnapshot,
    meter: MeterSnapshot,
}

impl TimerSnapshot {
    pub fn count(&self) -> u64 {
        self.histogram.count()
    }

    pub fn min(&self) -> u64 {
        self.histogram.min()
    }

    pub fn max(&self) -> u64 {
        self.histogram.max()
    }

    pub fn mean(&self) -> f64 {
        self.histogram.mean()
    }

    pub fn stddev(&self) -> f64 {
        self.histogram.stddev()
    }

    pub fn sum(&self) -> u64 {
        self.histogram.sum()
    }

    pub fn percentiles(&self, qs: &[f64]) -> Vec<f64> {
        self.histogram.percentiles(qs)
    }

    pub fn rate1(&self) -> f64 {
        self.meter.rate1()
    }

    pub fn rate5(&self) -> f64 {
        self.meter.rate5()
    }

    pub fn rate15(&self) -> f64 {
        self.meter.rate15()
    }

    pub fn rate_mean(&self) -> f64 {
        self.meter.rate_mean()
    }
}
