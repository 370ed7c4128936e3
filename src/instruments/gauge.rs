use std::sync::{atomic, Arc};

/// A point-in-time integer value.
#[derive(Clone, Default)]
pub struct IntGauge {
    inner: Arc<atomic::AtomicI64>,
}

impl IntGauge {
    pub fn incr_by(&self, count: i64) {
        self.inner.fetch_add(count, atomic::Ordering::Relaxed);
    }

    pub fn incr(&self) {
        self.incr_by(1);
    }

    pub fn decr(&self) {
        self.incr_by(-1);
    }

    pub fn set(&self, val: i64) {
        self.inner.store(val, atomic::Ordering::Relaxed);
    }

    pub fn value(&self) -> i64 {
        self.inner.load(atomic::Ordering::Relaxed)
    }
}

/// A point-in-time floating-point value, stored as raw bits in an atomic so
/// clones stay coordination free.
#[derive(Clone)]
pub struct FloatGauge {
    inner: Arc<atomic::AtomicU64>,
}

impl Default for FloatGauge {
    fn default() -> Self {
        Self {
            inner: Arc::new(atomic::AtomicU64::new(0f64.to_bits())),
        }
    }
}

impl FloatGauge {
    pub fn set(&self, val: f64) {
        self.inner.store(val.to_bits(), atomic::Ordering::Relaxed);
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.inner.load(atomic::Ordering::Relaxed))
    }
}
