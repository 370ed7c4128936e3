use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::instruments::{Counter, FloatGauge, Histogram, Instrument, IntGauge, Meter, Timer};

/// The process-wide registry, used whenever a caller doesn't supply one.
pub static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A mapping from instrument name to live instrument.
///
/// Names are unique; registration is get-or-create, so every caller asking
/// for the same name gets a handle to the same underlying state. Names may
/// embed inline tags (`"requests[method:GET]"`) which the reporter resolves
/// at flush time; to the registry the whole string is just the key.
///
/// Registration takes the write lock and is expected to happen once per
/// instrument near startup; recording through a handle touches the registry
/// not at all.
#[derive(Default)]
pub struct Registry {
    instruments: RwLock<HashMap<String, Instrument>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str) -> Counter {
        match self.get_or_register(name, || Instrument::Counter(Counter::default())) {
            Instrument::Counter(counter) => counter,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    pub fn int_gauge(&self, name: &str) -> IntGauge {
        match self.get_or_register(name, || Instrument::IntGauge(IntGauge::default())) {
            Instrument::IntGauge(gauge) => gauge,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    pub fn float_gauge(&self, name: &str) -> FloatGauge {
        match self.get_or_register(name, || Instrument::FloatGauge(FloatGauge::default())) {
            Instrument::FloatGauge(gauge) => gauge,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    pub fn histogram(&self, name: &str) -> Histogram {
        match self.get_or_register(name, || Instrument::Histogram(Histogram::default())) {
            Instrument::Histogram(histogram) => histogram,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    pub fn meter(&self, name: &str) -> Meter {
        match self.get_or_register(name, || Instrument::Meter(Meter::default())) {
            Instrument::Meter(meter) => meter,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    pub fn timer(&self, name: &str) -> Timer {
        match self.get_or_register(name, || Instrument::Timer(Timer::default())) {
            Instrument::Timer(timer) => timer,
            other => panic!(
                "instrument {name:?} is already registered as a {}",
                other.kind()
            ),
        }
    }

    fn get_or_register(&self, name: &str, make: impl FnOnce() -> Instrument) -> Instrument {
        let mut instruments = self.instruments.write();
        instruments.entry(name.to_owned()).or_insert_with(make).clone()
    }

    /// Invoke `f` once per registered instrument, under the read lock. No
    /// ordering is guaranteed across instruments.
    pub fn each(&self, mut f: impl FnMut(&str, &Instrument)) {
        let instruments = self.instruments.read();
        for (name, instrument) in instruments.iter() {
            f(name, instrument);
        }
    }

    /// Drop an instrument. Handles already cloned out keep working; the
    /// instrument just stops being enumerated.
    pub fn remove(&self, name: &str) -> bool {
        self.instruments.write().remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.instruments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.read().is_empty()
    }
}
