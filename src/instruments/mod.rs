//! The live measurement sources the registry hands out. Every instrument is
//! a cheaply-clonable handle around shared interior state, so application
//! code keeps its own copy and records with no registry involvement.

pub(crate) mod counter;
pub(crate) mod gauge;
pub(crate) mod histogram;
pub(crate) mod meter;
pub(crate) mod timer;

pub use counter::Counter;
pub use gauge::{FloatGauge, IntGauge};
pub use histogram::{Histogram, HistogramSnapshot};
pub use meter::{Meter, MeterSnapshot};
pub use timer::{Timer, TimerSnapshot};

/// The closed set of instrument kinds a registry can hold.
///
/// The reporter's translator matches over this exhaustively, with no
/// catch-all arm; adding a kind here is a compile error there until someone
/// decides what the new kind emits.
#[derive(Clone)]
pub enum Instrument {
    Counter(Counter),
    IntGauge(IntGauge),
    FloatGauge(FloatGauge),
    Histogram(Histogram),
    Meter(Meter),
    Timer(Timer),
}

impl Instrument {
    /// Human-readable kind name, for registration-conflict messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Instrument::Counter(_) => "counter",
            Instrument::IntGauge(_) => "int gauge",
            Instrument::FloatGauge(_) => "float gauge",
            Instrument::Histogram(_) => "histogram",
            Instrument::Meter(_) => "meter",
            Instrument::Timer(_) => "timer",
        }
    }
}
