//! A bridge between an in-process metrics registry and a dogstatsd
//! collector. Instruments live in a [`Registry`] and stay cheap to record
//! against; a [`Reporter`] drains the registry on an interval, turning each
//! instrument's current state into point-in-time series (counter deltas,
//! gauge values, histogram statistics, meter rates, timer latencies) and
//! shipping them over UDP.
//!
//! ```no_run
//! use std::time::Duration;
//! use dogstatsd_reporter::{ReporterBuilder, DEFAULT_REGISTRY};
//!
//! # async fn example() -> Result<(), dogstatsd_reporter::Error> {
//! let reporter = ReporterBuilder::new()
//!     .interval(Duration::from_secs(10))
//!     .percentiles([0.5, 0.99])
//!     .tags(["service:api"])
//!     .build(None, "127.0.0.1:8125")?;
//! let handle = reporter.spawn();
//!
//! let requests = DEFAULT_REGISTRY.counter("http.requests[method:GET]");
//! requests.incr();
//!
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod delta;
mod error;
pub mod instruments;
mod percentile;
mod registry;
mod reporter;
mod tags;
mod transport;

pub use error::Error;
pub use instruments::{
    Counter, FloatGauge, Histogram, HistogramSnapshot, Instrument, IntGauge, Meter, MeterSnapshot,
    Timer, TimerSnapshot,
};
pub use registry::{Registry, DEFAULT_REGISTRY};
pub use reporter::{Reporter, ReporterBuilder, ReporterHandle};
pub use transport::{DogstatsdClient, Transport};
