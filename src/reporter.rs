use std::io;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::delta::DeltaTracker;
use crate::error::Error;
use crate::instruments::Instrument;
use crate::percentile::percentile_labels;
use crate::registry::{Registry, DEFAULT_REGISTRY};
use crate::tags::split_name_and_tags;
use crate::transport::{DogstatsdClient, Transport};

const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

// No client-side sampling; every point ships with rate 1.
const SAMPLE_RATE: f64 = 1.0;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Configuration for a [`Reporter`]. Everything here is frozen into the
/// reporter at build time.
pub struct ReporterBuilder {
    interval: Duration,
    percentiles: Option<Vec<f64>>,
    tags: Vec<String>,
    host_tag: bool,
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FLUSH_INTERVAL,
            percentiles: None,
            tags: Vec::new(),
            host_tag: false,
        }
    }
}

impl ReporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time between flush cycles. Defaults to ten seconds.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Percentile series to derive for histograms and timers, as fractions
    /// in (0, 1). Without this option no percentile series are emitted;
    /// explicitly passing an empty list is a configuration error.
    pub fn percentiles(mut self, percentiles: impl Into<Vec<f64>>) -> Self {
        self.percentiles = Some(percentiles.into());
        self
    }

    /// Tags applied to every emitted point, after any inline tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Append a `host:<hostname>` tag, resolved once at build time.
    pub fn host_tag(mut self) -> Self {
        self.host_tag = true;
        self
    }

    /// Build a reporter that ships to a dogstatsd endpoint at `addr`. Pass
    /// `None` to report the process-wide [`DEFAULT_REGISTRY`].
    pub fn build(self, registry: Option<&'static Registry>, addr: &str) -> Result<Reporter, Error> {
        let transport = DogstatsdClient::new(addr)?;
        self.build_with_transport(registry, Box::new(transport))
    }

    /// Build against an already-constructed transport.
    pub fn build_with_transport(
        self,
        registry: Option<&'static Registry>,
        transport: Box<dyn Transport>,
    ) -> Result<Reporter, Error> {
        let (percentiles, labels) = match self.percentiles {
            Some(percentiles) => {
                let labels = percentile_labels(&percentiles)?;
                (percentiles, labels)
            }
            None => (Vec::new(), Vec::new()),
        };
        let mut tags = self.tags;
        if self.host_tag {
            tags.push(format!(
                "host:{}",
                gethostname::gethostname().to_string_lossy()
            ));
        }
        Ok(Reporter {
            registry: registry.unwrap_or(&DEFAULT_REGISTRY),
            transport,
            interval: self.interval,
            tags,
            percentiles,
            percentile_labels: labels,
            deltas: DeltaTracker::new(),
        })
    }
}

/// Bridges a [`Registry`] to a remote collector: every cycle it enumerates
/// the live instruments, converts each one's current state into point-in-time
/// series and hands them to the transport.
///
/// Both [`flush_once`](Reporter::flush_once) and the periodic loop take the
/// reporter by `&mut`/move, so at most one cycle can ever be in flight and
/// the delta state needs no further synchronization.
pub struct Reporter {
    registry: &'static Registry,
    transport: Box<dyn Transport>,
    interval: Duration,
    tags: Vec<String>,
    percentiles: Vec<f64>,
    percentile_labels: Vec<String>,
    deltas: DeltaTracker,
}

impl Reporter {
    /// Run one flush cycle.
    ///
    /// Every registered instrument is visited even if an earlier one fails
    /// to emit; failures are collected and the cycle reports
    /// [`Error::Cycle`] carrying the count and the first underlying error.
    pub fn flush_once(&mut self) -> Result<(), Error> {
        let cycle_start = Instant::now();
        let registry = self.registry;
        let mut instruments = 0usize;
        let mut failures = 0usize;
        let mut first_error: Option<io::Error> = None;
        registry.each(|raw_name, instrument| {
            instruments += 1;
            let (base, tags) = split_name_and_tags(raw_name, &self.tags);
            if let Err(err) = self.translate(instrument, base, &tags) {
                failures += 1;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        });
        self.deltas.sweep();
        tracing::debug!(
            message = "flush cycle complete",
            instruments,
            failures,
            duration = ?cycle_start.elapsed(),
        );
        match first_error {
            Some(first) => Err(Error::Cycle { failures, first }),
            None => Ok(()),
        }
    }

    /// Convert one instrument's current state into output points.
    ///
    /// The match is exhaustive on purpose: a new instrument kind must decide
    /// what it emits before this compiles again.
    fn translate(
        &mut self,
        instrument: &Instrument,
        base: &str,
        tags: &[String],
    ) -> io::Result<()> {
        match instrument {
            Instrument::Counter(counter) => {
                self.delta_count(base, tags, counter.count() as i64)
            }
            Instrument::IntGauge(gauge) => {
                self.transport
                    .gauge(base, gauge.value() as f64, tags, SAMPLE_RATE)
            }
            Instrument::FloatGauge(gauge) => {
                self.transport.gauge(base, gauge.value(), tags, SAMPLE_RATE)
            }
            Instrument::Histogram(histogram) => {
                let snap = histogram.snapshot();
                self.delta_count(&format!("{base}.count"), tags, snap.count() as i64)?;
                let gauges = [
                    (".max", snap.max() as f64),
                    (".min", snap.min() as f64),
                    (".mean", snap.mean()),
                    (".stddev", snap.stddev()),
                    (".sum", snap.sum() as f64),
                    (".var", snap.variance()),
                ];
                for (suffix, value) in gauges {
                    self.transport
                        .gauge(&format!("{base}{suffix}"), value, tags, SAMPLE_RATE)?;
                }
                let values = snap.percentiles(&self.percentiles);
                for (value, label) in values.iter().zip(&self.percentile_labels) {
                    self.transport
                        .gauge(&format!("{base}{label}"), *value, tags, SAMPLE_RATE)?;
                }
                Ok(())
            }
            Instrument::Meter(meter) => {
                let snap = meter.snapshot();
                self.delta_count(&format!("{base}.count"), tags, snap.count() as i64)?;
                let gauges = [
                    (".rate1", snap.rate1()),
                    (".rate5", snap.rate5()),
                    (".rate15", snap.rate15()),
                    (".mean", snap.rate_mean()),
                ];
                for (suffix, value) in gauges {
                    self.transport
                        .gauge(&format!("{base}{suffix}"), value, tags, SAMPLE_RATE)?;
                }
                Ok(())
            }
            Instrument::Timer(timer) => {
                let snap = timer.snapshot();
                self.delta_count(&format!("{base}.count"), tags, snap.count() as i64)?;
                let gauges = [
                    (".max", snap.max() as f64 / NANOS_PER_MILLI),
                    (".min", snap.min() as f64 / NANOS_PER_MILLI),
                    (".mean", snap.mean() / NANOS_PER_MILLI),
                    (".stddev", snap.stddev() / NANOS_PER_MILLI),
                    // .sum stays in the recorded nanosecond unit; existing
                    // dashboards depend on it, so it does not get the
                    // millisecond conversion the other duration stats get.
                    (".sum", snap.sum() as f64),
                ];
                for (suffix, value) in gauges {
                    self.transport
                        .gauge(&format!("{base}{suffix}"), value, tags, SAMPLE_RATE)?;
                }
                let values = snap.percentiles(&self.percentiles);
                for (value, label) in values.iter().zip(&self.percentile_labels) {
                    self.transport.gauge(
                        &format!("{base}{label}"),
                        *value / NANOS_PER_MILLI,
                        tags,
                        SAMPLE_RATE,
                    )?;
                }
                Ok(())
            }
        }
    }

    /// Delta-track a cumulative value and ship the increment. Keyed by the
    /// full series name (including any suffix) plus tags.
    fn delta_count(&mut self, name: &str, tags: &[String], current: i64) -> io::Result<()> {
        let delta = self.deltas.delta(name, tags, current);
        self.transport.count(name, delta, tags, SAMPLE_RATE)
    }

    /// Flush forever at the configured interval, until `shutdown` changes or
    /// its sender is dropped.
    ///
    /// A failed cycle is logged and the loop keeps ticking. Overrunning
    /// cycles merge ticks rather than queueing them, and a shutdown signal
    /// never interrupts a cycle already in progress.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval's first tick completes immediately; consume it so the
        // first report lands one interval after startup.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.flush_once() {
                        tracing::error!(message = "flush cycle failed", error = %err);
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
    }

    /// Spawn the periodic loop on the current tokio runtime and return a
    /// handle that shuts it down cleanly. Dropping the handle also stops the
    /// loop at its next tick.
    pub fn spawn(self) -> ReporterHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        ReporterHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a spawned reporter loop.
pub struct ReporterHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReporterHandle {
    /// Signal the loop to stop before its next tick and wait for it to
    /// finish. A cycle already in progress completes normally.
    pub async fn shutdown(self) {
        // The loop may already be gone; nothing to signal then.
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
