use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Rates are re-derived on a fixed five-second basis, the classic tick
/// interval for 1/5/15-minute moving averages.
const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Smoothing factors for the 1, 5 and 15 minute windows at the tick
/// interval above: `1 - e^(-tick/window)`.
static ALPHAS: LazyLock<[f64; 3]> = LazyLock::new(|| {
    let tick = TICK_INTERVAL.as_secs_f64();
    [
        1.0 - (-tick / 60.0).exp(),
        1.0 - (-tick / 300.0).exp(),
        1.0 - (-tick / 900.0).exp(),
    ]
});

/// One exponentially-weighted moving average. The first tick seeds the rate
/// with the observed instant rate instead of decaying from zero.
struct Ewma {
    alpha: f64,
    rate: f64,
    initialized: bool,
}

impl Ewma {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            rate: 0.0,
            initialized: false,
        }
    }

    fn tick(&mut self, instant_rate: f64) {
        if self.initialized {
            self.rate += self.alpha * (instant_rate - self.rate);
        } else {
            self.rate = instant_rate;
            self.initialized = true;
        }
    }
}

struct MeterInner {
    count: u64,
    uncounted: u64,
    rates: [Ewma; 3],
    start: Instant,
    last_tick: Instant,
}

impl Default for MeterInner {
    fn default() -> Self {
        let now = Instant::now();
        let [a1, a5, a15] = *ALPHAS;
        Self {
            count: 0,
            uncounted: 0,
            rates: [Ewma::new(a1), Ewma::new(a5), Ewma::new(a15)],
            start: now,
            last_tick: now,
        }
    }
}

impl MeterInner {
    /// Catch the moving averages up to now. The first overdue tick consumes
    /// the events accumulated since the last one; any further missed ticks
    /// decay the rates with an instant rate of zero.
    fn tick_if_needed(&mut self) {
        let elapsed = self.last_tick.elapsed();
        let ticks = (elapsed.as_nanos() / TICK_INTERVAL.as_nanos()) as u32;
        if ticks == 0 {
            return;
        }
        self.last_tick += TICK_INTERVAL * ticks;
        let instant_rate = self.uncounted as f64 / TICK_INTERVAL.as_secs_f64();
        self.uncounted = 0;
        for ewma in &mut self.rates {
            ewma.tick(instant_rate);
        }
        for _ in 1..ticks {
            for ewma in &mut self.rates {
                ewma.tick(0.0);
            }
        }
    }
}

/// An event-rate instrument: a cumulative count plus 1/5/15-minute moving
/// average rates and a lifetime mean rate, all in events per second.
#[derive(Clone, Default)]
pub struct Meter {
    inner: Arc<Mutex<MeterInner>>,
}

impl Meter {
    pub fn mark_by(&self, count: u64) {
        let mut inner = self.inner.lock();
        inner.tick_if_needed();
        inner.count += count;
        inner.uncounted += count;
    }

    pub fn mark(&self) {
        self.mark_by(1);
    }

    pub fn snapshot(&self) -> MeterSnapshot {
        let mut inner = self.inner.lock();
        inner.tick_if_needed();
        let lifetime = inner.start.elapsed().as_secs_f64();
        MeterSnapshot {
            count: inner.count,
            rate1: inner.rates[0].rate,
            rate5: inner.rates[1].rate,
            rate15: inner.rates[2].rate,
            rate_mean: if lifetime > 0.0 {
                inner.count as f64 / lifetime
            } else {
                0.0
            },
        }
    }
}

/// A point-in-time view of a [`Meter`].
#[derive(Copy, Clone, Debug)]
pub struct MeterSnapshot {
    count: u64,
    rate1: f64,
    rate5: f64,
    rate15: f64,
    rate_mean: f64,
}

impl MeterSnapshot {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn rate1(&self) -> f64 {
        self.rate1
    }

    pub fn rate5(&self) -> f64 {
        self.rate5
    }

    pub fn rate15(&self) -> f64 {
        self.rate15
    }

    pub fn rate_mean(&self) -> f64 {
        self.rate_mean
    }
}
