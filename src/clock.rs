use std::cell::Cell;
use std::ops::Add;
use std::time::{Duration, Instant};

/// A point on the monotonic game clock, stored as the time elapsed since an
/// arbitrary origin. The game loop samples it once per tick and hands the
/// same value to every enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    pub const fn from_duration(since_origin: Duration) -> Self {
        Timestamp(since_origin)
    }

    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(Duration::from_millis(ms))
    }

    pub const fn from_micros(us: u64) -> Self {
        Timestamp(Duration::from_micros(us))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    pub fn since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}

/// Clock that only moves when told to. Used for replays and scripted runs.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) -> Timestamp {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    pub fn set(&self, to: Timestamp) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

/// Interval length measured in whole intervals, fractional part included.
/// `ratio(24ms, 12ms) == 2.0`.
pub fn interval_ratio(elapsed: Duration, interval: Duration) -> f32 {
    if interval.is_zero() {
        return 1.0;
    }
    (elapsed.as_nanos() as f64 / interval.as_nanos() as f64) as f32
}
