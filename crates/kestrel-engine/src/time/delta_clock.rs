use std::time::{Duration, Instant};

/// Smallest delta the clock will ever report, in seconds (100 µs).
///
/// Zero or negative intervals (suspend/resume, clock anomalies, tight loops)
/// are clamped up to this value so `1 / dt` stays finite.
pub const MIN_DELTA: f32 = 0.000_1;

/// Monotonic clock measuring the time between frame boundaries.
///
/// Usage contract: call [`sample`](Self::sample) exactly once per frame.
/// A second call inside the same frame moves the reference point, so the
/// next frame measures a shorter interval than it actually took. This is
/// not detected.
#[derive(Debug, Clone)]
pub struct DeltaClock {
    last: Instant,
    dt_max: Option<Duration>,
}

impl DeltaClock {
    /// Creates a clock whose reference point is "now".
    ///
    /// Seeding at construction keeps the first sample small (time since
    /// construction) instead of a spurious huge delta.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock with an explicit reference point.
    pub fn starting_at(last: Instant) -> Self {
        Self { last, dt_max: None }
    }

    /// Clamps reported deltas to `dt_max` (e.g. after a debugger stall).
    pub fn with_max(mut self, dt_max: Duration) -> Self {
        debug_assert!(dt_max.as_secs_f32() >= MIN_DELTA);
        self.dt_max = Some(dt_max);
        self
    }

    /// Resets the reference point without reporting a delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Returns the seconds elapsed since the previous sample and makes "now"
    /// the new reference point.
    pub fn sample(&mut self) -> f32 {
        self.sample_at(Instant::now())
    }

    /// Same as [`sample`](Self::sample) with an explicit timestamp.
    pub fn sample_at(&mut self, now: Instant) -> f32 {
        // An earlier `now` saturates to zero, then gets clamped below.
        let mut dt = now.saturating_duration_since(self.last);
        if let Some(max) = self.dt_max {
            dt = dt.min(max);
        }

        self.last = now;

        dt.as_secs_f32().max(MIN_DELTA)
    }
}

impl Default for DeltaClock {
    fn default() -> Self {
        Self::new()
    }
}
