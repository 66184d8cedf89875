use super::MIN_DELTA;

/// Smoothing weight given to each new frame duration.
pub const FPS_ALPHA: f32 = 1.0 / 100.0;

/// Single-pole exponential moving average over frame durations.
///
/// Favors a stable display value over responsiveness.
#[derive(Debug, Clone, Default)]
pub struct FpsEstimator {
    average_duration: f32,
    frame_count: u64,
    fps: u32,
}

impl FpsEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one frame duration (seconds) into the average.
    ///
    /// Non-positive or non-finite samples are clamped to [`MIN_DELTA`].
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(MIN_DELTA) } else { MIN_DELTA };

        if self.frame_count == 0 {
            self.average_duration = dt;
        } else {
            self.average_duration =
                self.average_duration * (1.0 - FPS_ALPHA) + dt * FPS_ALPHA;
        }

        self.frame_count += 1;
        self.fps = (1.0 / self.average_duration) as u32;
    }

    /// Integer frames per second, truncated toward zero. Zero before the first update.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn average_duration(&self) -> f32 {
        self.average_duration
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
