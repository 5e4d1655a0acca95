use std::collections::VecDeque;

use crate::math::{Point2, Vector2};

/// Samples older than this no longer describe the current motion.
const SAMPLE_WINDOW: f64 = 0.1;

/// Exponential-decay friction constant for fling projection, per second.
const DECAY_RATE: f64 = 4.2;

/// Tracks recent pointer samples to estimate release velocity.
///
/// Keeps positions from the last 100 ms and estimates velocity as the slope
/// between the oldest retained sample and the newest one.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, Point2)>,
}

impl VelocityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer position at `time` (seconds, monotonic).
    pub fn add_sample(&mut self, time: f64, position: Point2) {
        while let Some(&(t, _)) = self.samples.front() {
            if time - t > SAMPLE_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        self.samples.push_back((time, position));
    }

    /// Current velocity estimate in pixels per second; zero when fewer than
    /// two samples are available.
    #[must_use]
    pub fn velocity(&self) -> Vector2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return Vector2::zeros();
        };
        let dt = t1 - t0;
        if dt <= f64::EPSILON {
            return Vector2::zeros();
        }
        (p1 - p0) / dt
    }
}

/// Projects where a fling released at `position` with `velocity` settles,
/// integrating an exponential velocity decay to its closed form
/// `position + velocity / λ`.
#[must_use]
pub fn project(position: Point2, velocity: Vector2) -> Point2 {
    position + velocity / DECAY_RATE
}
