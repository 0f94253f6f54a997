//! Pointer velocity estimation.

use alloc::collections::VecDeque;

const HISTORY_SIZE: usize = 20;

/// Only samples this recent contribute to the estimate.
const HORIZON_MS: u64 = 100;

/// With no sample for this long before the newest one, the pointer is treated as having stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// Estimates velocity along one axis with a least-squares line fit over recent samples.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    pub fn add_movement(&mut self, time_ms: u64, position: f32) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        // Out-of-order timestamps restart tracking.
        if self.samples.back().is_some_and(|s| s.time_ms > time_ms) {
            self.samples.clear();
        }
        self.samples.push_back(Sample { time_ms, position });
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity in units per second, clamped to `±max_velocity`.
    pub fn velocity(&self, max_velocity: f32) -> f32 {
        let Some(newest) = self.samples.back().copied() else {
            return 0.0;
        };

        let mut count = 0usize;
        let mut sum_t = 0.0f32;
        let mut sum_x = 0.0f32;
        let mut sum_tt = 0.0f32;
        let mut sum_tx = 0.0f32;
        let mut previous_time = newest.time_ms;

        for sample in self.samples.iter().rev() {
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS || previous_time - sample.time_ms > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;
            let t = -(age as f32);
            let x = sample.position - newest.position;
            sum_t += t;
            sum_x += x;
            sum_tt += t * t;
            sum_tx += t * x;
            count += 1;
        }

        if count < 2 {
            return 0.0;
        }

        let n = count as f32;
        let denom = n * sum_tt - sum_t * sum_t;
        if denom.abs() <= f32::EPSILON {
            return 0.0;
        }
        let per_ms = (n * sum_tx - sum_t * sum_x) / denom;
        let max_velocity = max_velocity.abs();
        (per_ms * 1000.0).clamp(-max_velocity, max_velocity)
    }
}
