//! Inertial scrolling after a pointer release.
//!
//! Positions are in scroll-range pixels (progress × visible stack height). Velocity decays
//! exponentially: after `t` milliseconds it is `v0 · d^t`, so the position is
//! `start + v0/1000 · (d^t − 1) / ln d`. A fling may overshoot its bounds by a fixed overscroll
//! distance, then springs back.

use crate::tween::{Easing, Tween};

/// Below this speed (px/s) a fling is considered stopped.
const STOP_VELOCITY: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Coasting,
    SpringBack(Tween),
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    start: f32,
    /// Initial velocity in px/s.
    velocity: f32,
    start_ms: u64,
    /// `ln d` for the per-millisecond decay factor `d`.
    ln_decay: f32,
    min: f32,
    max: f32,
    overscroll: f32,
    spring_back_ms: u64,
    position: f32,
    phase: Phase,
}

impl Fling {
    /// Starts a fling from `start` with `velocity`, allowed to settle anywhere in `[min, max]`
    /// and to overshoot either edge by at most `overscroll`.
    pub fn new(
        start: f32,
        velocity: f32,
        now_ms: u64,
        deceleration: f32,
        (min, max): (f32, f32),
        overscroll: f32,
        spring_back_ms: u64,
    ) -> Self {
        let deceleration = deceleration.clamp(0.5, 0.9999);
        Self {
            start,
            velocity,
            start_ms: now_ms,
            ln_decay: deceleration.ln(),
            min: min.min(max),
            max: max.max(min),
            overscroll: overscroll.max(0.0),
            spring_back_ms,
            position: start,
            phase: Phase::Coasting,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Where the fling would come to rest if nothing stopped it.
    pub fn projected_end(&self) -> f32 {
        self.start - self.velocity / 1000.0 / self.ln_decay
    }

    /// Current velocity in px/s; zero once springing back or finished.
    pub fn velocity_at(&self, now_ms: u64) -> f32 {
        match self.phase {
            Phase::Coasting => {
                let t = now_ms.saturating_sub(self.start_ms) as f32;
                self.velocity * (self.ln_decay * t).exp()
            }
            _ => 0.0,
        }
    }

    /// Advances to `now_ms`. Returns the new position and whether the fling is still running.
    pub fn advance(&mut self, now_ms: u64) -> (f32, bool) {
        match self.phase {
            Phase::Finished => return (self.position, false),
            Phase::SpringBack(tween) => {
                self.position = tween.sample(now_ms);
                if tween.is_done(now_ms) {
                    self.phase = Phase::Finished;
                }
                return (self.position, !self.is_finished());
            }
            Phase::Coasting => {}
        }

        let t = now_ms.saturating_sub(self.start_ms) as f32;
        let decay = (self.ln_decay * t).exp();
        self.position = self.start + self.velocity / 1000.0 * (decay - 1.0) / self.ln_decay;

        let lower_edge = self.min - self.overscroll;
        let upper_edge = self.max + self.overscroll;
        if self.position > upper_edge || self.position < lower_edge {
            self.position = self.position.clamp(lower_edge, upper_edge);
            self.spring_back(now_ms);
            return (self.position, !self.is_finished());
        }

        let stopped = (self.velocity * decay).abs() < STOP_VELOCITY;
        if stopped {
            if self.position > self.max || self.position < self.min {
                self.spring_back(now_ms);
            } else {
                self.phase = Phase::Finished;
            }
        }
        (self.position, !self.is_finished())
    }

    fn spring_back(&mut self, now_ms: u64) {
        let target = self.position.clamp(self.min, self.max);
        if target == self.position {
            self.phase = Phase::Finished;
            return;
        }
        self.phase = Phase::SpringBack(Tween::new(
            self.position,
            target,
            now_ms,
            self.spring_back_ms,
            Easing::Decelerate,
        ));
    }
}
