//! The easing curve that cards travel along.
//!
//! The curve is `f(x) = 1 - LOG_BASE^(1 - X_SCALE * x) / LOG_BASE`, which rises steeply near
//! `x = 0` and flattens out towards `x = 1`. Progress along the stack is the normalized arc
//! length of that curve, so equal progress steps cover equal distances along it: cards bunch up
//! where the curve is flat (the peek area at the bottom) and fan out where it is steep.
//!
//! Both directions are stored as lookup tables sampled at [`PRECISION_STEPS`] uniform steps and
//! read back with linear interpolation.

use alloc::vec::Vec;

/// Number of uniform steps the curve is sampled at.
pub const PRECISION_STEPS: usize = 250;

/// Larger values stretch the flat tail of the curve.
pub const X_SCALE: f32 = 1.75;

pub const LOG_BASE: f32 = 3000.0;

/// Scale of a card sitting at progress 0.
pub const STACK_PEEK_MIN_SCALE: f32 = 0.8;

/// Precomputed progress ⇄ x tables.
///
/// Building the table is pure: every instance holds identical values, so a host builds one at
/// startup and shares it (e.g. via `Arc`) between stacks.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveTable {
    /// `xp[i]`: curve x at uniform progress `i / PRECISION_STEPS`.
    xp: Vec<f32>,
    /// `px[i]`: normalized cumulative arc length at uniform x `i / PRECISION_STEPS`.
    px: Vec<f32>,
}

impl Default for CurveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveTable {
    pub fn new() -> Self {
        let n = PRECISION_STEPS;
        let step = 1.0 / n as f32;

        let fx: Vec<f32> = (0..=n).map(|i| log_func(i as f32 * step)).collect();

        // Arc length of each segment.
        let mut dx = vec![0.0f32; n + 1];
        let mut length = 0.0f32;
        for i in 1..=n {
            let dy = fx[i] - fx[i - 1];
            dx[i] = (dy * dy + step * step).sqrt();
            length += dx[i];
        }

        let mut px = vec![0.0f32; n + 1];
        let mut p = 0.0f32;
        for i in 1..=n {
            if length > 0.0 {
                p += (dx[i] / length).abs();
            }
            px[i] = p;
        }
        px[n] = 1.0;

        // Invert p(x) into x(p) by walking forward through px.
        let mut xp = vec![0.0f32; n + 1];
        let mut x_step = 0usize;
        for (p_step, slot) in xp.iter_mut().enumerate().take(n) {
            let p = p_step as f32 * step;
            while x_step < n && px[x_step] <= p {
                x_step += 1;
            }
            // Now px[x_step - 1] <= p < px[x_step].
            *slot = if x_step == 0 {
                0.0
            } else {
                let lo = px[x_step - 1];
                let span = px[x_step] - lo;
                let fraction = if span > 0.0 { (p - lo) / span } else { 0.0 };
                (x_step as f32 - 1.0 + fraction) * step
            };
        }
        xp[n] = 1.0;

        Self { xp, px }
    }

    /// Maps stack progress to normalized curve x.
    ///
    /// Inputs outside `[0, 1]` are returned unchanged.
    pub fn x_for_progress(&self, p: f32) -> f32 {
        if !(0.0..=1.0).contains(&p) {
            return p;
        }
        lookup(&self.xp, p)
    }

    /// Maps normalized curve x to stack progress. Inverse of [`Self::x_for_progress`] up to table
    /// resolution.
    pub fn progress_for_x(&self, x: f32) -> f32 {
        if !(0.0..=1.0).contains(&x) {
            return x;
        }
        lookup(&self.px, x)
    }

    pub fn xp(&self) -> &[f32] {
        &self.xp
    }

    pub fn px(&self) -> &[f32] {
        &self.px
    }
}

/// Linear interpolation into a table sampled at `PRECISION_STEPS` uniform steps. `t` is in
/// `[0, 1]`.
fn lookup(table: &[f32], t: f32) -> f32 {
    let n = PRECISION_STEPS;
    let index = t * n as f32;
    let floor = (index.floor() as usize).min(n);
    let ceil = (index.ceil() as usize).min(n);
    let mut fraction = 0.0;
    if floor < n && ceil != floor {
        let t_fraction = (index - floor as f32) / (ceil - floor) as f32;
        fraction = (table[ceil] - table[floor]) * t_fraction;
    }
    table[floor] + fraction
}

fn reverse(x: f32) -> f32 {
    -x * X_SCALE + 1.0
}

fn log_func(x: f32) -> f32 {
    1.0 - LOG_BASE.powf(reverse(x)) / LOG_BASE
}

/// Linear scale between `min_scale` at progress 0 and `1.0` at progress 1, clamped outside.
pub fn progress_to_scale(p: f32, min_scale: f32) -> f32 {
    if p <= 0.0 {
        return min_scale;
    }
    if p >= 1.0 {
        return 1.0;
    }
    min_scale + p * (1.0 - min_scale)
}
