use alloc::sync::Arc;

use crate::fling::Fling;
use crate::tween::Tween;
use crate::{FrameStep, ScrollBounds, ScrollState, StackConfig, StackLayout};

/// A callback fired whenever the stack scroll changes. The argument is the new scroll.
pub type OnScrollChanged = Arc<dyn Fn(f32) + Send + Sync>;

/// Scroll state of a card stack: the current scroll progress, its bounds, and the animation or
/// fling currently driving it.
///
/// The scroller never clamps on its own: a drag may push the scroll past its bounds, and callers
/// decide when to pull it back ([`StackScroller::bound_scroll`],
/// [`StackScroller::animate_bound_scroll`]).
///
/// Animations are advanced by the host through [`StackScroller::advance_frame`] once per frame.
/// Starting an animation or fling always cancels whichever one was in flight.
#[derive(Clone)]
pub struct StackScroller {
    config: StackConfig,
    scroll: f32,
    bounds: ScrollBounds,
    /// Height of the visible stack; converts progress to scroll-range pixels.
    range_height: i32,

    animation: Option<Tween>,
    fling: Option<Fling>,

    on_change: Option<OnScrollChanged>,
    revision: u64,
    notify_depth: usize,
    notify_pending: bool,
}

impl StackScroller {
    pub fn new(config: StackConfig) -> Self {
        Self {
            config,
            scroll: 0.0,
            bounds: ScrollBounds::default(),
            range_height: 0,
            animation: None,
            fling: None,
            on_change: None,
            revision: 0,
            notify_depth: 0,
            notify_pending: false,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StackConfig) {
        self.config = config;
    }

    /// Copies the scroll bounds and scroll-range height from the layout.
    ///
    /// Call this after every `compute_rects`/`compute_min_max_scroll`. The current scroll is not
    /// touched.
    pub fn sync_layout(&mut self, layout: &StackLayout) {
        self.bounds = layout.bounds();
        self.range_height = layout.stack_visible_rect().height();
    }

    pub fn bounds(&self) -> ScrollBounds {
        self.bounds
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(f32) + Send + Sync + 'static>) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Incremented on every scroll change notification.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn notify_now(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        if let Some(cb) = &self.on_change {
            cb(self.scroll);
        }
    }

    fn notify(&mut self) {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.notify_now();
    }

    /// Batches several updates into a single change notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.notify_depth = self.notify_depth.saturating_add(1);

        f(self);

        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);

        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.notify_now();
        }
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Sets the scroll and notifies. No clamping.
    pub fn set_scroll(&mut self, scroll: f32) {
        self.scroll = scroll;
        self.notify();
    }

    /// Sets the scroll to the bounded initial state, used when the stack is first shown.
    pub fn set_scroll_to_initial_state(&mut self) {
        let initial = self.bounds.clamp(self.bounds.initial);
        self.set_scroll(initial);
    }

    pub fn bounded_scroll(&self, scroll: f32) -> f32 {
        self.bounds.clamp(scroll)
    }

    /// Clamps the current scroll into bounds, notifying only if it changed.
    pub fn bound_scroll(&mut self) -> bool {
        let bounded = self.bounded_scroll(self.scroll);
        if bounded != self.scroll {
            self.set_scroll(bounded);
            return true;
        }
        false
    }

    pub fn scroll_out_of_bounds_amount(&self, scroll: f32) -> f32 {
        self.bounds.out_of_bounds_amount(scroll)
    }

    pub fn is_scroll_out_of_bounds(&self) -> bool {
        self.scroll_out_of_bounds_amount(self.scroll) != 0.0
    }

    /// Animates the scroll back into bounds if it is outside them.
    pub fn animate_bound_scroll(&mut self, now_ms: u64) -> bool {
        let bounded = self.bounded_scroll(self.scroll);
        if bounded != self.scroll {
            return self.animate_scroll(self.scroll, bounded, now_ms);
        }
        false
    }

    /// Animates the scroll from `from` to `to`, cancelling any fling or animation in flight.
    ///
    /// A zero-distance request starts nothing and returns `false`.
    pub fn animate_scroll(&mut self, from: f32, to: f32, now_ms: u64) -> bool {
        if from == to {
            return false;
        }
        self.stop_scroller();
        self.stop_bound_scroll_animation();
        ctrace!(from, to, now_ms, "animate_scroll");
        self.animation = Some(Tween::new(
            from,
            to,
            now_ms,
            self.config.scroll_duration_ms,
            self.config.scroll_easing,
        ));
        true
    }

    /// Target of the running scroll animation, if any.
    pub fn animation_target(&self) -> Option<f32> {
        self.animation.map(|t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn stop_bound_scroll_animation(&mut self) {
        self.animation = None;
    }

    /// Starts a fling with `velocity` in scroll-range pixels per second.
    ///
    /// Velocities at or below the configured minimum start nothing and return `false`.
    pub fn fling(&mut self, velocity: f32, now_ms: u64) -> bool {
        if !velocity.is_finite() || velocity.abs() <= self.config.min_fling_velocity {
            return false;
        }
        self.stop_scroller();
        self.stop_bound_scroll_animation();

        let max_velocity = self.config.max_fling_velocity.max(f32::EPSILON);
        let overscroll = ((velocity.abs() / max_velocity).min(1.0)
            * self.config.fling_overscroll_px as f32) as i32;
        let start = self.progress_to_scroll_range(self.scroll);
        let min = self.progress_to_scroll_range(self.bounds.min);
        let max = self.progress_to_scroll_range(self.bounds.max);
        cdebug!(velocity, start, min, max, overscroll, "fling");

        self.fling = Some(Fling::new(
            start as f32,
            velocity,
            now_ms,
            self.config.fling_deceleration,
            (min as f32, max as f32),
            overscroll as f32,
            self.config.fling_spring_back_ms,
        ));
        true
    }

    /// Whether a fling is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.fling.is_some_and(|f| !f.is_finished())
    }

    /// Stops the current fling, if any.
    pub fn stop_scroller(&mut self) {
        self.fling = None;
    }

    /// Advances the running fling or animation to `now_ms` and applies the resulting scroll.
    pub fn advance_frame(&mut self, now_ms: u64) -> FrameStep {
        if let Some(fling) = &mut self.fling {
            let (position, running) = fling.advance(now_ms);
            if !running {
                self.fling = None;
            }
            let scroll = self.scroll_range_to_progress(position);
            self.set_scroll(scroll);
        } else if let Some(tween) = self.animation {
            let scroll = tween.sample(now_ms);
            if tween.is_done(now_ms) {
                self.animation = None;
            }
            self.set_scroll(scroll);
        }

        FrameStep {
            scroll: self.scroll,
            still_scrolling: self.fling.is_some() || self.animation.is_some(),
        }
    }

    pub fn progress_to_scroll_range(&self, p: f32) -> i32 {
        (p * self.range_height as f32) as i32
    }

    pub fn scroll_range_to_progress(&self, s: f32) -> f32 {
        if self.range_height <= 0 {
            return 0.0;
        }
        s / self.range_height as f32
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            current: self.scroll,
            bounds: self.bounds,
            is_scrolling: self.is_scrolling() || self.is_animating(),
        }
    }
}

impl core::fmt::Debug for StackScroller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StackScroller")
            .field("scroll", &self.scroll)
            .field("bounds", &self.bounds)
            .field("range_height", &self.range_height)
            .field("animation", &self.animation)
            .field("fling", &self.fling)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
