use crate::Rect;
use crate::curve::STACK_PEEK_MIN_SCALE;
use crate::tween::Easing;

/// Configuration for a card stack.
///
/// All lengths are in window pixels, velocities in pixels per second and durations in
/// milliseconds. Defaults describe a phone-sized stack at density 1; hosts on denser screens
/// scale the pixel fields (see [`StackConfig::with_density`]).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, and missing fields
/// fall back to their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackConfig {
    /// Distance from the window top to the top of the stack bounds.
    pub stack_top_inset_px: i32,
    /// Horizontal inset of the cards, as a fraction of the stack width (per side).
    pub width_padding_pct: f32,
    /// Vertical inset of the cards inside the stack bounds (per side).
    pub top_padding_px: i32,
    /// Fraction of a card's height left visible between neighbouring cards.
    pub visible_card_fraction: f32,
    /// Scale of a card at progress 0.
    pub peek_min_scale: f32,

    /// Depth of a card at progress 0.
    pub translation_z_min_px: f32,
    /// Depth of a card at progress 1.
    pub translation_z_max_px: f32,

    /// How far a drag may push the scroll past its bounds, in progress units.
    pub overscroll_pct: f32,
    /// Overscroll allowed at the edges of a fling at maximum velocity.
    pub fling_overscroll_px: i32,

    /// Vertical movement before a press turns into a scroll drag.
    pub touch_slop_px: f32,
    /// Horizontal movement before a press on a card turns into a swipe.
    pub paging_touch_slop_px: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,

    /// Swiping a card further than this fraction of its width dismisses it on release.
    pub swipe_dismiss_fraction: f32,
    /// Horizontal release velocity that dismisses a swiped card regardless of distance.
    pub swipe_escape_velocity: f32,

    /// Duration of bound-scroll and scroll-to animations.
    pub scroll_duration_ms: u64,
    pub scroll_easing: Easing,
    /// Per-millisecond velocity decay of a fling (`0 < d < 1`).
    pub fling_deceleration: f32,
    /// Duration of the spring back from a fling overscroll.
    pub fling_spring_back_ms: u64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_top_inset_px: 64,
            width_padding_pct: 0.04,
            top_padding_px: 16,
            visible_card_fraction: 0.5,
            peek_min_scale: STACK_PEEK_MIN_SCALE,
            translation_z_min_px: 20.0,
            translation_z_max_px: 80.0,
            overscroll_pct: 0.0875,
            fling_overscroll_px: 150,
            touch_slop_px: 8.0,
            paging_touch_slop_px: 16.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            swipe_dismiss_fraction: 0.4,
            swipe_escape_velocity: 100.0,
            scroll_duration_ms: 200,
            scroll_easing: Easing::AccelerateDecelerate,
            fling_deceleration: 0.998,
            fling_spring_back_ms: 250,
        }
    }
}

impl StackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales every pixel-valued field by `density`.
    pub fn with_density(mut self, density: f32) -> Self {
        let px = |v: i32| (v as f32 * density).round() as i32;
        self.stack_top_inset_px = px(self.stack_top_inset_px);
        self.top_padding_px = px(self.top_padding_px);
        self.translation_z_min_px *= density;
        self.translation_z_max_px *= density;
        self.fling_overscroll_px = px(self.fling_overscroll_px);
        self.touch_slop_px *= density;
        self.paging_touch_slop_px *= density;
        self.min_fling_velocity *= density;
        self.max_fling_velocity *= density;
        self.swipe_escape_velocity *= density;
        self
    }

    /// The stack bounds for a window of the given size.
    pub fn stack_bounds(&self, window_width: i32, window_height: i32) -> Rect {
        Rect::new(
            0,
            self.stack_top_inset_px.min(window_height),
            window_width,
            window_height,
        )
    }

    pub fn with_stack_top_inset(mut self, px: i32) -> Self {
        self.stack_top_inset_px = px;
        self
    }

    pub fn with_padding(mut self, width_padding_pct: f32, top_padding_px: i32) -> Self {
        self.width_padding_pct = width_padding_pct;
        self.top_padding_px = top_padding_px;
        self
    }

    pub fn with_visible_card_fraction(mut self, fraction: f32) -> Self {
        self.visible_card_fraction = fraction;
        self
    }

    pub fn with_peek_min_scale(mut self, scale: f32) -> Self {
        self.peek_min_scale = scale;
        self
    }

    pub fn with_translation_z(mut self, min_px: f32, max_px: f32) -> Self {
        self.translation_z_min_px = min_px;
        self.translation_z_max_px = max_px;
        self
    }

    pub fn with_overscroll_pct(mut self, pct: f32) -> Self {
        self.overscroll_pct = pct;
        self
    }

    pub fn with_fling_overscroll(mut self, px: i32) -> Self {
        self.fling_overscroll_px = px;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop_px: f32, paging_touch_slop_px: f32) -> Self {
        self.touch_slop_px = touch_slop_px;
        self.paging_touch_slop_px = paging_touch_slop_px;
        self
    }

    pub fn with_fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_swipe_dismiss(mut self, fraction: f32, escape_velocity: f32) -> Self {
        self.swipe_dismiss_fraction = fraction;
        self.swipe_escape_velocity = escape_velocity;
        self
    }

    pub fn with_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_duration_ms = duration_ms;
        self
    }

    pub fn with_scroll_easing(mut self, easing: Easing) -> Self {
        self.scroll_easing = easing;
        self
    }

    pub fn with_fling_deceleration(mut self, deceleration: f32) -> Self {
        self.fling_deceleration = deceleration;
        self
    }

    pub fn with_fling_spring_back_ms(mut self, duration_ms: u64) -> Self {
        self.fling_spring_back_ms = duration_ms;
        self
    }
}
