use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::curve::{self, CurveTable};
use crate::error::{Result, StackError};
use crate::{CardRange, CardTransform, Rect, ScrollBounds, StackConfig};

/// Share of the bottom card that stays hidden below the screen edge at max scroll (0..0.7).
pub const SCROLL_HIDDEN_BOTTOM_RATE: f32 = 0.38;

/// Progress of the frontmost card's top edge when the stack is scrolled to 0.
const FIRST_CARD_PROGRESS: f32 = 0.5;

/// Geometry and the progress → transform mapping of a card stack.
///
/// The layout owns no scroll state: callers pass the current scroll to each query. Call
/// [`StackLayout::compute_rects`] whenever the window changes and
/// [`StackLayout::compute_min_max_scroll`] whenever the card count changes (or after the rects
/// change).
#[derive(Clone, Debug)]
pub struct StackLayout {
    config: StackConfig,
    curve: Arc<CurveTable>,

    view_rect: Rect,
    stack_visible_rect: Rect,
    stack_rect: Rect,
    card_rect: Rect,
    between_card_offset: i32,

    /// Base progress of each card at scroll 0, indexed by card position.
    card_progress: Vec<f32>,
    bounds: ScrollBounds,
}

impl StackLayout {
    pub fn new(config: StackConfig, curve: Arc<CurveTable>) -> Self {
        Self {
            config,
            curve,
            view_rect: Rect::default(),
            stack_visible_rect: Rect::default(),
            stack_rect: Rect::default(),
            card_rect: Rect::default(),
            between_card_offset: 0,
            card_progress: Vec::new(),
            bounds: ScrollBounds::default(),
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Replaces the configuration. Geometry is stale until the next `compute_rects`.
    pub fn set_config(&mut self, config: StackConfig) {
        self.config = config;
    }

    pub fn curve(&self) -> &Arc<CurveTable> {
        &self.curve
    }

    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    pub fn stack_visible_rect(&self) -> Rect {
        self.stack_visible_rect
    }

    pub fn stack_rect(&self) -> Rect {
        self.stack_rect
    }

    pub fn card_rect(&self) -> Rect {
        self.card_rect
    }

    pub fn between_card_offset(&self) -> i32 {
        self.between_card_offset
    }

    pub fn bounds(&self) -> ScrollBounds {
        self.bounds
    }

    pub fn card_count(&self) -> usize {
        self.card_progress.len()
    }

    /// Computes the stack and card rects.
    pub fn compute_rects(&mut self, window_width: i32, window_height: i32, stack_bounds: Rect) {
        self.view_rect = Rect::new(0, 0, window_width.max(0), window_height.max(0));

        let mut visible = stack_bounds;
        visible.bottom = self.view_rect.bottom.max(visible.top);
        self.stack_visible_rect = visible;

        let width_padding = (self.config.width_padding_pct * stack_bounds.width() as f32) as i32;
        let height_padding = self.config.top_padding_px;
        self.stack_rect = stack_bounds.inset(width_padding, height_padding);

        // Cards fill the stack rect; there is no separate aspect constraint.
        self.card_rect = self.stack_rect;

        self.between_card_offset =
            (self.config.visible_card_fraction * self.card_rect.height() as f32) as i32;

        ctrace!(
            window_width,
            window_height,
            card_width = self.card_rect.width(),
            card_height = self.card_rect.height(),
            "StackLayout::compute_rects"
        );
    }

    /// Computes the per-card base progress and the min/max/initial scroll for `item_count`
    /// cards.
    pub fn compute_min_max_scroll(&mut self, item_count: usize) {
        self.card_progress.clear();

        if item_count < 1 {
            self.bounds = ScrollBounds::default();
            return;
        }

        // Offsets are measured up from the visible bottom, where the curve is flattest.
        let bottom = self.stack_visible_rect.bottom;
        let p_at_bottom = self.screen_y_to_progress(bottom);
        let p_between_cards =
            p_at_bottom - self.screen_y_to_progress(bottom - self.between_card_offset);
        let p_card_height =
            p_at_bottom - self.screen_y_to_progress(bottom - self.card_rect.height());
        let p_nav_bar = p_at_bottom - self.screen_y_to_progress(self.stack_rect.bottom);

        let mut p = FIRST_CARD_PROGRESS;
        self.card_progress.reserve(item_count);
        for i in 0..item_count {
            self.card_progress.push(p);
            if i + 1 < item_count {
                p += p_between_cards;
            }
        }

        let mut max = p - (1.0 - p_card_height - p_nav_bar);
        let min = if item_count == 1 { max.max(0.0) } else { 0.0 };
        let initial = p.max(0.0);

        // A single card keeps its bottom fully on screen.
        if item_count != 1 {
            max -= SCROLL_HIDDEN_BOTTOM_RATE;
        }

        if item_count == 1 {
            max = min;
        } else if max < min {
            cwarn!(min, max, "scroll range inverted; collapsing to min");
            max = min;
        }

        self.bounds = ScrollBounds { min, max, initial };
        cdebug!(
            item_count,
            min,
            max,
            initial,
            "StackLayout::compute_min_max_scroll"
        );
    }

    /// Base progress of a card, i.e. the scroll at which its top sits at progress 0.
    pub fn stack_scroll_for_card(&self, index: usize) -> Result<f32> {
        self.card_progress
            .get(index)
            .copied()
            .ok_or(StackError::UnknownCard {
                index,
                count: self.card_progress.len(),
            })
    }

    /// Computes the transform of card `index` at `stack_scroll`.
    ///
    /// `prev` is the transform of the next card up the stack (index + 1), which must be computed
    /// first; see
    /// [`Self::transform_for_progress`].
    pub fn stack_transform(
        &self,
        index: usize,
        stack_scroll: f32,
        prev: Option<&CardTransform>,
    ) -> Result<CardTransform> {
        let progress = self.stack_scroll_for_card(index)?;
        Ok(self.transform_for_progress(progress, stack_scroll, prev))
    }

    /// Computes the transform of a card whose base progress is `card_progress`.
    ///
    /// A card below the screen (`p > 1`) is invisible. A card above the top (`p < 0`) stays
    /// visible only while `prev` (the card at the next index) is still below the top, so exactly
    /// one card can peek over the top edge.
    pub fn transform_for_progress(
        &self,
        card_progress: f32,
        stack_scroll: f32,
        prev: Option<&CardTransform>,
    ) -> CardTransform {
        let p_relative = card_progress - stack_scroll;
        let p_bounded = p_relative.clamp(0.0, 1.0);

        if p_relative > 1.0 {
            return self.reset_transform();
        }
        if p_relative < 0.0 && prev.is_some_and(|prev| prev.progress <= 0.0) {
            return self.reset_transform();
        }

        let scale = self.progress_to_scale(p_bounded);
        let scale_y_offset = ((1.0 - scale) * self.card_rect.height() as f32 / 2.0) as i32;
        let min_z = self.config.translation_z_min_px;
        let max_z = self.config.translation_z_max_px;

        let translation_y =
            self.progress_to_screen_y(p_bounded) - self.stack_visible_rect.top - scale_y_offset;
        let rect = self
            .card_rect
            .offset(0, translation_y)
            .scale_about_center(scale);

        CardTransform {
            scale,
            translation_y,
            translation_z: min_z.max(min_z + p_bounded * (max_z - min_z)),
            rect,
            visible: true,
            progress: p_relative,
        }
    }

    fn reset_transform(&self) -> CardTransform {
        CardTransform {
            rect: self.card_rect,
            ..CardTransform::default()
        }
    }

    /// Recomputes the transforms of every card, back to front.
    ///
    /// `out` is resized to the card count. Once the visible run of cards ends, the remaining
    /// (further front) cards are reset without being computed. Returns the visible range, or
    /// `None` when no card is visible.
    pub fn update_stack_transforms(
        &self,
        stack_scroll: f32,
        out: &mut Vec<CardTransform>,
    ) -> Option<CardRange> {
        let count = self.card_progress.len();
        out.resize(count, CardTransform::default());

        let mut front_most: Option<usize> = None;
        let mut back_most: Option<usize> = None;
        let mut prev: Option<CardTransform> = None;

        for i in (0..count).rev() {
            let transform =
                self.transform_for_progress(self.card_progress[i], stack_scroll, prev.as_ref());
            if transform.visible {
                front_most.get_or_insert(i);
                back_most = Some(i);
            } else if back_most.is_some() {
                for t in &mut out[..=i] {
                    t.reset();
                }
                break;
            }
            out[i] = transform;
            prev = Some(transform);
        }

        match (back_most, front_most) {
            (Some(start), Some(end)) => Some(CardRange {
                start_index: start,
                end_index: end + 1,
            }),
            _ => None,
        }
    }

    pub fn progress_to_scale(&self, p: f32) -> f32 {
        curve::progress_to_scale(p, self.config.peek_min_scale)
    }

    /// Converts progress along the curve to a screen Y coordinate.
    pub fn progress_to_screen_y(&self, p: f32) -> i32 {
        let visible = self.stack_visible_rect;
        let x = self.curve.x_for_progress(p);
        visible.top + (x * visible.height() as f32) as i32
    }

    /// Converts a screen Y coordinate to progress along the curve.
    pub fn screen_y_to_progress(&self, screen_y: i32) -> f32 {
        let visible = self.stack_visible_rect;
        let height = visible.height();
        if height <= 0 {
            return if screen_y <= visible.top { 0.0 } else { 1.0 };
        }
        let x = (screen_y - visible.top) as f32 / height as f32;
        self.curve.progress_for_x(x)
    }
}
