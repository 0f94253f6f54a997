//! Pointer handling for a card stack.
//!
//! A press either becomes a vertical scroll drag or, when it starts on a card and moves mostly
//! sideways, a horizontal swipe of that card. The swipe check runs first, so a diagonal move that
//! clears the paging slop before the scroll slop swipes.
//!
//! The controller owns no scroll state. Each event is applied to the [`StackScroller`] passed in,
//! and the caller learns what happened through the returned [`GestureOutcome`].

use alloc::collections::BTreeMap;

use crate::velocity::VelocityTracker;
use crate::{CardTransform, PointerEvent, PointerId, PointerKind, StackLayout, StackScroller};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// A pointer is down but has not moved past either slop.
    PossibleDrag,
    Dragging,
    Swiping,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeOutcome {
    Began { index: usize },
    Moved { index: usize, translation_x: f32 },
    /// The card should be removed. `velocity_x` is the release velocity in px/s.
    Dismissed { index: usize, velocity_x: f32 },
    SnappedBack { index: usize },
}

/// What a single pointer event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    None,
    /// The stack scroll changed.
    Scrolled,
    /// The press turned into a scroll drag; a host should stop its parents from intercepting.
    DisallowIntercept,
    FlingStarted,
    /// The scroll is animating back into bounds.
    SnapBack,
    Swipe(SwipeOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Swipe {
    index: usize,
    start_x: f32,
    translation_x: f32,
    card_width: f32,
}

#[derive(Clone, Debug, Default)]
pub struct GestureController {
    phase: GesturePhase,
    /// Last known position of every pointer that is down.
    pointers: BTreeMap<PointerId, (f32, f32)>,
    active: Option<PointerId>,

    initial_x: f32,
    initial_y: f32,
    last_p: f32,

    /// Card under the initial press, if any.
    candidate: Option<usize>,
    swipe: Option<Swipe>,

    /// Samples of the stack scroll in scroll-range pixels.
    scroll_velocity: VelocityTracker,
    swipe_velocity: VelocityTracker,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active
    }

    /// The card being swiped and its horizontal translation.
    pub fn swipe_translation(&self) -> Option<(usize, f32)> {
        self.swipe.map(|s| (s.index, s.translation_x))
    }

    /// Drops all gesture state without touching the scroller.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.pointers.clear();
        self.active = None;
        self.candidate = None;
        self.swipe = None;
        self.scroll_velocity.clear();
        self.swipe_velocity.clear();
    }

    /// Keeps the pressed card index pointing at the same card after the card at `index` was
    /// removed from the stack.
    ///
    /// Removing the card being swiped drops the gesture; the remaining events of that press are
    /// ignored.
    pub fn on_card_removed(&mut self, index: usize) {
        if self.swipe.is_some_and(|s| s.index == index) {
            cdebug!(index, "swiped card removed");
            self.reset();
            return;
        }
        self.candidate = match self.candidate {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        if let Some(swipe) = &mut self.swipe {
            if swipe.index > index {
                swipe.index -= 1;
            }
        }
    }

    /// Keeps the pressed card index pointing at the same card after a card was inserted at
    /// `index`.
    pub fn on_card_inserted(&mut self, index: usize) {
        if let Some(c) = &mut self.candidate {
            if *c >= index {
                *c += 1;
            }
        }
        if let Some(swipe) = &mut self.swipe {
            if swipe.index >= index {
                swipe.index += 1;
            }
        }
    }

    /// Feeds one pointer event.
    ///
    /// `transforms` are the current card transforms indexed by card position; they are used to
    /// find the card under a press.
    pub fn on_pointer_event(
        &mut self,
        ev: &PointerEvent,
        layout: &StackLayout,
        scroller: &mut StackScroller,
        transforms: &[CardTransform],
    ) -> GestureOutcome {
        match ev.kind {
            PointerKind::Down => self.on_down(ev, layout, scroller, transforms),
            PointerKind::PointerDown if self.phase == GesturePhase::Idle => {
                self.on_down(ev, layout, scroller, transforms)
            }
            PointerKind::PointerDown => {
                self.pointers.insert(ev.pointer, (ev.x, ev.y));
                self.active = Some(ev.pointer);
                self.last_p = layout.screen_y_to_progress(ev.y as i32);
                GestureOutcome::None
            }
            PointerKind::Move => self.on_move(ev, layout, scroller),
            PointerKind::PointerUp => {
                self.on_pointer_up(ev, layout);
                GestureOutcome::None
            }
            PointerKind::Up => self.on_up(ev, scroller),
            PointerKind::Cancel => self.on_cancel(ev, scroller),
        }
    }

    fn on_down(
        &mut self,
        ev: &PointerEvent,
        layout: &StackLayout,
        scroller: &mut StackScroller,
        transforms: &[CardTransform],
    ) -> GestureOutcome {
        self.reset();
        if layout.card_count() == 0 {
            return GestureOutcome::None;
        }

        self.pointers.insert(ev.pointer, (ev.x, ev.y));
        self.active = Some(ev.pointer);
        self.initial_x = ev.x;
        self.initial_y = ev.y;
        self.last_p = layout.screen_y_to_progress(ev.y as i32);

        scroller.stop_scroller();
        scroller.stop_bound_scroll_animation();

        self.scroll_velocity.add_movement(
            ev.time_ms,
            scroller.progress_to_scroll_range(scroller.scroll()) as f32,
        );
        self.candidate = hit_test(transforms, ev.x as i32, ev.y as i32);
        self.phase = GesturePhase::PossibleDrag;
        ctrace!(x = ev.x, y = ev.y, candidate = ?self.candidate, "gesture down");
        GestureOutcome::None
    }

    fn on_move(
        &mut self,
        ev: &PointerEvent,
        layout: &StackLayout,
        scroller: &mut StackScroller,
    ) -> GestureOutcome {
        if let Some(pos) = self.pointers.get_mut(&ev.pointer) {
            *pos = (ev.x, ev.y);
        }
        if self.phase == GesturePhase::Idle || self.active != Some(ev.pointer) {
            return GestureOutcome::None;
        }

        let config = scroller.config();
        let mut outcome = GestureOutcome::None;

        if self.phase == GesturePhase::PossibleDrag {
            let dx = ev.x - self.initial_x;
            let dy = ev.y - self.initial_y;
            let swipe_candidate = self
                .candidate
                .filter(|_| dx.abs() > config.paging_touch_slop_px && dx.abs() > dy.abs());
            if let Some(index) = swipe_candidate {
                let card_width = layout.card_rect().width() as f32;
                self.phase = GesturePhase::Swiping;
                self.swipe = Some(Swipe {
                    index,
                    start_x: ev.x,
                    translation_x: 0.0,
                    card_width,
                });
                self.swipe_velocity.clear();
                self.swipe_velocity.add_movement(ev.time_ms, ev.x);
                cdebug!(index, "swipe began");
                return GestureOutcome::Swipe(SwipeOutcome::Began { index });
            }
            if dy.abs() > config.touch_slop_px {
                self.phase = GesturePhase::Dragging;
                self.scroll_velocity.clear();
                outcome = GestureOutcome::DisallowIntercept;
            }
        }

        match self.phase {
            GesturePhase::Dragging => {
                let cur_p = layout.screen_y_to_progress(ev.y as i32);
                let delta = self.damped_delta(self.last_p - cur_p, scroller);
                scroller.set_scroll(scroller.scroll() + delta);
                if scroller.is_scroll_out_of_bounds() {
                    self.scroll_velocity.clear();
                } else {
                    self.scroll_velocity.add_movement(
                        ev.time_ms,
                        scroller.progress_to_scroll_range(scroller.scroll()) as f32,
                    );
                }
                if outcome == GestureOutcome::None {
                    outcome = GestureOutcome::Scrolled;
                }
            }
            GesturePhase::Swiping => {
                if let Some(swipe) = &mut self.swipe {
                    swipe.translation_x = ev.x - swipe.start_x;
                    self.swipe_velocity.add_movement(ev.time_ms, ev.x);
                    outcome = GestureOutcome::Swipe(SwipeOutcome::Moved {
                        index: swipe.index,
                        translation_x: swipe.translation_x,
                    });
                }
            }
            GesturePhase::Idle | GesturePhase::PossibleDrag => {}
        }

        self.last_p = layout.screen_y_to_progress(ev.y as i32);
        outcome
    }

    /// Attenuates a drag delta that would push the scroll out of bounds, reaching zero at the
    /// maximum overscroll.
    fn damped_delta(&self, delta: f32, scroller: &StackScroller) -> f32 {
        let amount = scroller.scroll_out_of_bounds_amount(scroller.scroll() + delta);
        if amount == 0.0 {
            return delta;
        }
        let max_over = scroller.config().overscroll_pct;
        if max_over <= 0.0 {
            return 0.0;
        }
        delta * (1.0 - amount.min(max_over) / max_over)
    }

    fn on_pointer_up(&mut self, ev: &PointerEvent, layout: &StackLayout) {
        self.pointers.remove(&ev.pointer);
        if self.active != Some(ev.pointer) {
            return;
        }
        self.active = self.pointers.keys().next().copied();
        if let Some((_, y)) = self.active.and_then(|id| self.pointers.get(&id)) {
            self.last_p = layout.screen_y_to_progress(*y as i32);
        }
        self.scroll_velocity.clear();
        ctrace!(active = ?self.active, "active pointer changed");
    }

    fn on_up(&mut self, ev: &PointerEvent, scroller: &mut StackScroller) -> GestureOutcome {
        let outcome = match self.phase {
            GesturePhase::Idle => GestureOutcome::None,
            GesturePhase::Swiping => self.finish_swipe(scroller),
            GesturePhase::Dragging => {
                let velocity = self
                    .scroll_velocity
                    .velocity(scroller.config().max_fling_velocity);
                if velocity.abs() > scroller.config().min_fling_velocity
                    && scroller.fling(velocity, ev.time_ms)
                {
                    GestureOutcome::FlingStarted
                } else {
                    snap_back(scroller, ev.time_ms)
                }
            }
            GesturePhase::PossibleDrag => snap_back(scroller, ev.time_ms),
        };
        self.reset();
        outcome
    }

    fn on_cancel(&mut self, ev: &PointerEvent, scroller: &mut StackScroller) -> GestureOutcome {
        let outcome = match self.swipe {
            Some(swipe) => GestureOutcome::Swipe(SwipeOutcome::SnappedBack { index: swipe.index }),
            None => snap_back(scroller, ev.time_ms),
        };
        self.reset();
        outcome
    }

    fn finish_swipe(&mut self, scroller: &StackScroller) -> GestureOutcome {
        let Some(swipe) = self.swipe else {
            return GestureOutcome::None;
        };
        let config = scroller.config();
        let velocity_x = self.swipe_velocity.velocity(config.max_fling_velocity);
        let dx = swipe.translation_x;

        let far_enough = dx.abs() > config.swipe_dismiss_fraction * swipe.card_width;
        let fast_enough = velocity_x.abs() > config.swipe_escape_velocity
            && dx != 0.0
            && (velocity_x > 0.0) == (dx > 0.0);

        if far_enough || fast_enough {
            cdebug!(index = swipe.index, dx, velocity_x, "swipe dismissed");
            GestureOutcome::Swipe(SwipeOutcome::Dismissed {
                index: swipe.index,
                velocity_x,
            })
        } else {
            GestureOutcome::Swipe(SwipeOutcome::SnappedBack { index: swipe.index })
        }
    }
}

fn snap_back(scroller: &mut StackScroller, now_ms: u64) -> GestureOutcome {
    if scroller.is_scroll_out_of_bounds() && scroller.animate_bound_scroll(now_ms) {
        GestureOutcome::SnapBack
    } else {
        GestureOutcome::None
    }
}

/// Returns the topmost visible card containing the point.
///
/// Cards further down the stack are drawn over the ones above them, so the highest index wins.
pub fn hit_test(transforms: &[CardTransform], x: i32, y: i32) -> Option<usize> {
    transforms
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| t.visible && t.rect.contains(x, y))
        .map(|(i, _)| i)
}
