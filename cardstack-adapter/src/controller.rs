use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use cardstack::{
    CardRange, CardStack, CardTransform, CurveTable, FrameState, GestureController,
    GestureOutcome, PointerEvent, StackConfig, StackLayout, StackScroller, SwipeOutcome,
};

use crate::{CardPool, HandleId, StackEvent};

/// One card on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleCard {
    pub index: usize,
    pub handle: HandleId,
    pub transform: CardTransform,
    /// Set for cards that were just bound while the stack animates: the transform to animate
    /// from (the top or the bottom of the stack).
    pub enter_from: Option<CardTransform>,
}

/// A framework-neutral controller that owns a card stack and everything needed to show it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_window_size` when the window is laid out
/// - `on_pointer_event` for every pointer event over the stack
/// - `tick(now_ms)` each frame, then apply the returned cards and `drain_events()`
#[derive(Debug)]
pub struct StackController<M> {
    cards: CardStack<M>,
    layout: StackLayout,
    scroller: StackScroller,
    gesture: GestureController,
    pool: CardPool,

    transforms: Vec<CardTransform>,
    visible: Vec<VisibleCard>,
    visible_range: Option<CardRange>,
    events: VecDeque<StackEvent>,

    awaiting_first_layout: bool,
    dirty: bool,
    synced_revision: u64,
    /// Card targeted by the running scroll-to animation.
    scroll_to: Option<usize>,
    /// Animation duration for the next sync; newly bound cards get an `enter_from` transform.
    pending_animation_ms: u64,
    last_animation_ms: u64,
}

impl<M> StackController<M> {
    pub fn new(config: StackConfig, curve: Arc<CurveTable>) -> Self {
        Self::from_cards(config, curve, CardStack::new())
    }

    pub fn from_cards(config: StackConfig, curve: Arc<CurveTable>, cards: CardStack<M>) -> Self {
        Self {
            cards,
            scroller: StackScroller::new(config.clone()),
            layout: StackLayout::new(config, curve),
            gesture: GestureController::new(),
            pool: CardPool::new(),
            transforms: Vec::new(),
            visible: Vec::new(),
            visible_range: None,
            events: VecDeque::new(),
            awaiting_first_layout: true,
            dirty: true,
            synced_revision: 0,
            scroll_to: None,
            pending_animation_ms: 0,
            last_animation_ms: 0,
        }
    }

    pub fn cards(&self) -> &CardStack<M> {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn config(&self) -> &StackConfig {
        self.layout.config()
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn scroller(&self) -> &StackScroller {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut StackScroller {
        &mut self.scroller
    }

    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    pub fn scroll(&self) -> f32 {
        self.scroller.scroll()
    }

    /// Lays the stack out for a window of `width × height`.
    ///
    /// The first layout scrolls to the initial state (the last card). Later layouts keep the
    /// scroll and only pull it back into the new bounds.
    pub fn on_window_size(&mut self, width: i32, height: i32, now_ms: u64) {
        let bounds = self.layout.config().stack_bounds(width, height);
        self.layout.compute_rects(width, height, bounds);
        self.layout.compute_min_max_scroll(self.cards.len());
        self.scroller.sync_layout(&self.layout);

        if self.awaiting_first_layout {
            self.awaiting_first_layout = false;
            self.scroller.set_scroll_to_initial_state();
        } else if self.scroller.is_scrolling() || self.scroller.is_animating() {
            self.scroller.stop_scroller();
            self.scroller.stop_bound_scroll_animation();
            self.scroll_to = None;
            if !self.scroller.animate_bound_scroll(now_ms) {
                self.scroller.bound_scroll();
            }
        } else {
            self.scroller.bound_scroll();
        }
        self.dirty = true;
        atrace!(width, height, scroll = self.scroller.scroll(), "on_window_size");
    }

    pub fn set_config(&mut self, config: StackConfig) {
        self.scroller.set_config(config.clone());
        self.layout.set_config(config);
        self.dirty = true;
    }

    fn update_min_max_scroll(&mut self, bound_scroll: bool) {
        self.layout.compute_min_max_scroll(self.cards.len());
        self.scroller.sync_layout(&self.layout);
        if bound_scroll {
            self.scroller.bound_scroll();
        }
        self.dirty = true;
    }

    /// Appends a card and animates to it. Returns its position.
    pub fn append(&mut self, card: M, now_ms: u64) -> usize {
        let index = self.cards.append(card);
        self.update_min_max_scroll(false);
        self.animate_scroll_to(index, now_ms);
        index
    }

    /// Inserts a card at `index`; cards at or after it move one position down the stack.
    pub fn insert_at(&mut self, index: usize, card: M) -> cardstack::Result<()> {
        self.cards.insert_at(index, card)?;
        self.gesture.on_card_inserted(index);
        let moved = self.pool.insert_index(index);
        self.push_rebinds(&moved);
        self.update_min_max_scroll(true);
        Ok(())
    }

    /// Removes the card at `index` and returns it.
    ///
    /// Queues one [`StackEvent::CardDismissed`], plus [`StackEvent::AllCardsDismissed`] when this
    /// was the last card.
    pub fn remove_at(&mut self, index: usize) -> cardstack::Result<M> {
        let card = self.cards.remove_at(index)?;
        self.events.push_back(StackEvent::CardDismissed { index });
        self.gesture.on_card_removed(index);

        let (released, moved) = self.pool.remove_index(index);
        if let Some(handle) = released {
            self.events
                .push_back(StackEvent::CardUnbound { index, handle });
        }
        self.push_rebinds(&moved);

        if self.scroll_to.is_some_and(|i| i >= self.cards.len()) {
            self.scroll_to = None;
        }
        self.update_min_max_scroll(true);
        self.pending_animation_ms = self.layout.config().scroll_duration_ms;

        if self.cards.is_empty() {
            self.events.push_back(StackEvent::AllCardsDismissed);
        }
        adebug!(index, remaining = self.cards.len(), "card removed");
        Ok(card)
    }

    /// Replaces the card at `index` in place and returns the old one. A bound handle is rebound.
    pub fn replace_at(&mut self, index: usize, card: M) -> cardstack::Result<M> {
        let old = self.cards.replace_at(index, card)?;
        if let Some(handle) = self.pool.handle_for(index) {
            self.events
                .push_back(StackEvent::CardBound { index, handle });
        }
        Ok(old)
    }

    fn push_rebinds(&mut self, moved: &[(usize, HandleId)]) {
        self.events.extend(
            moved
                .iter()
                .map(|&(index, handle)| StackEvent::CardBound { index, handle }),
        );
    }

    /// Animates the scroll so that card `index` is in view. The index is clamped to the stack.
    ///
    /// The last card scrolls to the maximum scroll; any other card to half a screen above its
    /// own progress. Returns `false` when there is nothing to do (empty stack, or already there).
    pub fn animate_scroll_to(&mut self, index: usize, now_ms: u64) -> bool {
        let Some(max_index) = self.cards.len().checked_sub(1) else {
            return false;
        };
        let index = index.min(max_index);

        let target = if index == max_index {
            self.scroller.bounds().max
        } else {
            match self.layout.stack_scroll_for_card(index) {
                Ok(p) => p - 0.5,
                Err(_err) => {
                    awarn!(index, error = %_err, "animate_scroll_to before layout");
                    return false;
                }
            }
        };

        let from = self.scroller.scroll();
        if !self.scroller.animate_scroll(from, target, now_ms) {
            return false;
        }
        self.scroll_to = Some(index);
        self.events.push_back(StackEvent::ScrollToStarted { index });
        atrace!(index, from, target, "animate_scroll_to");
        true
    }

    /// Feeds one pointer event to the gesture controller. A dismissing swipe removes the card.
    pub fn on_pointer_event(&mut self, ev: &PointerEvent) -> GestureOutcome {
        self.synchronize();
        let outcome = self.gesture.on_pointer_event(
            ev,
            &self.layout,
            &mut self.scroller,
            &self.transforms,
        );

        if let GestureOutcome::Swipe(SwipeOutcome::Dismissed { index, .. }) = outcome {
            if let Err(_err) = self.remove_at(index) {
                awarn!(index, error = %_err, "dismissed card vanished");
            }
        }

        // A press stops any scroll-to animation.
        if self.scroll_to.is_some() && !self.scroller.is_animating() {
            self.scroll_to = None;
        }
        outcome
    }

    /// Horizontal translation of the card being swiped, if any.
    pub fn swipe_translation(&self) -> Option<(usize, f32)> {
        self.gesture.swipe_translation()
    }

    /// Advances animations to `now_ms` and returns the cards to draw.
    pub fn tick(&mut self, now_ms: u64) -> &[VisibleCard] {
        self.scroller.advance_frame(now_ms);
        if !self.scroller.is_animating() {
            if let Some(index) = self.scroll_to.take() {
                self.events.push_back(StackEvent::ScrollToFinished { index });
            }
        }
        self.synchronize();
        &self.visible
    }

    /// Whether a fling or scroll animation still needs frames.
    pub fn is_animating(&self) -> bool {
        self.scroller.is_scrolling() || self.scroller.is_animating()
    }

    /// Recomputes transforms and handle bindings if the scroll or the cards changed since the
    /// last call.
    pub fn synchronize(&mut self) {
        let revision = self.scroller.revision();
        if !self.dirty && revision == self.synced_revision {
            return;
        }
        self.dirty = false;
        self.synced_revision = revision;

        let range = self
            .layout
            .update_stack_transforms(self.scroller.scroll(), &mut self.transforms);
        self.visible_range = range;

        let stale: Vec<usize> = self
            .pool
            .bound()
            .map(|(i, _)| i)
            .filter(|&i| !range.is_some_and(|r| r.contains(i)))
            .collect();
        for index in stale {
            if let Some(handle) = self.pool.release(index) {
                self.events
                    .push_back(StackEvent::CardUnbound { index, handle });
            }
        }

        let animation_ms = core::mem::take(&mut self.pending_animation_ms);
        self.last_animation_ms = animation_ms;
        self.visible.clear();

        let Some(range) = range else {
            return;
        };
        // Front-most first, so it gets the preferred handle when several cards enter at once.
        for index in (range.start_index..range.end_index).rev() {
            let transform = self.transforms[index];
            let (handle, newly_bound) = match self.pool.handle_for(index) {
                Some(handle) => (handle, false),
                None => {
                    let (handle, _created) = self.pool.acquire(index);
                    self.events
                        .push_back(StackEvent::CardBound { index, handle });
                    (handle, true)
                }
            };
            let enter_from = (newly_bound && animation_ms > 0).then(|| {
                let p = if transform.progress <= 0.0 { 0.0 } else { 1.0 };
                self.layout.transform_for_progress(p, 0.0, None)
            });
            self.visible.push(VisibleCard {
                index,
                handle,
                transform,
                enter_from,
            });
        }
        self.visible.reverse();
    }

    /// Cards drawn in the last sync, in index order.
    pub fn visible_cards(&self) -> &[VisibleCard] {
        &self.visible
    }

    pub fn visible_range(&self) -> Option<CardRange> {
        self.visible_range
    }

    /// Current transforms of every card, indexed by position.
    pub fn transforms(&self) -> &[CardTransform] {
        &self.transforms
    }

    /// Animation duration the last sync asked for, or 0 for an immediate update.
    pub fn last_animation_ms(&self) -> u64 {
        self.last_animation_ms
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = StackEvent> + '_ {
        self.events.drain(..)
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            scroll: self.scroller.scroll_state(),
            card_count: self.cards.len(),
            visible: self.visible_range,
        }
    }
}
