use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

const WIDTH: i32 = 1080;
const HEIGHT: i32 = 1920;

fn layout_with(config: StackConfig, count: usize, width: i32, height: i32) -> StackLayout {
    let bounds = config.stack_bounds(width, height);
    let mut layout = StackLayout::new(config, Arc::new(CurveTable::new()));
    layout.compute_rects(width, height, bounds);
    layout.compute_min_max_scroll(count);
    layout
}

fn layout_for(count: usize) -> StackLayout {
    layout_with(StackConfig::default(), count, WIDTH, HEIGHT)
}

fn scroller_for(layout: &StackLayout) -> StackScroller {
    let mut scroller = StackScroller::new(layout.config().clone());
    scroller.sync_layout(layout);
    scroller.set_scroll_to_initial_state();
    scroller
}

fn ev(kind: PointerKind, x: f32, y: f32, time_ms: u64) -> PointerEvent {
    PointerEvent::new(1, kind, x, y, time_ms)
}

// Curve

#[test]
fn curve_tables_span_unit_interval() {
    let curve = CurveTable::new();
    let n = curve::PRECISION_STEPS;
    assert_eq!(curve.xp().len(), n + 1);
    assert_eq!(curve.px().len(), n + 1);
    assert_eq!(curve.xp()[0], 0.0);
    assert_eq!(curve.px()[0], 0.0);
    assert_eq!(curve.xp()[n], 1.0);
    assert_eq!(curve.px()[n], 1.0);

    for w in curve.px().windows(2) {
        assert!(w[1] > w[0], "px must be strictly increasing");
    }
    for w in curve.xp().windows(2) {
        assert!(w[1] >= w[0], "xp must be non-decreasing");
    }
}

#[test]
fn curve_lookup_is_identity_outside_unit_interval() {
    let curve = CurveTable::new();
    assert_eq!(curve.x_for_progress(-0.25), -0.25);
    assert_eq!(curve.x_for_progress(1.5), 1.5);
    assert_eq!(curve.progress_for_x(-3.0), -3.0);
    assert_eq!(curve.progress_for_x(2.0), 2.0);
}

#[test]
fn curve_front_loads_progress() {
    // The curve is steep near the top, so the first tenth of x covers far more than a tenth
    // of the arc length.
    let curve = CurveTable::new();
    assert!(curve.progress_for_x(0.1) > 0.3);
    assert!(curve.x_for_progress(0.5) < 0.2);
}

#[test]
fn progress_to_scale_endpoints() {
    assert_eq!(curve::progress_to_scale(0.0, 0.8), 0.8);
    assert_eq!(curve::progress_to_scale(1.0, 0.8), 1.0);
    assert_eq!(curve::progress_to_scale(-4.0, 0.8), 0.8);
    assert_eq!(curve::progress_to_scale(7.0, 0.8), 1.0);
    assert_abs_diff_eq!(curve::progress_to_scale(0.5, 0.8), 0.9, epsilon = 1e-6);

    let layout = layout_for(3);
    assert_eq!(layout.progress_to_scale(0.0), 0.8);
    assert_eq!(layout.progress_to_scale(1.0), 1.0);
}

// Rect

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0, 0, 10, 10);
    assert!(r.contains(0, 0));
    assert!(r.contains(9, 9));
    assert!(!r.contains(10, 5));
    assert!(!r.contains(5, 10));
    assert!(!Rect::new(5, 5, 5, 5).contains(5, 5));
}

#[test]
fn rect_inset_collapses_instead_of_inverting() {
    let r = Rect::new(0, 0, 10, 10).inset(8, 2);
    assert_eq!(r, Rect::new(5, 2, 5, 8));
    assert!(r.is_empty());
}

#[test]
fn rect_scale_about_center_rounds_each_edge() {
    let r = Rect::new(0, 0, 100, 200);
    assert_eq!(r.scale_about_center(1.0), r);
    assert_eq!(r.scale_about_center(0.5), Rect::new(26, 51, 75, 150));
}

// Layout

#[test]
fn compute_rects_uses_padding_and_visible_fraction() {
    let layout = layout_for(1);
    assert_eq!(layout.view_rect(), Rect::new(0, 0, WIDTH, HEIGHT));
    assert_eq!(layout.stack_visible_rect(), Rect::new(0, 64, WIDTH, HEIGHT));

    // 4% of 1080 = 43 per side, 16 px top and bottom.
    assert_eq!(layout.stack_rect(), Rect::new(43, 80, 1037, 1904));
    assert_eq!(layout.card_rect(), layout.stack_rect());
    assert_eq!(layout.between_card_offset(), 1824 / 2);
}

#[test]
fn ten_cards_start_at_half_and_strictly_increase() {
    let layout = layout_for(10);
    assert_eq!(layout.card_count(), 10);
    assert_eq!(layout.stack_scroll_for_card(0), Ok(0.5));

    let mut prev = 0.5;
    for i in 1..10 {
        let p = layout.stack_scroll_for_card(i).unwrap();
        assert!(p > prev, "card {i} progress {p} not above {prev}");
        prev = p;
    }
}

#[test]
fn single_card_bounds_collapse() {
    let layout = layout_for(1);
    let bounds = layout.bounds();
    assert_eq!(bounds.min, bounds.max);
    assert!(bounds.min >= 0.0);
    assert_eq!(bounds.initial, 0.5);
}

#[test]
fn many_cards_hide_part_of_the_bottom_card() {
    let layout = layout_for(10);
    let bounds = layout.bounds();
    assert_eq!(bounds.min, 0.0);
    assert!(bounds.max > bounds.min);

    let last = layout.stack_scroll_for_card(9).unwrap();
    assert_eq!(bounds.initial, last);
    // Scrolled to max, the bottom card sits lower than the full-card position by the hidden rate.
    assert!(last - bounds.max > SCROLL_HIDDEN_BOTTOM_RATE);
}

#[test]
fn zero_cards_have_empty_bounds() {
    let layout = layout_for(0);
    assert_eq!(layout.card_count(), 0);
    assert_eq!(layout.bounds(), ScrollBounds::default());
    assert_eq!(
        layout.stack_scroll_for_card(0),
        Err(StackError::UnknownCard { index: 0, count: 0 })
    );
}

#[test]
fn unknown_card_is_an_error() {
    let layout = layout_for(3);
    assert_eq!(
        layout.stack_transform(3, 0.0, None),
        Err(StackError::UnknownCard { index: 3, count: 3 })
    );
    assert!(layout.stack_transform(2, 0.0, None).is_ok());
}

#[test]
fn degenerate_window_does_not_divide_by_zero() {
    let config = StackConfig::default();
    let layout = layout_with(config, 4, 0, 0);
    assert_eq!(layout.stack_visible_rect().height(), 0);
    assert_eq!(layout.screen_y_to_progress(0), 0.0);
    assert_eq!(layout.screen_y_to_progress(10), 1.0);
    let bounds = layout.bounds();
    assert!(bounds.min <= bounds.max);
    assert!(bounds.min.is_finite() && bounds.max.is_finite());
}

#[test]
fn card_below_the_screen_is_reset() {
    let layout = layout_for(3);
    let t = layout.transform_for_progress(1.5, 0.0, None);
    assert!(!t.visible);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.translation_y, 0);
    assert_eq!(t.rect, layout.card_rect());
}

#[test]
fn card_transform_follows_progress() {
    let layout = layout_for(3);
    let card_h = layout.card_rect().height();

    let top = layout.transform_for_progress(0.0, 0.0, None);
    assert!(top.visible);
    assert_eq!(top.scale, 0.8);
    assert_eq!(top.translation_y, -(((1.0 - 0.8f32) * card_h as f32 / 2.0) as i32));
    assert_abs_diff_eq!(top.translation_z, 20.0);

    let mid = layout.transform_for_progress(0.75, 0.25, None);
    assert!(mid.visible);
    assert_abs_diff_eq!(mid.progress, 0.5);
    assert_abs_diff_eq!(mid.scale, 0.9, epsilon = 1e-6);
    assert_abs_diff_eq!(mid.translation_z, 50.0, epsilon = 1e-4);
    assert!(mid.translation_y > top.translation_y);
    assert!(mid.rect.width() > top.rect.width());
}

#[test]
fn only_one_card_peeks_over_the_top() {
    let layout = layout_for(3);
    let peeking_prev = CardTransform {
        progress: 0.1,
        visible: true,
        ..CardTransform::default()
    };
    let t = layout.transform_for_progress(0.2, 0.5, Some(&peeking_prev));
    assert!(t.visible);
    assert_eq!(t.scale, 0.8);
    assert_abs_diff_eq!(t.progress, -0.3, epsilon = 1e-6);

    let hidden_prev = CardTransform {
        progress: -0.1,
        visible: true,
        ..CardTransform::default()
    };
    let t = layout.transform_for_progress(0.2, 0.5, Some(&hidden_prev));
    assert!(!t.visible);
    assert_eq!(t.rect, layout.card_rect());
}

#[test]
fn update_stack_transforms_reports_visible_run() {
    let layout = layout_for(10);
    let scroll = layout.bounds().clamp(layout.bounds().initial);
    let mut transforms = Vec::new();
    let range = layout
        .update_stack_transforms(scroll, &mut transforms)
        .unwrap();

    assert_eq!(transforms.len(), 10);
    assert_eq!(range.end_index, 10);
    assert!(!range.is_empty());
    for (i, t) in transforms.iter().enumerate() {
        assert_eq!(t.visible, range.contains(i), "card {i}");
    }
    let above_top = transforms
        .iter()
        .filter(|t| t.visible && t.progress < 0.0)
        .count();
    assert!(above_top <= 1);

    // Visible cards lower in the stack are drawn lower on screen.
    for i in range.start_index + 1..range.end_index {
        assert!(transforms[i].translation_y >= transforms[i - 1].translation_y);
    }
}

#[test]
fn update_stack_transforms_with_no_cards() {
    let layout = layout_for(0);
    let mut transforms = vec![CardTransform::default(); 4];
    assert_eq!(layout.update_stack_transforms(0.0, &mut transforms), None);
    assert!(transforms.is_empty());
}

// Scroller

#[test]
fn set_scroll_notifies_without_clamping() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_cb = Arc::clone(&calls);
    scroller.set_on_change(Some(move |_scroll: f32| {
        calls_cb.fetch_add(1, Ordering::Relaxed);
    }));

    let rev = scroller.revision();
    scroller.set_scroll(-1.0);
    assert_eq!(scroller.scroll(), -1.0);
    assert_eq!(scroller.revision(), rev + 1);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(scroller.is_scroll_out_of_bounds());
    assert_abs_diff_eq!(scroller.scroll_out_of_bounds_amount(-1.0), 1.0);

    assert!(scroller.bound_scroll());
    assert_eq!(scroller.scroll(), 0.0);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    assert!(!scroller.bound_scroll());
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn batch_update_coalesces_notifications() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_cb = Arc::clone(&calls);
    scroller.set_on_change(Some(move |_scroll: f32| {
        calls_cb.fetch_add(1, Ordering::Relaxed);
    }));

    scroller.batch_update(|s| {
        s.set_scroll(0.2);
        s.set_scroll(0.3);
        s.batch_update(|s| s.set_scroll(0.4));
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(scroller.scroll(), 0.4);

    scroller.batch_update(|_| {});
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn initial_state_is_bounded() {
    let layout = layout_for(10);
    let scroller = scroller_for(&layout);
    assert_eq!(scroller.scroll(), layout.bounds().max);
    assert!(!scroller.is_scroll_out_of_bounds());
}

#[test]
fn bound_scroll_animation_lands_on_the_bound() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    let max = layout.bounds().max;
    scroller.set_scroll(max + 0.05);

    assert!(scroller.animate_bound_scroll(1_000));
    assert!(scroller.is_animating());
    assert_eq!(scroller.animation_target(), Some(max));

    let step = scroller.advance_frame(1_100);
    assert!(step.still_scrolling);
    assert!(step.scroll < max + 0.05 && step.scroll > max);

    let step = scroller.advance_frame(1_200);
    assert!(!step.still_scrolling);
    assert_eq!(step.scroll, max);
    assert!(!scroller.is_animating());
}

#[test]
fn zero_distance_animation_starts_nothing() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    let s = scroller.scroll();
    assert!(!scroller.animate_scroll(s, s, 0));
    assert!(!scroller.is_animating());
    assert!(!scroller.animate_bound_scroll(0));
}

#[test]
fn slow_fling_never_starts() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    assert!(!scroller.fling(10.0, 0));
    assert!(!scroller.fling(-50.0, 0));
    assert!(!scroller.is_scrolling());
    assert!(!scroller.advance_frame(16).still_scrolling);
}

#[test]
fn fling_coasts_and_stops_inside_bounds() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    scroller.set_scroll(1.0);

    assert!(scroller.fling(3_000.0, 0));
    assert!(scroller.is_scrolling());
    let step = scroller.advance_frame(100);
    assert!(step.still_scrolling);
    assert!(step.scroll > 1.0);

    let step = scroller.advance_frame(10_000);
    assert!(!step.still_scrolling);
    assert!(!scroller.is_scrolling());
    assert_eq!(scroller.bounded_scroll(step.scroll), step.scroll);
}

#[test]
fn fling_past_max_springs_back() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    let max = layout.bounds().max;
    scroller.set_scroll(max - 0.1);

    assert!(scroller.fling(8_000.0, 0));
    scroller.advance_frame(1_000);
    assert!(scroller.is_scrolling());
    assert!(scroller.scroll() > max);

    let step = scroller.advance_frame(1_300);
    assert!(!step.still_scrolling);
    let height = layout.stack_visible_rect().height() as f32;
    assert_abs_diff_eq!(step.scroll, max, epsilon = 1.0 / height);
}

#[test]
fn starting_an_animation_cancels_the_fling() {
    let layout = layout_for(10);
    let mut scroller = scroller_for(&layout);
    scroller.set_scroll(1.0);
    assert!(scroller.fling(3_000.0, 0));
    assert!(scroller.animate_scroll(1.0, 0.5, 10));
    assert!(!scroller.is_scrolling());
    assert!(scroller.is_animating());

    assert!(scroller.fling(-3_000.0, 20));
    assert!(!scroller.is_animating());
}

#[test]
fn scroll_range_conversion_guards_zero_height() {
    let layout = layout_with(StackConfig::default(), 3, 0, 0);
    let mut scroller = StackScroller::new(StackConfig::default());
    scroller.sync_layout(&layout);
    assert_eq!(scroller.progress_to_scroll_range(0.5), 0);
    assert_eq!(scroller.scroll_range_to_progress(100.0), 0.0);
}

// Fling physics

#[test]
fn unbounded_fling_stops_near_projected_end() {
    let mut fling = Fling::new(0.0, 2_000.0, 0, 0.998, (0.0, 100_000.0), 0.0, 250);
    let mut last = 0.0;
    for t in (16..2_000).step_by(16) {
        let (pos, running) = fling.advance(t);
        assert!(running);
        assert!(pos >= last);
        last = pos;
    }
    let (pos, running) = fling.advance(6_000);
    assert!(!running);
    assert!(fling.is_finished());
    assert!((fling.projected_end() - pos).abs() <= 5.5);
}

#[test]
fn fling_overshoot_is_capped_and_returns() {
    let mut fling = Fling::new(0.0, 2_000.0, 0, 0.998, (0.0, 100.0), 50.0, 250);
    let (pos, running) = fling.advance(1_000);
    assert!(running);
    assert_eq!(pos, 150.0);
    assert_eq!(fling.velocity_at(1_000), 0.0);

    let (pos, running) = fling.advance(1_300);
    assert!(!running);
    assert_eq!(pos, 100.0);
}

// Tween

#[test]
fn tween_hits_endpoints() {
    let tween = Tween::new(1.0, 3.0, 100, 200, Easing::AccelerateDecelerate);
    assert_abs_diff_eq!(tween.sample(100), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(tween.sample(200), 2.0, epsilon = 1e-5);
    assert_eq!(tween.sample(300), 3.0);
    assert!(tween.is_done(300));
    assert!(!tween.is_done(299));

    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::AccelerateDecelerate,
        Easing::Decelerate,
    ] {
        assert_abs_diff_eq!(easing.sample(0.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(easing.sample(1.0), 1.0, epsilon = 1e-6);
    }
}

// Velocity

#[test]
fn velocity_of_constant_motion() {
    let mut tracker = VelocityTracker::new();
    for i in 0..6u64 {
        tracker.add_movement(i * 10, i as f32 * 20.0);
    }
    assert_abs_diff_eq!(tracker.velocity(10_000.0), 2_000.0, epsilon = 0.5);
    assert_eq!(tracker.velocity(500.0), 500.0);

    tracker.clear();
    assert!(tracker.is_empty());
    tracker.add_movement(0, 0.0);
    assert_eq!(tracker.velocity(10_000.0), 0.0);
}

#[test]
fn velocity_ignores_samples_before_a_pause() {
    let mut tracker = VelocityTracker::new();
    tracker.add_movement(0, 0.0);
    tracker.add_movement(10, 100.0);
    tracker.add_movement(200, 100.0);
    assert_eq!(tracker.velocity(10_000.0), 0.0);
}

// Model

#[test]
fn remove_reindexes_later_cards() {
    let mut stack: CardStack<&str> = ["a", "b", "c", "d"].into_iter().collect();
    assert_eq!(stack.remove_at(1), Ok("b"));
    assert_eq!(stack.as_slice(), &["a", "c", "d"]);
    assert_eq!(stack.get(1), Some(&"c"));
    assert_eq!(stack.get(2), Some(&"d"));
}

#[test]
fn out_of_range_mutations_leave_the_stack_alone() {
    let mut stack = CardStack::new();
    assert_eq!(stack.append(1), 0);
    assert_eq!(stack.append(2), 1);

    assert_eq!(
        stack.remove_at(2),
        Err(StackError::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(
        stack.insert_at(3, 9),
        Err(StackError::IndexOutOfBounds { index: 3, len: 2 })
    );
    assert_eq!(
        stack.replace_at(5, 9),
        Err(StackError::IndexOutOfBounds { index: 5, len: 2 })
    );
    assert_eq!(stack.as_slice(), &[1, 2]);

    assert_eq!(stack.insert_at(2, 3), Ok(()));
    assert_eq!(stack.replace_at(0, 0), Ok(1));
    assert_eq!(stack.as_slice(), &[0, 2, 3]);
}

#[test]
fn stack_error_messages() {
    let err = StackError::IndexOutOfBounds { index: 4, len: 2 };
    assert_eq!(
        err.to_string(),
        "position 4 is out of bounds for a stack of 2 cards"
    );
}

// Gestures

struct GestureRig {
    layout: StackLayout,
    scroller: StackScroller,
    transforms: Vec<CardTransform>,
    gesture: GestureController,
}

impl GestureRig {
    fn new(count: usize) -> Self {
        let layout = layout_for(count);
        let scroller = scroller_for(&layout);
        Self {
            layout,
            scroller,
            transforms: Vec::new(),
            gesture: GestureController::new(),
        }
    }

    fn feed(&mut self, ev: PointerEvent) -> GestureOutcome {
        self.gesture
            .on_pointer_event(&ev, &self.layout, &mut self.scroller, &self.transforms)
    }
}

#[test]
fn press_on_empty_stack_is_ignored() {
    let mut rig = GestureRig::new(0);
    let out = rig.feed(ev(PointerKind::Down, 10.0, 10.0, 0));
    assert_eq!(out, GestureOutcome::None);
    assert_eq!(rig.gesture.phase(), GesturePhase::Idle);
}

#[test]
fn vertical_drag_scrolls() {
    let mut rig = GestureRig::new(10);
    rig.scroller.set_scroll(1.0);

    rig.feed(ev(PointerKind::Down, 500.0, 1000.0, 0));
    assert_eq!(rig.gesture.phase(), GesturePhase::PossibleDrag);

    // Within the touch slop nothing moves.
    let out = rig.feed(ev(PointerKind::Move, 500.0, 995.0, 8));
    assert_eq!(out, GestureOutcome::None);
    assert_eq!(rig.scroller.scroll(), 1.0);

    let out = rig.feed(ev(PointerKind::Move, 500.0, 980.0, 16));
    assert_eq!(out, GestureOutcome::DisallowIntercept);
    assert_eq!(rig.gesture.phase(), GesturePhase::Dragging);
    assert!(
        rig.scroller.scroll() > 1.0,
        "dragging up scrolls further down the stack"
    );

    let before = rig.scroller.scroll();
    let out = rig.feed(ev(PointerKind::Move, 500.0, 1100.0, 32));
    assert_eq!(out, GestureOutcome::Scrolled);
    assert!(rig.scroller.scroll() < before);
}

fn drag_delta(start_scroll: f32) -> f32 {
    let mut rig = GestureRig::new(10);
    rig.scroller.set_scroll(start_scroll);
    rig.feed(ev(PointerKind::Down, 500.0, 1000.0, 0));
    rig.feed(ev(PointerKind::Move, 500.0, 980.0, 16));
    rig.scroller.scroll() - start_scroll
}

#[test]
fn overscroll_drag_is_damped() {
    let max = layout_for(10).bounds().max;
    let overscroll = StackConfig::default().overscroll_pct;

    let within = drag_delta(1.0);
    let beyond = drag_delta(max + overscroll / 8.0);
    assert!(within > 0.0);
    assert!(beyond > 0.0);
    assert!(beyond < within, "damped {beyond} should be below {within}");
}

#[test]
fn release_out_of_bounds_snaps_back() {
    let mut rig = GestureRig::new(10);
    let max = rig.layout.bounds().max;
    rig.scroller.set_scroll(max + 0.01);

    rig.feed(ev(PointerKind::Down, 500.0, 1000.0, 0));
    rig.feed(ev(PointerKind::Move, 500.0, 960.0, 10));
    rig.feed(ev(PointerKind::Move, 500.0, 920.0, 20));
    assert!(rig.scroller.is_scroll_out_of_bounds());

    let out = rig.feed(ev(PointerKind::Up, 500.0, 920.0, 30));
    assert_eq!(out, GestureOutcome::SnapBack);
    assert!(!rig.scroller.is_scrolling());
    assert_eq!(rig.scroller.animation_target(), Some(max));
    assert_eq!(rig.gesture.phase(), GesturePhase::Idle);
}

#[test]
fn fast_release_flings() {
    let mut rig = GestureRig::new(10);
    rig.scroller.set_scroll(1.0);

    rig.feed(ev(PointerKind::Down, 500.0, 1500.0, 0));
    for i in 1..=5u64 {
        let y = 1500.0 - 40.0 * i as f32;
        rig.feed(ev(PointerKind::Move, 500.0, y, i * 10));
    }
    let out = rig.feed(ev(PointerKind::Up, 500.0, 1300.0, 55));
    assert_eq!(out, GestureOutcome::FlingStarted);
    assert!(rig.scroller.is_scrolling());
}

#[test]
fn slow_release_does_not_fling() {
    let mut rig = GestureRig::new(10);
    rig.scroller.set_scroll(1.0);

    rig.feed(ev(PointerKind::Down, 500.0, 1500.0, 0));
    for i in 1..=3u64 {
        let y = 1500.0 - 20.0 * i as f32;
        rig.feed(ev(PointerKind::Move, 500.0, y, i * 200));
    }
    let out = rig.feed(ev(PointerKind::Up, 500.0, 1440.0, 900));
    assert_eq!(out, GestureOutcome::None);
    assert!(!rig.scroller.is_scrolling());
    assert!(!rig.scroller.is_animating());
}

/// Three cards with transforms; returns the front card and the center of its rect.
fn swipe_setup() -> (GestureRig, usize, (f32, f32)) {
    let mut rig = GestureRig::new(3);
    let range = rig
        .layout
        .update_stack_transforms(rig.scroller.scroll(), &mut rig.transforms)
        .unwrap();
    let index = range.end_index - 1;
    let rect = rig.transforms[index].rect;
    let point = (rect.center_x() as f32, rect.center_y() as f32);
    assert_eq!(
        hit_test(&rig.transforms, point.0 as i32, point.1 as i32),
        Some(index)
    );
    (rig, index, point)
}

#[test]
fn far_swipe_dismisses_the_card() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    let out = rig.feed(ev(PointerKind::Move, x + 100.0, y + 5.0, 10));
    assert_eq!(out, GestureOutcome::Swipe(SwipeOutcome::Began { index }));
    assert_eq!(rig.gesture.phase(), GesturePhase::Swiping);

    let out = rig.feed(ev(PointerKind::Move, x + 600.0, y, 200));
    assert_eq!(
        out,
        GestureOutcome::Swipe(SwipeOutcome::Moved {
            index,
            translation_x: 500.0
        })
    );
    assert_eq!(rig.gesture.swipe_translation(), Some((index, 500.0)));

    let out = rig.feed(ev(PointerKind::Up, x + 600.0, y, 400));
    assert!(matches!(
        out,
        GestureOutcome::Swipe(SwipeOutcome::Dismissed { index: i, .. }) if i == index
    ));
    assert_eq!(rig.gesture.swipe_translation(), None);
}

#[test]
fn short_slow_swipe_snaps_back() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.feed(ev(PointerKind::Move, x + 20.0, y, 100));
    rig.feed(ev(PointerKind::Move, x + 40.0, y, 300));
    let out = rig.feed(ev(PointerKind::Up, x + 40.0, y, 500));
    assert_eq!(out, GestureOutcome::Swipe(SwipeOutcome::SnappedBack { index }));
}

#[test]
fn cancel_snaps_a_swipe_back() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.feed(ev(PointerKind::Move, x - 300.0, y, 10));
    let out = rig.feed(ev(PointerKind::Cancel, x - 300.0, y, 20));
    assert_eq!(out, GestureOutcome::Swipe(SwipeOutcome::SnappedBack { index }));
    assert_eq!(rig.gesture.phase(), GesturePhase::Idle);
}

#[test]
fn vertical_move_on_a_card_scrolls_instead_of_swiping() {
    let (mut rig, _index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    let out = rig.feed(ev(PointerKind::Move, x + 10.0, y - 40.0, 10));
    assert_eq!(out, GestureOutcome::DisallowIntercept);
    assert_eq!(rig.gesture.phase(), GesturePhase::Dragging);
}

#[test]
fn swiped_index_follows_removals_before_it() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.feed(ev(PointerKind::Move, x + 100.0, y, 10));
    rig.gesture.on_card_removed(0);
    assert_eq!(rig.gesture.swipe_translation(), Some((index - 1, 0.0)));

    // Removals after the swiped card leave it alone.
    rig.gesture.on_card_removed(index);
    assert_eq!(rig.gesture.phase(), GesturePhase::Swiping);

    rig.feed(ev(PointerKind::Move, x + 600.0, y, 200));
    let out = rig.feed(ev(PointerKind::Up, x + 600.0, y, 400));
    assert!(matches!(
        out,
        GestureOutcome::Swipe(SwipeOutcome::Dismissed { index: i, .. }) if i == index - 1
    ));
}

#[test]
fn pressed_index_follows_insertions() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.gesture.on_card_inserted(index + 1);
    rig.gesture.on_card_inserted(0);
    let out = rig.feed(ev(PointerKind::Move, x + 100.0, y, 10));
    assert_eq!(
        out,
        GestureOutcome::Swipe(SwipeOutcome::Began { index: index + 1 })
    );
}

#[test]
fn removing_the_swiped_card_drops_the_gesture() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.feed(ev(PointerKind::Move, x + 100.0, y, 10));
    rig.gesture.on_card_removed(index);
    assert_eq!(rig.gesture.phase(), GesturePhase::Idle);
    assert_eq!(rig.gesture.swipe_translation(), None);

    let out = rig.feed(ev(PointerKind::Up, x + 600.0, y, 400));
    assert_eq!(out, GestureOutcome::None);
}

#[test]
fn removing_the_pressed_card_before_a_swipe_falls_back_to_scrolling() {
    let (mut rig, index, (x, y)) = swipe_setup();

    rig.feed(ev(PointerKind::Down, x, y, 0));
    rig.gesture.on_card_removed(index);
    assert_eq!(rig.gesture.phase(), GesturePhase::PossibleDrag);
    let out = rig.feed(ev(PointerKind::Move, x + 100.0, y, 10));
    assert_eq!(out, GestureOutcome::None);
}

#[test]
fn lifting_the_active_pointer_hands_over() {
    let mut rig = GestureRig::new(10);
    let ev = PointerEvent::new;

    rig.feed(ev(1, PointerKind::Down, 500.0, 1000.0, 0));
    rig.feed(ev(2, PointerKind::PointerDown, 500.0, 1200.0, 5));
    assert_eq!(rig.gesture.active_pointer(), Some(2));

    // Moves of the inactive pointer are ignored.
    let out = rig.feed(ev(1, PointerKind::Move, 500.0, 600.0, 10));
    assert_eq!(out, GestureOutcome::None);

    rig.feed(ev(2, PointerKind::PointerUp, 500.0, 1200.0, 15));
    assert_eq!(rig.gesture.active_pointer(), Some(1));

    rig.feed(ev(7, PointerKind::PointerUp, 0.0, 0.0, 16));
    assert_eq!(rig.gesture.active_pointer(), Some(1));
}

// Config

#[test]
fn config_builders_and_density() {
    let config = StackConfig::new()
        .with_stack_top_inset(10)
        .with_fling_velocity(1.0, 2.0)
        .with_density(2.0);
    assert_eq!(config.stack_top_inset_px, 20);
    assert_eq!(config.top_padding_px, 32);
    assert_eq!(config.min_fling_velocity, 2.0);
    assert_eq!(config.max_fling_velocity, 4.0);
    assert_eq!(config.stack_bounds(100, 15), Rect::new(0, 15, 100, 15));
}

proptest! {
    #[test]
    fn scale_is_monotonic(a in -1.0f32..2.0, b in -1.0f32..2.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(curve::progress_to_scale(lo, 0.8) <= curve::progress_to_scale(hi, 0.8));
    }

    #[test]
    fn curve_round_trip(p in 0.0f32..=1.0) {
        let curve = CurveTable::new();
        let back = curve.progress_for_x(curve.x_for_progress(p));
        prop_assert!((back - p).abs() <= 1.0 / curve::PRECISION_STEPS as f32);
    }

    #[test]
    fn screen_round_trip(p in 0.0f32..=1.0) {
        let layout = layout_with(StackConfig::default(), 1, 1440, 4000);
        let back = layout.screen_y_to_progress(layout.progress_to_screen_y(p));
        prop_assert!((back - p).abs() <= 1.0 / curve::PRECISION_STEPS as f32);
    }

    #[test]
    fn bounds_are_ordered(
        count in 1usize..48,
        width in 1i32..2400,
        height in 1i32..3200,
    ) {
        let layout = layout_with(StackConfig::default(), count, width, height);
        let bounds = layout.bounds();
        prop_assert!(bounds.min <= bounds.max);
        prop_assert!(bounds.initial >= 0.0);
        if count == 1 {
            prop_assert_eq!(bounds.min, bounds.max);
        }
    }
}
