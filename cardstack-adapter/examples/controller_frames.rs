use std::sync::Arc;

use cardstack::{CardStack, CurveTable, PointerEvent, PointerKind, StackConfig};
use cardstack_adapter::StackController;

fn main() {
    // Example: a frame-driven controller without any UI objects.
    //
    // A host would:
    // - forward window sizes and pointer events
    // - call tick(now_ms) in its frame loop and place each returned card by its handle
    // - react to drained events (fill bound handles, close when everything is dismissed)
    let cards: CardStack<String> = (0..6).map(|i| format!("card {i}")).collect();
    let mut c = StackController::from_cards(
        StackConfig::default(),
        Arc::new(CurveTable::new()),
        cards,
    );
    c.on_window_size(1080, 1920, 0);

    let mut now_ms = 0u64;
    for v in c.tick(now_ms) {
        println!("#{} handle={:?} rect={:?}", v.index, v.handle, v.transform.rect);
    }

    // Swipe the front card away.
    let front = c.visible_cards().last().copied();
    if let Some(front) = front {
        let x = front.transform.rect.center_x() as f32;
        let y = front.transform.rect.center_y() as f32;
        for (kind, dx, dt) in [
            (PointerKind::Down, 0.0, 0),
            (PointerKind::Move, 60.0, 16),
            (PointerKind::Move, 700.0, 32),
            (PointerKind::Up, 700.0, 48),
        ] {
            now_ms += dt;
            let outcome = c.on_pointer_event(&PointerEvent::new(0, kind, x + dx, y, now_ms));
            println!("{kind:?} -> {outcome:?}");
        }
    }

    c.animate_scroll_to(0, now_ms);
    loop {
        now_ms += 16;
        c.tick(now_ms);
        if !c.is_animating() {
            break;
        }
    }

    for event in c.drain_events() {
        println!("event: {event:?}");
    }
    println!("done: t={now_ms} state={:?}", c.frame_state());
}
