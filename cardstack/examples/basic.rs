// Example: lay out a stack, print the visible transforms, then fling it.
use std::sync::Arc;

use cardstack::{CurveTable, StackConfig, StackLayout, StackScroller};

fn main() {
    let config = StackConfig::default();
    let mut layout = StackLayout::new(config.clone(), Arc::new(CurveTable::new()));
    layout.compute_rects(1080, 1920, config.stack_bounds(1080, 1920));
    layout.compute_min_max_scroll(12);

    let mut scroller = StackScroller::new(config);
    scroller.sync_layout(&layout);
    scroller.set_scroll_to_initial_state();
    println!("bounds={:?}", layout.bounds());

    let mut transforms = Vec::new();
    let range = layout.update_stack_transforms(scroller.scroll(), &mut transforms);
    println!("visible_range={range:?}");
    for (i, t) in transforms.iter().enumerate().filter(|(_, t)| t.visible) {
        println!(
            "card {i}: p={:.3} scale={:.3} y={} z={:.1}",
            t.progress, t.scale, t.translation_y, t.translation_z
        );
    }

    scroller.fling(-4_000.0, 0);
    let mut now_ms = 0u64;
    loop {
        now_ms += 16;
        let step = scroller.advance_frame(now_ms);
        if now_ms % 160 == 0 {
            println!("t={now_ms} scroll={:.3}", step.scroll);
        }
        if !step.still_scrolling {
            break;
        }
    }
    println!("done: t={now_ms} scroll={:.3}", scroller.scroll());
}
