/// The valid scroll range of a stack, in progress units.
///
/// `min <= max` always holds. With a single card the range collapses to one point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBounds {
    pub min: f32,
    pub max: f32,
    /// Scroll used when the stack is first shown.
    pub initial: f32,
}

impl ScrollBounds {
    pub fn clamp(&self, scroll: f32) -> f32 {
        scroll.min(self.max).max(self.min)
    }

    /// Absolute distance from `scroll` to the nearest bound, or 0 when in range.
    pub fn out_of_bounds_amount(&self, scroll: f32) -> f32 {
        if scroll < self.min {
            (scroll - self.min).abs()
        } else if scroll > self.max {
            (scroll - self.max).abs()
        } else {
            0.0
        }
    }
}

/// A lightweight, serializable snapshot of the current scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub current: f32,
    pub bounds: ScrollBounds,
    /// A fling or scroll animation is in flight.
    pub is_scrolling: bool,
}

/// The result of advancing the scroller by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    pub scroll: f32,
    /// `true` while a fling or animation still needs frames.
    pub still_scrolling: bool,
}

/// A snapshot of what a stack shows in one frame.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub scroll: ScrollState,
    pub card_count: usize,
    /// Cards with a visible transform, or `None` when nothing is on screen.
    pub visible: Option<crate::CardRange>,
}
