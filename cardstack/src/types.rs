/// Axis-aligned integer bounds in window pixels.
///
/// Edges are half-open in the same sense as platform hit rects: a point on `right` or `bottom`
/// is outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) >> 1
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) >> 1
    }

    /// Shrinks all four edges; `dx` applies to left/right and `dy` to top/bottom.
    ///
    /// The result never inverts: an inset larger than half the size collapses the rect onto its
    /// center line.
    pub fn inset(&self, dx: i32, dy: i32) -> Self {
        let mut r = Self::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        );
        if r.right < r.left {
            let c = self.center_x();
            r.left = c;
            r.right = c;
        }
        if r.bottom < r.top {
            let c = self.center_y();
            r.top = c;
            r.bottom = c;
        }
        r
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Scales the rect about its center, rounding each edge to the nearest pixel.
    pub fn scale_about_center(&self, scale: f32) -> Self {
        if scale == 1.0 {
            return *self;
        }
        let cx = self.center_x();
        let cy = self.center_y();
        let edge = |v: i32| (v as f32 * scale + 0.5) as i32;
        Self::new(
            edge(self.left - cx) + cx,
            edge(self.top - cy) + cy,
            edge(self.right - cx) + cx,
            edge(self.bottom - cy) + cy,
        )
    }
}

/// The per-card output of the layout: everything a renderer needs to place one card.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTransform {
    /// Uniform scale, `min_scale..=1.0`.
    pub scale: f32,
    /// Vertical offset of the card rect from the top of the visible stack, in pixels.
    pub translation_y: i32,
    /// Depth in pixels; grows with progress so the frontmost visible card reads as nearest.
    pub translation_z: f32,
    /// Card bounds after translation and scale.
    pub rect: Rect,
    pub visible: bool,
    /// Progress relative to the current scroll. `< 0` or `> 1` means the card is off-screen.
    pub progress: f32,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation_y: 0,
            translation_z: 0.0,
            rect: Rect::default(),
            visible: false,
            progress: 0.0,
        }
    }
}

impl CardTransform {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A range of card indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl CardRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}

/// Identifies one pointer (finger, stylus, mouse) across events.
pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// First pointer went down; starts a gesture.
    Down,
    Move,
    /// Last pointer went up; ends the gesture.
    Up,
    Cancel,
    /// An additional pointer went down while a gesture is active.
    PointerDown,
    /// A non-final pointer went up.
    PointerUp,
}

/// A raw pointer event in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, kind: PointerKind, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            pointer,
            kind,
            x,
            y,
            time_ms,
        }
    }
}
