//! A headless card-stack engine modeled after a mobile task switcher.
//!
//! For host-level glue (a render-handle pool, a frame-driven controller, events), see the
//! `cardstack-adapter` crate.
//!
//! Cards travel along a non-linear easing curve: the further down the stack a card sits, the
//! larger it gets and the more of it shows, while cards near the top bunch up and peek out from
//! behind each other. This crate computes, for every card at every scroll offset, its scale,
//! vertical translation, depth and visibility, plus the scroll bounds, fling physics and the
//! pointer state machine that drives them.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the window size
//! - pointer events and frame timestamps
//! - a renderer that applies [`CardTransform`]s
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod curve;
mod error;
mod fling;
mod gesture;
mod layout;
mod model;
mod options;
mod scroller;
mod state;
mod tween;
mod types;
mod velocity;

#[cfg(test)]
mod tests;

pub use curve::CurveTable;
pub use error::{Result, StackError};
pub use fling::Fling;
pub use gesture::{GestureController, GestureOutcome, GesturePhase, SwipeOutcome, hit_test};
pub use layout::{SCROLL_HIDDEN_BOTTOM_RATE, StackLayout};
pub use model::CardStack;
pub use options::StackConfig;
pub use scroller::{OnScrollChanged, StackScroller};
pub use state::{FrameState, FrameStep, ScrollBounds, ScrollState};
pub use tween::{Easing, Tween};
pub use types::{CardRange, CardTransform, PointerEvent, PointerId, PointerKind, Rect};
pub use velocity::VelocityTracker;
