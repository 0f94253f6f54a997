//! Adapter utilities for the `cardstack` crate.
//!
//! The `cardstack` crate is UI-agnostic and focuses on the layout math, scroll state and gesture
//! handling. This crate provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - A pool of reusable render handles bound to card positions
//! - A frame-driven controller that applies mutations, pointer events and animations
//! - An event queue (dismissals, scroll-to progress, handle bindings)
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod controller;
mod event;
mod pool;


pub use controller::{StackController, VisibleCard};
pub use event::StackEvent;
pub use pool::{CardPool, HandleId};
