//! Core systems for flowview.
//!
//! This crate provides the foundational components shared by the flowview
//! item-view services:
//!
//! - **Signal/Slot System**: type-safe observer notification
//! - **Properties**: values with change detection, shareable with the host
//! - **Easing & Interpolation**: the frame-driven animation primitive
//! - **Geometry**: `Point`, `Size`, `Orientation`
//!
//! Everything here runs on the single interactive thread that drives the
//! hosting view. "Animation" is cooperative, frame-driven state advanced by
//! an explicit per-tick call with a caller-supplied `Instant` — no timers
//! fire on their own and no worker threads exist.
//!
//! # Signal/Slot Example
//!
//! ```
//! use flowview_core::Signal;
//!
//! let changed = Signal::<i32>::new();
//! let id = changed.connect(|value| println!("changed to {value}"));
//! changed.emit(42);
//! changed.disconnect(id);
//! ```

mod easing;
mod error;
mod geometry;
mod interpolation;
pub mod logging;
mod property;
pub mod signal;

pub use easing::{Easing, ease, lerp_eased};
pub use error::{CoreError, Result};
pub use geometry::{Orientation, Point, Size};
pub use interpolation::{Interpolate, Interpolation};
pub use property::{Property, SharedProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
