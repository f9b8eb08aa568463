//! Item-view support services: size hint caching, smooth scrolling,
//! keyboard type-ahead search, and per-widget transition animations.
//!
//! These pieces are toolkit-agnostic: nothing here paints or owns widgets.
//! The hosting view feeds in input events, item counts, and frame ticks,
//! and applies the values and signals that come back out.
//!
//! - [`SizeHintCache`] memoizes per-item layout sizes and keeps the cache
//!   consistent across item insertions, removals, moves, and changes.
//! - [`SmoothScroller`] animates scroll position changes and arbitrates
//!   between smooth wheel/keyboard scrolling and direct slider dragging.
//! - [`KeyboardSearchManager`] accumulates keystrokes into a type-ahead
//!   search string with an inactivity timeout.
//! - [`ItemViewAnimation`] runs cancellable per-widget animations for item
//!   creation, deletion, movement, and resizing.

mod animation;
mod events;
mod keyboard_search;
mod scroll_bar;
mod size_hint_cache;
mod smooth_scroller;

pub use animation::{
    AnimationFrame, AnimationKind, AnimationValue, ItemViewAnimation, WidgetId, WidgetShift,
};
pub use events::{ScrollBarInput, WheelEvent};
pub use keyboard_search::{KeyboardSearchManager, SearchRequest};
pub use scroll_bar::ScrollBarState;
pub use size_hint_cache::SizeHintCache;
pub use smooth_scroller::SmoothScroller;

pub use flowview_core as core;
