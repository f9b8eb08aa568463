//! Interruptible smooth scrolling.
//!
//! [`SmoothScroller`] reconciles an integer scroll bar value with an
//! animated, real-valued offset the view reads each frame. The tricky part
//! is overlap: a new scroll request may arrive while a previous scroll
//! animation is still in flight, and the transition has to stay free of
//! visible jumps or stutter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use flowview_core::{Easing, Interpolation, Property, SharedProperty};

use crate::events::{ScrollBarInput, WheelEvent};
use crate::scroll_bar::ScrollBarState;

/// Fixed duration of a scroll animation.
const SCROLL_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Assumed frame rate for the one-frame start advance on interruption.
const FRAMES_PER_SECOND: f32 = 60.0;

/// Animates scroll position changes and handles raw scroll bar input.
///
/// The scroller owns the scroll bar's value model and an animated offset
/// exposed as a [`SharedProperty<f32>`]. The host reads the offset each
/// frame (after calling [`update`](Self::update)) to position its content.
///
/// Scrolling is *smooth* (animated) while the user drags the scroll bar,
/// for the duration of a wheel turn, and for programmatic
/// [`scroll_to`](Self::scroll_to) calls. Outside of those, offset
/// assignments snap directly — a designed fast path, e.g. for layout-driven
/// repositioning.
pub struct SmoothScroller {
    /// Value model of the scroll bar surface this scroller serves.
    scroll_bar: ScrollBarState,
    /// The animated offset the view reads each frame.
    offset: SharedProperty<f32>,
    /// The running interpolation, if any. At most one at a time.
    animation: Option<Interpolation<f32>>,
    /// Whether the scroll bar is currently pressed.
    dragging: bool,
    /// Whether the next offset assignment animates instead of snapping.
    smooth_scrolling: bool,
}

impl SmoothScroller {
    /// Create a scroller with a zero-range scroll bar and offset 0.
    pub fn new() -> Self {
        Self {
            scroll_bar: ScrollBarState::new(),
            offset: Arc::new(Property::new(0.0)),
            animation: None,
            dragging: false,
            // Smooth from the start so the first programmatic scroll
            // (e.g. restoring a view position) animates.
            smooth_scrolling: true,
        }
    }

    /// The scroll bar value model.
    pub fn scroll_bar(&self) -> &ScrollBarState {
        &self.scroll_bar
    }

    /// Mutable access to the scroll bar value model, e.g. for range setup.
    pub fn scroll_bar_mut(&mut self) -> &mut ScrollBarState {
        &mut self.scroll_bar
    }

    /// Current reading of the animated offset.
    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    /// A shared handle to the animated offset, for the host to read each
    /// frame.
    pub fn offset_property(&self) -> SharedProperty<f32> {
        Arc::clone(&self.offset)
    }

    /// Whether a scroll animation is currently in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next offset assignment will animate.
    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth_scrolling
    }

    /// Whether the scroll bar is currently pressed.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Scroll the content by `distance` (positive scrolls towards smaller
    /// offsets, mirroring the scroll bar convention).
    ///
    /// When the interpolated offset already matches the scroll bar value the
    /// call is a no-op. When an animation is in flight, the unfinished part
    /// of its range is folded into `distance` so no content is skipped, the
    /// start offset is advanced by one frame's worth of progress to keep
    /// motion smooth, and the easing switches to ease-out so the
    /// interruption decelerates naturally.
    pub fn scroll_contents_by(&mut self, mut distance: f32, now: Instant) {
        self.settle(now);

        let current_offset = self.offset.get();
        if current_offset.round() as i32 == self.scroll_bar.value() {
            // The offset is already synchronous to the scroll bar.
            return;
        }

        let interrupting = self.animation.is_some();
        if let Some(animation) = &self.animation {
            // Dropping a running animation would skip the range from the
            // current offset to its end. Fold the difference into the new
            // distance instead.
            distance += current_offset - animation.end_value();
        }

        let end_offset = current_offset - distance;

        if self.smooth_scrolling || interrupting {
            let mut start_offset = current_offset;
            if interrupting {
                // Advance the start by one frame so back-to-back requests
                // within a short timeslot keep the motion progressing.
                start_offset += (end_offset - current_offset) * 1000.0
                    / (SCROLL_ANIMATION_DURATION.as_millis() as f32 * FRAMES_PER_SECOND);
            }

            let easing = if interrupting {
                Easing::EaseOut
            } else {
                Easing::EaseInOut
            };
            tracing::trace!(
                target: "flowview::scroller",
                start_offset,
                end_offset,
                interrupting,
                "starting scroll animation"
            );
            self.animation = Some(Interpolation::new(
                start_offset,
                end_offset,
                now,
                SCROLL_ANIMATION_DURATION,
                easing,
            ));
            self.offset.set(start_offset);
        } else {
            tracing::trace!(target: "flowview::scroller", end_offset, "snapping offset");
            self.animation = None;
            self.offset.set(end_offset);
        }
    }

    /// Smoothly scroll to the given scroll bar position.
    ///
    /// Forces smooth mode on, then routes the value change through the same
    /// path a scroll bar notification takes.
    pub fn scroll_to(&mut self, position: f32, now: Instant) {
        self.smooth_scrolling = true;
        let previous = self.scroll_bar.set_value(position.round() as i32);
        let value = self.scroll_bar.value();
        if previous != value {
            self.scroll_contents_by((previous - value) as f32, now);
        }
    }

    /// Whether the caller may update the scroll bar for a new maximum.
    ///
    /// Returns `false` while an animation is driving the scroll bar and the
    /// maximum is unchanged — the target state will be reached when the
    /// animation ends, and snapping the scroll bar now would fight it. A
    /// changed maximum means the content itself changed: any running
    /// animation is stopped and the caller should update immediately.
    pub fn request_scroll_bar_update(&mut self, new_maximum: i32, now: Instant) -> bool {
        self.settle(now);

        if self.animation.is_some() {
            if new_maximum == self.scroll_bar.maximum() {
                return false;
            }
            tracing::trace!(
                target: "flowview::scroller",
                new_maximum,
                "maximum changed, cancelling scroll animation"
            );
            self.animation = None;
        }
        true
    }

    /// Feed a raw input event from the scroll bar surface.
    ///
    /// Returns `true` if the event was consumed (wheel events are; press and
    /// release only toggle state and propagate).
    pub fn filter_event(&mut self, event: &ScrollBarInput, now: Instant) -> bool {
        self.settle(now);

        match event {
            ScrollBarInput::MousePress => {
                self.dragging = true;
                self.smooth_scrolling = true;
                false
            }
            ScrollBarInput::MouseRelease => {
                self.dragging = false;
                self.smooth_scrolling = false;
                false
            }
            ScrollBarInput::Wheel(wheel) => {
                self.handle_wheel_event(wheel, now);
                true
            }
        }
    }

    /// Advance the running animation to `now`, writing the interpolated
    /// offset through. Returns `true` while an animation remains in flight,
    /// so the host knows to keep scheduling frames.
    pub fn update(&mut self, now: Instant) -> bool {
        self.settle(now);
        if let Some(animation) = &self.animation {
            self.offset.set(animation.value_at(now));
            true
        } else {
            false
        }
    }

    /// Apply a wheel turn: one step per 15 degrees, scaled by the page
    /// step. Smooth mode is forced on for just this value change and the
    /// previous flag is restored immediately after.
    fn handle_wheel_event(&mut self, event: &WheelEvent, now: Instant) {
        let num_degrees = event.delta / 8.0;
        let num_steps = (num_degrees / 15.0) as i32;
        tracing::trace!(target: "flowview::scroller", delta = event.delta, num_steps, "wheel event");

        let previous_smooth = self.smooth_scrolling;
        self.smooth_scrolling = true;

        let value = self.scroll_bar.value();
        let page_step = self.scroll_bar.page_step();
        let old = self.scroll_bar.set_value(value - num_steps * page_step);
        let new = self.scroll_bar.value();
        if old != new {
            self.scroll_contents_by((old - new) as f32, now);
        }

        self.smooth_scrolling = previous_smooth;
    }

    /// Retire an animation that has run its full duration: land on the end
    /// value and, unless the user is still dragging, fall back to snap mode
    /// for the next unrelated assignment.
    fn settle(&mut self, now: Instant) {
        if let Some(animation) = &self.animation {
            if animation.is_finished(now) {
                self.offset.set(animation.end_value());
                self.animation = None;
                if self.smooth_scrolling && !self.dragging {
                    self.smooth_scrolling = false;
                }
                tracing::trace!(target: "flowview::scroller", "scroll animation finished");
            }
        }
    }
}

impl Default for SmoothScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SmoothScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothScroller")
            .field("value", &self.scroll_bar.value())
            .field("offset", &self.offset.get())
            .field("animating", &self.animation.is_some())
            .field("dragging", &self.dragging)
            .field("smooth_scrolling", &self.smooth_scrolling)
            .finish()
    }
}
