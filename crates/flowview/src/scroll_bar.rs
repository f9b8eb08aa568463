//! Logic-only scroll bar state.
//!
//! The smooth scroller manipulates a scroll bar's value, maximum, and page
//! step; painting and hit testing belong to the hosting toolkit. This module
//! keeps just the value model and its change notification.

use flowview_core::Signal;

/// The value model of a scroll bar.
///
/// Values are clamped to `[0, maximum]`. The host mirrors this state into
/// its real scroll bar widget, typically by connecting to `value_changed`.
///
/// # Signals
///
/// - `value_changed(i32)`: emitted when the value actually changes
#[derive(Debug)]
pub struct ScrollBarState {
    /// Current value.
    value: i32,
    /// Maximum value (minimum is always 0).
    maximum: i32,
    /// Page step size, used by wheel scrolling.
    page_step: i32,

    /// Signal emitted when the value changes.
    pub value_changed: Signal<i32>,
}

impl ScrollBarState {
    /// Create scroll bar state with a zero range.
    pub fn new() -> Self {
        Self {
            value: 0,
            maximum: 0,
            page_step: 10,
            value_changed: Signal::new(),
        }
    }

    /// Get the current value.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set the current value, clamped to `[0, maximum]`.
    ///
    /// Emits `value_changed` only on a real change. Returns the previous
    /// value so callers can derive the scrolled distance.
    pub fn set_value(&mut self, value: i32) -> i32 {
        let previous = self.value;
        let clamped = value.clamp(0, self.maximum);
        if self.value != clamped {
            self.value = clamped;
            self.value_changed.emit(clamped);
        }
        previous
    }

    /// Get the maximum value.
    #[inline]
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Set the maximum value.
    ///
    /// The current value is re-clamped to the new range.
    pub fn set_maximum(&mut self, maximum: i32) {
        let maximum = maximum.max(0);
        if self.maximum != maximum {
            self.maximum = maximum;
            let clamped = self.value.clamp(0, maximum);
            if self.value != clamped {
                self.value = clamped;
                self.value_changed.emit(clamped);
            }
        }
    }

    /// Get the page step size.
    #[inline]
    pub fn page_step(&self) -> i32 {
        self.page_step
    }

    /// Set the page step size.
    pub fn set_page_step(&mut self, step: i32) {
        self.page_step = step.max(1);
    }
}

impl Default for ScrollBarState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_set_value_clamps() {
        let mut bar = ScrollBarState::new();
        bar.set_maximum(100);
        bar.set_value(150);
        assert_eq!(bar.value(), 100);
        bar.set_value(-20);
        assert_eq!(bar.value(), 0);
    }

    #[test]
    fn test_set_value_returns_previous() {
        let mut bar = ScrollBarState::new();
        bar.set_maximum(100);
        assert_eq!(bar.set_value(40), 0);
        assert_eq!(bar.set_value(70), 40);
    }

    #[test]
    fn test_value_changed_emitted_on_change_only() {
        let mut bar = ScrollBarState::new();
        bar.set_maximum(100);

        let emissions = Rc::new(Cell::new(0));
        let emissions_clone = Rc::clone(&emissions);
        bar.value_changed
            .connect(move |_| emissions_clone.set(emissions_clone.get() + 1));

        bar.set_value(10);
        bar.set_value(10);
        assert_eq!(emissions.get(), 1);
    }

    #[test]
    fn test_shrinking_maximum_reclamps_value() {
        let mut bar = ScrollBarState::new();
        bar.set_maximum(100);
        bar.set_value(80);
        bar.set_maximum(50);
        assert_eq!(bar.value(), 50);
    }
}
