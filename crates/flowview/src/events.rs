//! Input events consumed by the smooth scroller.
//!
//! The host forwards the raw mouse/wheel stream it receives on its scroll
//! bar surface; the scroller interprets it.

/// A mouse wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Rotation delta in eighths of a degree (one notch on a typical wheel
    /// is 120, i.e. 15 degrees).
    pub delta: f32,
}

impl WheelEvent {
    /// Create a new wheel event.
    pub fn new(delta: f32) -> Self {
        Self { delta }
    }
}

/// Raw input on the scroll bar surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollBarInput {
    /// A mouse button was pressed on the scroll bar.
    MousePress,
    /// A mouse button was released.
    MouseRelease,
    /// The wheel turned over the scroll bar.
    Wheel(WheelEvent),
}
