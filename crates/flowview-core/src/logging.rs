//! Logging facilities for flowview.
//!
//! Flowview instruments itself with the `tracing` crate. Install a
//! subscriber in the host application to see logs:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=flowview::scroller=trace`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "flowview_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "flowview_core::signal";
    /// Size-hint cache target.
    pub const SIZE_HINT_CACHE: &str = "flowview::size_hint_cache";
    /// Smooth scroller target.
    pub const SCROLLER: &str = "flowview::scroller";
    /// Keyboard type-ahead search target.
    pub const KEYBOARD_SEARCH: &str = "flowview::keyboard_search";
    /// Item animation manager target.
    pub const ANIMATION: &str = "flowview::animation";
}
