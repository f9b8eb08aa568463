//! Per-widget transition animations for item views.
//!
//! [`ItemViewAnimation`] runs independent, cancellable animations keyed by
//! `(widget, kind)`: items slide to new positions, fade in on creation,
//! fade out on deletion, and resize smoothly. The hosting view applies the
//! per-frame values returned by [`update`](ItemViewAnimation::update) and
//! reacts to the `finished` signal, typically by discarding a faded-out
//! widget or snapping a moved widget's final geometry.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use flowview_core::{Easing, Interpolation, Orientation, Point, Signal, Size};

/// A stable identity for an item widget.
///
/// The animation manager never owns widgets; it keys its bookkeeping by
/// this host-assigned handle. When a widget is destroyed the host must call
/// [`ItemViewAnimation::stop_widget`] so no stale entries remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Create a widget identity from a raw value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this identity.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// The kind of transition being animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationKind {
    /// The widget slides to a new position.
    Movement,
    /// The widget fades in (opacity 0 to 1).
    Create,
    /// The widget fades out (opacity 1 to 0).
    Delete,
    /// The widget's size animates to a new value.
    Resize,
    /// The widget's icon size animates, e.g. on zoom level changes.
    IconResize,
}

impl AnimationKind {
    /// All animation kinds, for per-widget iteration.
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Movement,
        AnimationKind::Create,
        AnimationKind::Delete,
        AnimationKind::Resize,
        AnimationKind::IconResize,
    ];

    /// The fixed duration for this kind.
    fn duration(self) -> Duration {
        match self {
            AnimationKind::IconResize => Duration::from_millis(150),
            _ => Duration::from_millis(200),
        }
    }
}

/// The animated quantity carried by a frame or passed to `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationValue {
    /// A widget position.
    Position(Point),
    /// A widget opacity in `[0, 1]`.
    Opacity(f32),
    /// A widget size.
    Size(Size),
}

/// One per-frame output: the value the host should apply to a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub widget: WidgetId,
    pub kind: AnimationKind,
    pub value: AnimationValue,
}

/// A position adjustment the host must apply when the viewport scrolled
/// under a running animation (see [`ItemViewAnimation::set_scroll_offset`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetShift {
    pub widget: WidgetId,
    pub kind: AnimationKind,
    /// The translation to add to the widget's position.
    pub delta: Point,
}

/// A running interpolation, typed by the animated quantity.
#[derive(Debug, Clone, Copy)]
enum Track {
    Position(Interpolation<Point>),
    Opacity(Interpolation<f32>),
    Size(Interpolation<Size>),
}

impl Track {
    fn value_at(&self, now: Instant) -> AnimationValue {
        match self {
            Track::Position(interp) => AnimationValue::Position(interp.value_at(now)),
            Track::Opacity(interp) => AnimationValue::Opacity(interp.value_at(now)),
            Track::Size(interp) => AnimationValue::Size(interp.value_at(now)),
        }
    }

    fn end_value(&self) -> AnimationValue {
        match self {
            Track::Position(interp) => AnimationValue::Position(interp.end_value()),
            Track::Opacity(interp) => AnimationValue::Opacity(interp.end_value()),
            Track::Size(interp) => AnimationValue::Size(interp.end_value()),
        }
    }

    fn is_finished(&self, now: Instant) -> bool {
        match self {
            Track::Position(interp) => interp.is_finished(now),
            Track::Opacity(interp) => interp.is_finished(now),
            Track::Size(interp) => interp.is_finished(now),
        }
    }
}

/// Runs cancellable per-widget, per-kind transition animations.
///
/// At most one animation exists per `(widget, kind)` pair: starting a new
/// one for the same key cancels the old one first.
///
/// # Signals
///
/// - `finished(WidgetId, AnimationKind)`: emitted on natural completion
///   only — never for an explicit or implicit cancellation. Stopping an
///   animation leaves the widget at the last applied interpolated value;
///   finalization is the caller's responsibility.
#[derive(Debug)]
pub struct ItemViewAnimation {
    /// Running animations, at most one per key.
    tracks: BTreeMap<(WidgetId, AnimationKind), Track>,
    /// Scroll direction of the hosting view.
    scroll_orientation: Orientation,
    /// Current scroll offset of the hosting view.
    scroll_offset: f32,

    /// Signal emitted when an animation runs to natural completion.
    pub finished: Signal<(WidgetId, AnimationKind)>,
}

impl ItemViewAnimation {
    /// Create an animation manager for a vertically scrolling view.
    pub fn new() -> Self {
        Self {
            tracks: BTreeMap::new(),
            scroll_orientation: Orientation::Vertical,
            scroll_offset: 0.0,
            finished: Signal::new(),
        }
    }

    /// Set the scroll direction of the hosting view.
    pub fn set_scroll_orientation(&mut self, orientation: Orientation) {
        self.scroll_orientation = orientation;
    }

    /// The scroll direction of the hosting view.
    pub fn scroll_orientation(&self) -> Orientation {
        self.scroll_orientation
    }

    /// The scroll offset last reported by the host.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Start an animation of `kind` on `widget`.
    ///
    /// Any running animation for the same `(widget, kind)` is cancelled
    /// first. `current` is the widget's present value of the animated
    /// property and `end` the value to reach; for `Create` and `Delete`
    /// the fade endpoints are canonical (0 to 1, 1 to 0) and the arguments
    /// only select the opacity track. A movement or resize towards the
    /// value the widget already has starts nothing.
    pub fn start(
        &mut self,
        widget: WidgetId,
        kind: AnimationKind,
        current: AnimationValue,
        end: AnimationValue,
        now: Instant,
    ) {
        self.stop(widget, kind);

        let duration = kind.duration();
        let track = match (kind, current, end) {
            (
                AnimationKind::Movement,
                AnimationValue::Position(current),
                AnimationValue::Position(end),
            ) => {
                if current == end {
                    return;
                }
                Track::Position(Interpolation::new(current, end, now, duration, Easing::Linear))
            }
            (AnimationKind::Create, AnimationValue::Opacity(_), AnimationValue::Opacity(_)) => {
                Track::Opacity(Interpolation::new(
                    0.0,
                    1.0,
                    now,
                    duration,
                    Easing::EaseInQuart,
                ))
            }
            (AnimationKind::Delete, AnimationValue::Opacity(_), AnimationValue::Opacity(_)) => {
                Track::Opacity(Interpolation::new(
                    1.0,
                    0.0,
                    now,
                    duration,
                    Easing::EaseOutQuart,
                ))
            }
            (
                AnimationKind::Resize | AnimationKind::IconResize,
                AnimationValue::Size(current),
                AnimationValue::Size(end),
            ) => {
                if current == end {
                    return;
                }
                Track::Size(Interpolation::new(current, end, now, duration, Easing::Linear))
            }
            _ => {
                tracing::warn!(
                    target: "flowview::animation",
                    ?widget,
                    ?kind,
                    ?current,
                    ?end,
                    "mismatched animation value kinds, ignoring start"
                );
                return;
            }
        };

        tracing::trace!(target: "flowview::animation", ?widget, ?kind, "animation started");
        self.tracks.insert((widget, kind), track);
    }

    /// Cancel and remove the animation for `(widget, kind)`, if any.
    ///
    /// Does not emit `finished` and does not apply the end value: the
    /// widget stays at the last interpolated value the host applied.
    pub fn stop(&mut self, widget: WidgetId, kind: AnimationKind) {
        if self.tracks.remove(&(widget, kind)).is_some() {
            tracing::trace!(target: "flowview::animation", ?widget, ?kind, "animation stopped");
        }
    }

    /// Cancel and remove all animations on `widget`, of any kind.
    ///
    /// This is the teardown hook to call when a widget is destroyed.
    pub fn stop_widget(&mut self, widget: WidgetId) {
        for kind in AnimationKind::ALL {
            self.stop(widget, kind);
        }
    }

    /// Whether a non-cancelled animation exists for `(widget, kind)`.
    pub fn is_started(&self, widget: WidgetId, kind: AnimationKind) -> bool {
        self.tracks.contains_key(&(widget, kind))
    }

    /// Whether any non-cancelled animation exists on `widget`.
    pub fn is_started_widget(&self, widget: WidgetId) -> bool {
        AnimationKind::ALL
            .iter()
            .any(|&kind| self.is_started(widget, kind))
    }

    /// Report a new viewport scroll offset.
    ///
    /// Every widget with a running animation has to follow the scroll so
    /// its animated path stays visually correct. Running movement
    /// animations are rebased internally: both endpoints shift by the
    /// offset difference along the scroll orientation and the animation
    /// restarts over its remaining duration. For other kinds the animated
    /// property is not the position, so the required translation is
    /// returned as [`WidgetShift`]s for the host to apply. Delete
    /// animations are exempt: a deleted item just fades away in place.
    pub fn set_scroll_offset(&mut self, offset: f32, now: Instant) -> Vec<WidgetShift> {
        let diff = self.scroll_offset - offset;
        self.scroll_offset = offset;

        if diff == 0.0 {
            return Vec::new();
        }

        let delta = match self.scroll_orientation {
            Orientation::Vertical => Point::new(0.0, diff),
            Orientation::Horizontal => Point::new(diff, 0.0),
        };

        let mut shifts = Vec::new();
        for (&(widget, kind), track) in &mut self.tracks {
            match kind {
                AnimationKind::Delete => {}
                AnimationKind::Movement => {
                    if let Track::Position(interp) = track {
                        let current = interp.value_at(now);
                        let shifted_start =
                            Point::new(current.x + delta.x, current.y + delta.y);
                        let end = interp.end_value();
                        let shifted_end = Point::new(end.x + delta.x, end.y + delta.y);
                        *interp = Interpolation::new(
                            shifted_start,
                            shifted_end,
                            now,
                            interp.remaining(now),
                            interp.easing(),
                        );
                    }
                }
                _ => shifts.push(WidgetShift {
                    widget,
                    kind,
                    delta,
                }),
            }
        }
        shifts
    }

    /// Advance all animations to `now`.
    ///
    /// Returns one [`AnimationFrame`] per running animation for the host to
    /// apply. Animations that reached their full duration contribute their
    /// exact end value, are removed, and emit `finished` — the only path by
    /// which completed (non-cancelled) transitions are observed.
    pub fn update(&mut self, now: Instant) -> Vec<AnimationFrame> {
        let mut frames = Vec::with_capacity(self.tracks.len());
        let mut completed = Vec::new();

        for (&(widget, kind), track) in &self.tracks {
            if track.is_finished(now) {
                frames.push(AnimationFrame {
                    widget,
                    kind,
                    value: track.end_value(),
                });
                completed.push((widget, kind));
            } else {
                frames.push(AnimationFrame {
                    widget,
                    kind,
                    value: track.value_at(now),
                });
            }
        }

        for key in completed {
            self.tracks.remove(&key);
            tracing::trace!(
                target: "flowview::animation",
                widget = ?key.0,
                kind = ?key.1,
                "animation finished"
            );
            self.finished.emit(key);
        }

        frames
    }
}

impl Default for ItemViewAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const OPAQUE: AnimationValue = AnimationValue::Opacity(1.0);

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    fn position(x: f32, y: f32) -> AnimationValue {
        AnimationValue::Position(Point::new(x, y))
    }

    #[test]
    fn test_start_replaces_running_animation() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(1);
        let t0 = Instant::now();

        anim.start(widget, AnimationKind::Movement, position(0.0, 0.0), position(0.0, 10.0), t0);
        anim.start(widget, AnimationKind::Movement, position(0.0, 0.0), position(0.0, 20.0), t0);
        assert!(anim.is_started(widget, AnimationKind::Movement));

        // Only the latest target survives.
        let frames = anim.update(at(t0, 200));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].value, position(0.0, 20.0));
    }

    #[test]
    fn test_movement_to_current_position_is_noop() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(1);
        anim.start(
            widget,
            AnimationKind::Movement,
            position(5.0, 5.0),
            position(5.0, 5.0),
            Instant::now(),
        );
        assert!(!anim.is_started(widget, AnimationKind::Movement));
    }

    #[test]
    fn test_create_fades_in_and_finishes() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(3);
        let t0 = Instant::now();

        let finished = Rc::new(RefCell::new(Vec::new()));
        let finished_clone = Rc::clone(&finished);
        anim.finished.connect(move |&(widget, kind)| {
            finished_clone.borrow_mut().push((widget, kind));
        });

        anim.start(widget, AnimationKind::Create, OPAQUE, OPAQUE, t0);

        let frames = anim.update(t0);
        assert_eq!(frames[0].value, AnimationValue::Opacity(0.0));

        let frames = anim.update(at(t0, 250));
        assert_eq!(frames[0].value, AnimationValue::Opacity(1.0));
        assert_eq!(*finished.borrow(), vec![(widget, AnimationKind::Create)]);
        assert!(!anim.is_started(widget, AnimationKind::Create));

        // A later tick reports nothing and emits nothing further.
        assert!(anim.update(at(t0, 300)).is_empty());
        assert_eq!(finished.borrow().len(), 1);
    }

    #[test]
    fn test_delete_fades_out() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(4);
        let t0 = Instant::now();

        anim.start(widget, AnimationKind::Delete, OPAQUE, OPAQUE, t0);
        let frames = anim.update(at(t0, 200));
        assert_eq!(frames[0].value, AnimationValue::Opacity(0.0));
    }

    #[test]
    fn test_stop_emits_nothing() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(5);
        let t0 = Instant::now();

        let finished_count = Rc::new(RefCell::new(0));
        let finished_clone = Rc::clone(&finished_count);
        anim.finished.connect(move |_| *finished_clone.borrow_mut() += 1);

        anim.start(widget, AnimationKind::Delete, OPAQUE, OPAQUE, t0);
        anim.stop(widget, AnimationKind::Delete);
        assert!(!anim.is_started(widget, AnimationKind::Delete));
        assert_eq!(*finished_count.borrow(), 0);

        // Stopping again is a no-op.
        anim.stop(widget, AnimationKind::Delete);
    }

    #[test]
    fn test_stop_widget_purges_all_kinds() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(6);
        let other = WidgetId::from_raw(7);
        let t0 = Instant::now();

        anim.start(widget, AnimationKind::Movement, position(0.0, 0.0), position(1.0, 1.0), t0);
        anim.start(widget, AnimationKind::Create, OPAQUE, OPAQUE, t0);
        anim.start(other, AnimationKind::Create, OPAQUE, OPAQUE, t0);
        assert!(anim.is_started_widget(widget));

        anim.stop_widget(widget);
        assert!(!anim.is_started_widget(widget));
        assert!(anim.is_started_widget(other));
    }

    #[test]
    fn test_mismatched_value_kinds_are_ignored() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(8);
        anim.start(
            widget,
            AnimationKind::Movement,
            OPAQUE,
            OPAQUE,
            Instant::now(),
        );
        assert!(!anim.is_started(widget, AnimationKind::Movement));
    }

    #[test]
    fn test_scroll_offset_rebases_movement() {
        let mut anim = ItemViewAnimation::new();
        let widget = WidgetId::from_raw(9);
        let t0 = Instant::now();

        anim.start(widget, AnimationKind::Movement, position(0.0, 0.0), position(0.0, 100.0), t0);

        // Halfway through, the viewport scrolls down by 10.
        let mid = at(t0, 100);
        let shifts = anim.set_scroll_offset(10.0, mid);
        assert!(shifts.is_empty());

        // The animation now runs from the shifted midpoint to the shifted
        // target over the remaining duration.
        let frames = anim.update(mid);
        assert_eq!(frames[0].value, position(0.0, 40.0));
        let frames = anim.update(at(t0, 200));
        assert_eq!(frames[0].value, position(0.0, 90.0));
        assert!(!anim.is_started(widget, AnimationKind::Movement));
    }

    #[test]
    fn test_scroll_offset_shifts_fades_but_not_deletes() {
        let mut anim = ItemViewAnimation::new();
        let created = WidgetId::from_raw(10);
        let deleted = WidgetId::from_raw(11);
        let t0 = Instant::now();

        anim.start(created, AnimationKind::Create, OPAQUE, OPAQUE, t0);
        anim.start(deleted, AnimationKind::Delete, OPAQUE, OPAQUE, t0);

        let shifts = anim.set_scroll_offset(25.0, at(t0, 50));
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].widget, created);
        assert_eq!(shifts[0].delta, Point::new(0.0, -25.0));
    }

    #[test]
    fn test_horizontal_orientation_shifts_x() {
        let mut anim = ItemViewAnimation::new();
        anim.set_scroll_orientation(Orientation::Horizontal);
        let widget = WidgetId::from_raw(12);
        let t0 = Instant::now();

        anim.start(widget, AnimationKind::Resize, AnimationValue::Size(Size::new(10.0, 10.0)), AnimationValue::Size(Size::new(20.0, 20.0)), t0);
        let shifts = anim.set_scroll_offset(5.0, at(t0, 10));
        assert_eq!(shifts[0].delta, Point::new(-5.0, 0.0));
    }

    #[test]
    fn test_widget_id_raw_roundtrip() {
        let id = WidgetId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }
}
