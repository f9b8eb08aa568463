//! Signal/slot notification for flowview.
//!
//! A small, Qt-inspired observer mechanism: components own [`Signal`] fields
//! and emit them when their state changes; the hosting view connects slots
//! (closures) to react.
//!
//! The whole subsystem runs on the single interactive thread, so emission is
//! always direct and synchronous — there is no queued or cross-thread
//! invocation path. Slots are cloned out of the connection table before they
//! are invoked, so a slot may connect or disconnect other slots (or emit
//! again) without deadlocking.
//!
//! # Example
//!
//! ```
//! use flowview_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let id = value_changed.connect(|value| {
//!     println!("value changed to {value}");
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; remains valid until the connection
    /// is disconnected or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args)>;

/// A signal with any number of connected slots.
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple for multiple arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// The number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission.
    ///
    /// While blocked, [`emit`](Self::emit) does nothing. Used by hosts
    /// during batch updates to suppress cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "flowview_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Clone the slots out of the lock so re-entrant connects,
        // disconnects, and emits are safe.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: "flowview_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );
        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connection_count", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

/// RAII guard that disconnects a connection when dropped.
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: Option<ConnectionId>,
}

impl<'a, Args> ConnectionGuard<'a, Args> {
    /// Tie `id` to the lifetime of the guard.
    pub fn new(signal: &'a Signal<Args>, id: ConnectionId) -> Self {
        Self {
            signal,
            id: Some(id),
        }
    }

    /// Release the connection so it outlives the guard.
    pub fn release(mut self) -> ConnectionId {
        self.id.take().unwrap_or_default()
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.signal.disconnect(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_connect_emit_disconnect() {
        let signal = Signal::<i32>::new();
        let seen = Rc::new(Cell::new(0));

        let seen_clone = Rc::clone(&seen);
        let id = signal.connect(move |value| seen_clone.set(*value));

        signal.emit(7);
        assert_eq!(seen.get(), 7);

        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(9);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn test_multiple_slots() {
        let signal = Signal::<()>::new();
        let count = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let count = Rc::clone(&count);
            signal.connect(move |()| count.set(count.get() + 1));
        }
        assert_eq!(signal.connection_count(), 3);

        signal.emit(());
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_blocked_emit_is_dropped() {
        let signal = Signal::<i32>::new();
        let seen = Rc::new(Cell::new(0));

        let seen_clone = Rc::clone(&seen);
        signal.connect(move |value| seen_clone.set(*value));

        signal.set_blocked(true);
        signal.emit(5);
        assert_eq!(seen.get(), 0);

        signal.set_blocked(false);
        signal.emit(5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_reentrant_disconnect_does_not_deadlock() {
        let signal = Rc::new(Signal::<()>::new());
        let inner = Rc::clone(&signal);
        let id_cell = Rc::new(Cell::new(None));

        let id_for_slot = Rc::clone(&id_cell);
        let id = signal.connect(move |()| {
            if let Some(id) = id_for_slot.get() {
                inner.disconnect(id);
            }
        });
        id_cell.set(Some(id));

        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard() {
        let signal = Signal::<()>::new();
        {
            let id = signal.connect(|()| {});
            let _guard = ConnectionGuard::new(&signal, id);
            assert_eq!(signal.connection_count(), 1);
        }
        assert_eq!(signal.connection_count(), 0);
    }
}
