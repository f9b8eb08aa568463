//! Reactive properties with change detection.
//!
//! A [`Property`] wraps a value and reports whether a `set` actually changed
//! it, enabling efficient change notification when paired with a
//! [`Signal`](crate::Signal). The smooth scroller exposes its animated
//! offset as a [`SharedProperty<f32>`] that the hosting view reads each
//! frame.
//!
//! # Example
//!
//! ```
//! use flowview_core::Property;
//!
//! let offset = Property::new(0.0f32);
//! assert!(!offset.set(0.0)); // unchanged
//! assert!(offset.set(120.0)); // changed
//! assert_eq!(offset.get(), 120.0);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

/// A value with interior mutability and change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone + PartialEq> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value; use [`with`](Self::with) for large types.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Set the value.
    ///
    /// Returns `true` if the value actually changed.
    pub fn set(&self, new_value: T) -> bool {
        let mut value = self.value.write();
        if *value == new_value {
            false
        } else {
            *value = new_value;
            true
        }
    }

    /// Access the value through a closure without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

/// A clone-able handle to a [`Property`], shared between a component and its
/// hosting view.
pub type SharedProperty<T> = Arc<Property<T>>;
