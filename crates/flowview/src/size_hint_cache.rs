//! Lazily-computed size-hint cache for item views.
//!
//! A virtualized view laying out thousands of items cannot afford to measure
//! every item on every pass. [`SizeHintCache`] memoizes the layout size per
//! item index and invalidates entries in response to the same model change
//! notifications the view already receives.

use flowview_core::{CoreError, Result, Size};

/// Memoized per-item layout sizes, aligned 1:1 with the item model's index
/// space.
///
/// Each entry is either unset (not yet computed) or a concrete size. The
/// host's measure callback is only invoked on a cache miss, so for all
/// sequences of model mutations the callback runs at most once per index
/// between invalidations of that index.
///
/// # Example
///
/// ```
/// use flowview::SizeHintCache;
/// use flowview_core::Size;
///
/// let mut cache = SizeHintCache::new();
/// cache.items_inserted(0, 3);
///
/// let hint = cache
///     .size_hint(1, |_index| Size::new(120.0, 24.0))
///     .unwrap();
/// assert_eq!(hint, Size::new(120.0, 24.0));
/// ```
#[derive(Debug, Default)]
pub struct SizeHintCache {
    /// One entry per item; `None` marks a size that must be recomputed.
    entries: Vec<Option<Size>>,
}

impl SizeHintCache {
    /// Create an empty cache.
    ///
    /// The cache grows with [`items_inserted`](Self::items_inserted) as the
    /// model populates.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The number of tracked items.
    ///
    /// Invariant: equal to the item model's count after every mutation call
    /// returns.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache tracks no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The memoized size for `index`, measuring on a cache miss.
    ///
    /// `compute` is the host's measure callback; it may be arbitrarily
    /// expensive, which is exactly why the result is stored.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index` is outside `[0, len)` — keeping
    /// indices in range is the caller's contract.
    pub fn size_hint<F>(&mut self, index: usize, mut compute: F) -> Result<Size>
    where
        F: FnMut(usize) -> Size,
    {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;

        match entry {
            Some(size) => Ok(*size),
            None => {
                let size = compute(index);
                *entry = Some(size);
                Ok(size)
            }
        }
    }

    /// Insert `count` unset entries at `index`, shifting later entries right.
    ///
    /// An `index` past the end appends.
    pub fn items_inserted(&mut self, index: usize, count: usize) {
        let index = index.min(self.entries.len());
        self.entries
            .splice(index..index, std::iter::repeat(None).take(count));
        tracing::trace!(
            target: "flowview::size_hint_cache",
            index,
            count,
            len = self.entries.len(),
            "items inserted"
        );
    }

    /// Remove the `count` entries starting at `index`.
    ///
    /// Ranges reaching past the end remove what exists.
    pub fn items_removed(&mut self, index: usize, count: usize) {
        let start = index.min(self.entries.len());
        let end = index.saturating_add(count).min(self.entries.len());
        self.entries.drain(start..end);
        tracing::trace!(
            target: "flowview::size_hint_cache",
            index,
            count,
            len = self.entries.len(),
            "items removed"
        );
    }

    /// Invalidate the `count` entries starting at `index` after a move.
    ///
    /// The moved range is not relocated; it is simply recomputed on next
    /// access. Conservative, but moves are rare compared to lookups.
    pub fn items_moved(&mut self, index: usize, count: usize) {
        self.invalidate_range(index, count);
        tracing::trace!(
            target: "flowview::size_hint_cache",
            index,
            count,
            "items moved, range invalidated"
        );
    }

    /// Invalidate the `count` entries starting at `index` after a change.
    ///
    /// The changed attribute names are accepted for interface parity with
    /// the model notification but are not used to filter: any reported
    /// change invalidates the cached size.
    pub fn items_changed(&mut self, index: usize, count: usize, changed_attributes: &[&str]) {
        self.invalidate_range(index, count);
        tracing::trace!(
            target: "flowview::size_hint_cache",
            index,
            count,
            ?changed_attributes,
            "items changed, range invalidated"
        );
    }

    /// Mark every entry unset.
    pub fn clear_cache(&mut self) {
        for entry in &mut self.entries {
            *entry = None;
        }
        tracing::trace!(target: "flowview::size_hint_cache", len = self.entries.len(), "cache cleared");
    }

    fn invalidate_range(&mut self, index: usize, count: usize) {
        let start = index.min(self.entries.len());
        let end = index.saturating_add(count).min(self.entries.len());
        for entry in &mut self.entries[start..end] {
            *entry = None;
        }
    }
}
