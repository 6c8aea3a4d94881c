//! Data-source trait for windowed lists.

/// Provides the information the windowing layer needs about a list's items.
///
/// Implementations should be cheap to query; the data itself stays owned by
/// the application. When the underlying data changes, call
/// [`crate::ListWindowState::reconcile_items`] so the scroll position can
/// follow the previously visible item by key.
pub trait ListItems {
    /// Total number of items, visible or not.
    fn item_count(&self) -> usize;

    /// Stable key for the item at `index`.
    ///
    /// Keys keep the scroll position anchored when items are inserted or
    /// removed before it. Defaults to the index itself, which is only stable
    /// for append-only data.
    fn key(&self, index: usize) -> u64 {
        index as u64
    }

    /// Expected extent of the item at `index`, if the data source knows it.
    ///
    /// Used to seed extent tables before any real measurement exists.
    fn extent_hint(&self, index: usize) -> Option<f32> {
        let _ = index;
        None
    }

    /// Finds the index carrying `key`, scanning the whole list.
    fn index_of_key(&self, key: u64) -> Option<usize> {
        (0..self.item_count()).find(|&i| self.key(i) == key)
    }

    /// Finds the index carrying `key` inside `range` only.
    ///
    /// Callers pass the nearest-range window here first and fall back to
    /// [`ListItems::index_of_key`] when the bounded scan misses.
    fn index_of_key_within(&self, key: u64, range: std::ops::Range<usize>) -> Option<usize> {
        let end = range.end.min(self.item_count());
        (range.start.min(end)..end).find(|&i| self.key(i) == key)
    }
}
