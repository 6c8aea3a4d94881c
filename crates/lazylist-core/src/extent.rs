//! Variable-extent support via prefix sums.
//!
//! Uniform lists map offsets to indices with one division. When every item
//! carries its own extent the mapping becomes a lookup in a prefix-sum table:
//! `O(log N)` by binary search, rebuilt only when the extents change.

use crate::error::LayoutError;
use crate::viewport::ViewportExtent;
use crate::window::Window;

/// Prefix-sum table over per-item extents.
///
/// `offsets[i]` is the start offset of item `i`; the final entry is the total
/// extent of the list. Built once per extent change, then shared by every
/// window computation.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtentTable {
    offsets: Vec<f32>,
}

impl Default for ExtentTable {
    fn default() -> Self {
        Self { offsets: vec![0.0] }
    }
}

impl ExtentTable {
    /// Builds a table from per-item extents.
    ///
    /// # Errors
    /// [`LayoutError::InvalidMetric`] if any extent is non-positive or
    /// non-finite.
    pub fn from_extents(extents: impl IntoIterator<Item = f32>) -> Result<Self, LayoutError> {
        let iter = extents.into_iter();
        let mut offsets = Vec::with_capacity(iter.size_hint().0 + 1);
        offsets.push(0.0);
        let mut total = 0.0f32;
        for extent in iter {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(LayoutError::InvalidMetric { extent });
            }
            total += extent;
            offsets.push(total);
        }
        Ok(Self { offsets })
    }

    /// Number of items in the table.
    pub fn item_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Whether the table describes an empty list.
    pub fn is_empty(&self) -> bool {
        self.offsets.len() == 1
    }

    /// Total extent of all items.
    pub fn total_extent(&self) -> f32 {
        *self.offsets.last().unwrap_or(&0.0)
    }

    /// Start offset of item `index`.
    pub fn offset_of(&self, index: usize) -> f32 {
        self.offsets[index]
    }

    /// End offset of item `index` (start of the next item).
    pub fn end_of(&self, index: usize) -> f32 {
        self.offsets[index + 1]
    }

    /// Extent of item `index`.
    pub fn extent_of(&self, index: usize) -> f32 {
        self.offsets[index + 1] - self.offsets[index]
    }

    /// Index of the item containing `offset`, clamped into the list.
    ///
    /// Offsets before the start map to the first item, offsets at or past the
    /// end map to the last. Must not be called on an empty table.
    pub fn index_at(&self, offset: f32) -> usize {
        let count = self.item_count();
        debug_assert!(count > 0, "index_at on an empty table");
        // First item whose end lies beyond the offset.
        let index = self.offsets[1..].partition_point(|&end| end <= offset);
        index.min(count - 1)
    }
}

/// Computes the window of items to materialize for a variable-extent list.
///
/// The variable-extent counterpart of [`crate::compute_window`]: same
/// clamping behavior, same invariants, with fillers read from the table so
/// total extent is conserved exactly.
///
/// # Errors
/// [`LayoutError::InvalidViewport`] on a non-positive viewport extent.
/// Item metrics were validated when `table` was built.
pub fn compute_window_variable(
    scroll_offset: f32,
    viewport_extent: f32,
    table: &ExtentTable,
    overscan: usize,
) -> Result<Window, LayoutError> {
    if viewport_extent.is_nan() || viewport_extent <= 0.0 {
        return Err(LayoutError::InvalidViewport {
            extent: viewport_extent,
        });
    }
    if table.is_empty() {
        return Ok(Window::empty());
    }

    let count = table.item_count();
    let average = table.total_extent() / count as f32;
    let viewport = ViewportExtent::resolve(viewport_extent, average);
    let offset = scroll_offset.max(0.0);
    let end = offset + viewport.effective();

    let raw_first = table.index_at(offset);
    // Last item whose start lies before the viewport end; items starting
    // exactly at the end are excluded, matching the uniform path.
    let raw_last = table.offsets[..count]
        .partition_point(|&start| start < end)
        .saturating_sub(1);

    let first = raw_first.saturating_sub(overscan).min(count - 1);
    let last = raw_last.saturating_add(overscan).min(count - 1).max(first);

    Ok(Window::with_fillers(
        first,
        last,
        table.offset_of(first),
        table.total_extent() - table.end_of(last),
    ))
}
