//! Window computation for uniform-extent lists.
//!
//! This is the virtualization core: a pure, deterministic mapping from
//! `(scroll offset, viewport extent, item extent, item count, overscan)` to
//! the inclusive range of item indices that must be materialized, plus the
//! leading and trailing filler extents standing in for everything else.

use crate::error::LayoutError;
use crate::viewport::ViewportExtent;

/// The result of a window computation.
///
/// Holds the inclusive range of materialized item indices and the filler
/// extents before and after it. The fillers are synthesized so that
///
/// ```text
/// leading + materialized + trailing == item_count * item_extent
/// ```
///
/// holds for every window position, which keeps scrollbar and scroll-physics
/// math correct even though most items are never materialized.
///
/// An empty list produces the empty window: no indices, both fillers zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    range: Option<(usize, usize)>,
    leading_filler: f32,
    trailing_filler: f32,
}

impl Window {
    /// The window over an empty list.
    pub const fn empty() -> Self {
        Self {
            range: None,
            leading_filler: 0.0,
            trailing_filler: 0.0,
        }
    }

    /// Window spanning `first..=last` in a uniform-extent list.
    pub(crate) fn spanning(first: usize, last: usize, max_index: usize, item_extent: f32) -> Self {
        Self {
            range: Some((first, last)),
            leading_filler: first as f32 * item_extent,
            trailing_filler: (max_index - last) as f32 * item_extent,
        }
    }

    /// Window with explicitly computed fillers (variable-extent path).
    pub(crate) fn with_fillers(
        first: usize,
        last: usize,
        leading_filler: f32,
        trailing_filler: f32,
    ) -> Self {
        Self {
            range: Some((first, last)),
            leading_filler,
            trailing_filler,
        }
    }

    /// Index of the first materialized item, `None` for the empty window.
    pub fn first_visible(&self) -> Option<usize> {
        self.range.map(|(first, _)| first)
    }

    /// Index of the last materialized item, `None` for the empty window.
    pub fn last_visible(&self) -> Option<usize> {
        self.range.map(|(_, last)| last)
    }

    /// The materialized indices as a half-open range (empty when no items).
    pub fn indices(&self) -> std::ops::Range<usize> {
        match self.range {
            Some((first, last)) => first..last + 1,
            None => 0..0,
        }
    }

    /// Number of materialized items.
    pub fn len(&self) -> usize {
        match self.range {
            Some((first, last)) => last - first + 1,
            None => 0,
        }
    }

    /// Whether the window materializes no items.
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// Whether `index` falls inside the materialized range.
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.range, Some((first, last)) if first <= index && index <= last)
    }

    /// Filler extent standing in for the items before the window.
    #[inline]
    pub fn leading_filler(&self) -> f32 {
        self.leading_filler
    }

    /// Filler extent standing in for the items after the window.
    #[inline]
    pub fn trailing_filler(&self) -> f32 {
        self.trailing_filler
    }

    /// Whether both windows materialize the same index range.
    ///
    /// Fillers are ignored; this is the comparison [`on_scroll`] uses to let
    /// renderers skip instantiate/destroy work on sub-item scroll movement.
    pub fn same_range(&self, other: &Window) -> bool {
        self.range == other.range
    }
}

/// Result of an incremental window update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowUpdate {
    /// The freshly computed window.
    pub window: Window,
    /// Whether the materialized index range differs from the previous window.
    pub range_changed: bool,
}

/// Clamps an index computed in floating point into `[0, max_index]`.
///
/// The comparison happens before the cast so offsets far past the end of the
/// list (the list shrank mid-scroll) cannot truncate into a bogus index.
fn clamp_index(value: f64, max_index: usize) -> usize {
    if value <= 0.0 {
        0
    } else if value >= max_index as f64 {
        max_index
    } else {
        value as usize
    }
}

/// Computes the window of items to materialize.
///
/// # Arguments
/// * `scroll_offset` - distance scrolled from the start; negative values are
///   clamped to zero
/// * `viewport_extent` - visible extent along the scroll axis; must be
///   positive (unbounded extents fall back to a fixed item budget)
/// * `item_extent` - uniform extent of every item; must be positive and
///   finite
/// * `item_count` - logical length of the list
/// * `overscan` - extra items materialized on each side of the visible range
///   to mask pop-in during fast scrolling
///
/// # Errors
/// [`LayoutError::InvalidViewport`] and [`LayoutError::InvalidMetric`] on
/// non-positive inputs. Every other out-of-range condition is clamped: the
/// window collapses onto the nearest valid items and the fillers absorb the
/// rest.
pub fn compute_window(
    scroll_offset: f32,
    viewport_extent: f32,
    item_extent: f32,
    item_count: usize,
    overscan: usize,
) -> Result<Window, LayoutError> {
    if viewport_extent.is_nan() || viewport_extent <= 0.0 {
        return Err(LayoutError::InvalidViewport {
            extent: viewport_extent,
        });
    }
    if !item_extent.is_finite() || item_extent <= 0.0 {
        return Err(LayoutError::InvalidMetric {
            extent: item_extent,
        });
    }
    if item_count == 0 {
        return Ok(Window::empty());
    }

    let viewport = ViewportExtent::resolve(viewport_extent, item_extent);
    let offset = scroll_offset.max(0.0);
    let max_index = item_count - 1;

    let raw_first = (offset / item_extent).floor() as f64;
    // Ceiling keeps an item that is only partially visible at the trailing
    // edge inside the range.
    let raw_last = ((offset + viewport.effective()) / item_extent).ceil() as f64 - 1.0;

    let first = clamp_index(raw_first - overscan as f64, max_index);
    let mut last = clamp_index(raw_last + overscan as f64, max_index);
    if last < first {
        last = first;
    }

    Ok(Window::spanning(first, last, max_index, item_extent))
}

/// Recomputes the window and reports whether the materialized range moved.
///
/// Renderers call this once per scroll event or frame; when
/// [`WindowUpdate::range_changed`] is `false` the previous set of
/// materialized items is still exactly right and no instantiate/destroy work
/// is needed, only a filler/offset adjustment.
pub fn on_scroll(
    previous: &Window,
    scroll_offset: f32,
    viewport_extent: f32,
    item_extent: f32,
    item_count: usize,
    overscan: usize,
) -> Result<WindowUpdate, LayoutError> {
    let window = compute_window(
        scroll_offset,
        viewport_extent,
        item_extent,
        item_count,
        overscan,
    )?;
    Ok(WindowUpdate {
        range_changed: !window.same_range(previous),
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(offset: f32, viewport: f32, extent: f32, count: usize, overscan: usize) -> Window {
        compute_window(offset, viewport, extent, count, overscan).unwrap()
    }

    fn assert_conserved(w: &Window, extent: f32, count: usize) {
        let materialized = w.len() as f32 * extent;
        let total = w.leading_filler() + materialized + w.trailing_filler();
        assert_eq!(
            total,
            count as f32 * extent,
            "extent not conserved for {w:?}"
        );
    }

    #[test]
    fn test_window_at_list_start() {
        let w = window(0.0, 300.0, 50.0, 1000, 0);
        assert_eq!(w.first_visible(), Some(0));
        assert_eq!(w.last_visible(), Some(5));
        assert_eq!(w.leading_filler(), 0.0);
        assert_eq!(w.trailing_filler(), 994.0 * 50.0);
    }

    #[test]
    fn test_window_mid_scroll() {
        // Offset 275 puts item 5 half off-screen at the top and item 11
        // partially visible at the bottom (it starts at 550 < 575).
        let w = window(275.0, 300.0, 50.0, 1000, 0);
        assert_eq!(w.first_visible(), Some(5));
        assert_eq!(w.last_visible(), Some(11));
        assert_eq!(w.leading_filler(), 250.0);
        assert_eq!(w.trailing_filler(), 988.0 * 50.0);
    }

    #[test]
    fn test_list_shorter_than_viewport() {
        let w = window(0.0, 1000.0, 50.0, 10, 0);
        assert_eq!(w.first_visible(), Some(0));
        assert_eq!(w.last_visible(), Some(9));
        assert_eq!(w.leading_filler(), 0.0);
        assert_eq!(w.trailing_filler(), 0.0);
    }

    #[test]
    fn test_overscan_widens_both_sides() {
        let w = window(0.0, 300.0, 50.0, 1000, 2);
        assert_eq!(w.first_visible(), Some(0));
        assert_eq!(w.last_visible(), Some(7));

        let w = window(500.0, 300.0, 50.0, 1000, 2);
        assert_eq!(w.first_visible(), Some(8));
        assert_eq!(w.last_visible(), Some(17));
        assert_conserved(&w, 50.0, 1000);
    }

    #[test]
    fn test_empty_list() {
        let w = window(0.0, 300.0, 50.0, 0, 0);
        assert!(w.is_empty());
        assert_eq!(w.first_visible(), None);
        assert_eq!(w.len(), 0);
        assert_eq!(w.leading_filler(), 0.0);
        assert_eq!(w.trailing_filler(), 0.0);
    }

    #[test]
    fn test_negative_offset_clamps_to_start() {
        assert_eq!(window(-40.0, 300.0, 50.0, 100, 0), window(0.0, 300.0, 50.0, 100, 0));
    }

    #[test]
    fn test_overscroll_collapses_to_last_item() {
        // Offset far past the total extent, as after a large deletion.
        let w = window(1_000_000.0, 300.0, 50.0, 10, 0);
        assert_eq!(w.first_visible(), Some(9));
        assert_eq!(w.last_visible(), Some(9));
        assert_eq!(w.trailing_filler(), 0.0);
        assert_conserved(&w, 50.0, 10);
    }

    #[test]
    fn test_overscan_applies_before_index_clamp() {
        // Overscroll with overscan must not let the clamp eat the overscan
        // margin twice; the range still collapses onto the last item.
        let w = window(1_000_000.0, 300.0, 50.0, 10, 3);
        assert_eq!(w.first_visible(), Some(9));
        assert_eq!(w.last_visible(), Some(9));
    }

    #[test]
    fn test_single_item_list() {
        let w = window(0.0, 300.0, 50.0, 1, 0);
        assert_eq!(w.first_visible(), Some(0));
        assert_eq!(w.last_visible(), Some(0));
        assert_eq!(w.leading_filler(), 0.0);
        assert_eq!(w.trailing_filler(), 0.0);
    }

    #[test]
    fn test_exact_boundary_offsets() {
        // Offset exactly at an item boundary: the item below the boundary is
        // fully scrolled out and must not be materialized.
        let w = window(100.0, 300.0, 50.0, 1000, 0);
        assert_eq!(w.first_visible(), Some(2));
        // 100 + 300 = 400 lands exactly on the start of item 8, so item 7 is
        // the last one intersecting the viewport.
        assert_eq!(w.last_visible(), Some(7));
    }

    #[test]
    fn test_conservation_across_positions() {
        for overscan in [0usize, 1, 3] {
            let mut offset = 0.0;
            while offset < 60_000.0 {
                let w = window(offset, 300.0, 50.0, 1000, overscan);
                assert_conserved(&w, 50.0, 1000);
                offset += 37.0;
            }
        }
    }

    #[test]
    fn test_monotonic_in_scroll_offset() {
        let mut previous = window(0.0, 300.0, 50.0, 1000, 1);
        let mut offset = 0.0;
        while offset < 55_000.0 {
            let w = window(offset, 300.0, 50.0, 1000, 1);
            assert!(w.first_visible() >= previous.first_visible());
            assert!(w.last_visible() >= previous.last_visible());
            previous = w;
            offset += 13.0;
        }
    }

    #[test]
    fn test_coverage_of_intersecting_items() {
        let extent = 50.0;
        let viewport = 300.0;
        for offset in [0.0f32, 25.0, 275.0, 333.0, 49_900.0] {
            let w = window(offset, viewport, extent, 1000, 0);
            for i in 0..1000usize {
                let start = i as f32 * extent;
                let end = start + extent;
                let intersects = start < offset + viewport && end > offset;
                if intersects {
                    assert!(w.contains(i), "item {i} visible at offset {offset} but not in {w:?}");
                }
            }
        }
    }

    #[test]
    fn test_referential_transparency() {
        let a = compute_window(275.0, 300.0, 50.0, 1000, 2).unwrap();
        let b = compute_window(275.0, 300.0, 50.0, 1000, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_viewport_rejected() {
        assert_eq!(
            compute_window(0.0, 0.0, 50.0, 10, 0),
            Err(LayoutError::InvalidViewport { extent: 0.0 })
        );
        assert!(compute_window(0.0, -5.0, 50.0, 10, 0).is_err());
        assert!(compute_window(0.0, f32::NAN, 50.0, 10, 0).is_err());
    }

    #[test]
    fn test_invalid_metric_rejected() {
        assert_eq!(
            compute_window(0.0, 300.0, 0.0, 10, 0),
            Err(LayoutError::InvalidMetric { extent: 0.0 })
        );
        assert!(compute_window(0.0, 300.0, -1.0, 10, 0).is_err());
        assert!(compute_window(0.0, 300.0, f32::INFINITY, 10, 0).is_err());
    }

    #[test]
    fn test_on_scroll_sub_item_movement_keeps_range() {
        // At offset 275 the window is 5..=11 with both edges mid-item; 15px
        // of movement crosses no boundary, so the range is unchanged even
        // though the scroll position moved.
        let first = compute_window(275.0, 300.0, 50.0, 1000, 0).unwrap();
        let update = on_scroll(&first, 290.0, 300.0, 50.0, 1000, 0).unwrap();
        assert!(!update.range_changed);
        assert!(update.window.same_range(&first));
    }

    #[test]
    fn test_on_scroll_crossing_boundary_changes_range() {
        let first = compute_window(0.0, 300.0, 50.0, 1000, 0).unwrap();
        let update = on_scroll(&first, 60.0, 300.0, 50.0, 1000, 0).unwrap();
        assert!(update.range_changed);
        assert_eq!(update.window.first_visible(), Some(1));
    }

    #[test]
    fn test_on_scroll_count_change_changes_range() {
        let first = compute_window(49_900.0, 300.0, 50.0, 1000, 0).unwrap();
        // The list shrank under the scroll position; the window collapses.
        let update = on_scroll(&first, 49_900.0, 300.0, 50.0, 10, 0).unwrap();
        assert!(update.range_changed);
        assert_eq!(update.window.first_visible(), Some(9));
    }

    #[test]
    fn test_indices_iteration() {
        let w = window(275.0, 300.0, 50.0, 1000, 0);
        let indices: Vec<usize> = w.indices().collect();
        assert_eq!(indices, (5..=11).collect::<Vec<_>>());
        assert_eq!(w.len(), 7);
    }
}
