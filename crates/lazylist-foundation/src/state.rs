//! Scroll session state for a windowed list.
//!
//! The core window math is pure; this is the mutable session wrapped around
//! it. It accumulates raw scroll deltas between frames, resolves programmatic
//! scroll-to requests, clamps the absolute offset to the scrollable range,
//! and recomputes the window once per layout pass. It also owns the
//! measured-extent cache and the prefetch plan.
//!
//! One instance per scrollable list, owned by whatever drives that list's
//! layout. All methods take `&mut self`; the scroll/render loop is single
//! threaded.

use std::collections::{HashMap, VecDeque};

use lazylist_core::{on_scroll, ExtentTable, LayoutError, Window, WindowUpdate};

use crate::nearest::NearestRange;
use crate::prefetch::{plan_prefetch, PrefetchIndices, PrefetchStrategy};
use crate::provider::ListItems;
use crate::velocity::ScrollVelocityTracker;

/// Fallback item extent used before anything has been measured.
/// 48.0 is a common list row height (Material Design list tile).
pub const DEFAULT_ITEM_EXTENT_ESTIMATE: f32 = 48.0;

/// Measured extents kept in the cache.
const EXTENT_CACHE_CAPACITY: usize = 100;

/// A materialized item's position within the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    /// Index into the logical list.
    pub index: usize,
    /// Offset of the item's leading edge from the viewport start. Negative
    /// for overscan items above the visible area.
    pub offset: f32,
}

/// Scroll state for one windowed list.
pub struct ListWindowState {
    scroll_offset: f32,
    pending_delta: f32,
    pending_scroll_to: Option<(usize, f32)>,
    window: Window,
    /// First truly visible item (overscan excluded) and the distance the
    /// scroll position sits inside it. `None` until the first layout pass.
    anchor: Option<(usize, f32)>,
    /// Key of the anchor item, bound via [`ListWindowState::bind_keys`].
    first_visible_key: Option<u64>,
    nearest: NearestRange,
    extent_cache: HashMap<usize, f32>,
    extent_lru: VecDeque<usize>,
    average_extent: f32,
    measured_count: usize,
    velocity: ScrollVelocityTracker,
    prefetch_strategy: PrefetchStrategy,
    prefetch_queue: PrefetchIndices,
    can_forward: bool,
    can_backward: bool,
}

impl Default for ListWindowState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListWindowState {
    /// State positioned at the start of the list.
    pub fn new() -> Self {
        Self::with_offset(0.0)
    }

    /// State positioned at an initial scroll offset.
    pub fn with_offset(scroll_offset: f32) -> Self {
        Self {
            scroll_offset: scroll_offset.max(0.0),
            pending_delta: 0.0,
            pending_scroll_to: None,
            window: Window::empty(),
            anchor: None,
            first_visible_key: None,
            nearest: NearestRange::new(0),
            extent_cache: HashMap::new(),
            extent_lru: VecDeque::new(),
            average_extent: DEFAULT_ITEM_EXTENT_ESTIMATE,
            measured_count: 0,
            velocity: ScrollVelocityTracker::new(),
            prefetch_strategy: PrefetchStrategy::default(),
            prefetch_queue: PrefetchIndices::new(),
            can_forward: false,
            can_backward: false,
        }
    }

    /// The absolute scroll offset as of the last layout pass.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The window computed by the last layout pass.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Index of the first visible item (overscan excluded).
    pub fn first_visible_item(&self) -> Option<usize> {
        self.anchor.map(|(index, _)| index)
    }

    /// Distance the scroll position sits inside the first visible item.
    pub fn first_visible_item_offset(&self) -> f32 {
        self.anchor.map_or(0.0, |(_, within)| within)
    }

    /// Whether content remains beyond the viewport end.
    pub fn can_scroll_forward(&self) -> bool {
        self.can_forward
    }

    /// Whether content remains before the viewport start.
    pub fn can_scroll_backward(&self) -> bool {
        self.can_backward
    }

    /// Queues a raw scroll delta for the next layout pass and returns it.
    ///
    /// Deltas accumulate; several input events between two frames resolve as
    /// one movement.
    pub fn dispatch_scroll_delta(&mut self, delta: f32) -> f32 {
        self.pending_delta += delta;
        self.velocity.record(delta);
        delta
    }

    /// The not-yet-consumed scroll delta.
    pub fn peek_scroll_delta(&self) -> f32 {
        self.pending_delta
    }

    /// Requests a programmatic scroll placing `index` at the viewport start,
    /// shifted by `offset_within_item`. Consumed by the next layout pass.
    pub fn scroll_to_item(&mut self, index: usize, offset_within_item: f32) {
        self.pending_scroll_to = Some((index, offset_within_item.max(0.0)));
        self.first_visible_key = None;
        self.velocity.reset();
    }

    /// Resolves the pending scroll movement and recomputes the window.
    ///
    /// Call once per layout pass with the current viewport and item metrics.
    /// Returns the core [`WindowUpdate`]; when `range_changed` is `false` the
    /// renderer's materialized set is already correct.
    ///
    /// # Errors
    /// [`LayoutError`] on non-positive viewport or item extents. Pending
    /// scroll input is preserved, so a later call with corrected metrics
    /// resolves it.
    pub fn update_layout(
        &mut self,
        viewport_extent: f32,
        item_extent: f32,
        item_count: usize,
        overscan: usize,
    ) -> Result<WindowUpdate, LayoutError> {
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

        let mut target = match self.pending_scroll_to {
            Some((index, within)) => {
                index.min(item_count.saturating_sub(1)) as f32 * item_extent + within
            }
            None => self.scroll_offset,
        };
        target += self.pending_delta;

        let total = item_count as f32 * item_extent;
        let max_scroll = (total - viewport_extent.min(total)).max(0.0);
        target = target.clamp(0.0, max_scroll);

        let update = on_scroll(
            &self.window,
            target,
            viewport_extent,
            item_extent,
            item_count,
            overscan,
        )?;

        self.pending_scroll_to = None;
        self.pending_delta = 0.0;
        self.scroll_offset = target;
        self.window = update.window;
        self.can_backward = target > 0.0;
        self.can_forward = target < max_scroll;

        self.anchor = if item_count == 0 {
            None
        } else {
            let index = ((target / item_extent).floor() as usize).min(item_count - 1);
            Some((index, target - index as f32 * item_extent))
        };
        if let Some((index, _)) = self.anchor {
            self.nearest.update(index);
        }

        let velocity = self.velocity.velocity();
        self.prefetch_queue = plan_prefetch(
            &self.window,
            item_count,
            self.velocity.direction(),
            velocity,
            &self.prefetch_strategy,
        );

        Ok(update)
    }

    /// Records the key of the current first visible item.
    ///
    /// Call after a layout pass whenever key-stable scrolling is wanted; the
    /// recorded key is what [`ListWindowState::reconcile_items`] re-anchors
    /// on after the data set changes.
    pub fn bind_keys(&mut self, items: &impl ListItems) {
        self.first_visible_key = self
            .anchor
            .and_then(|(index, _)| (index < items.item_count()).then(|| items.key(index)));
    }

    /// Re-anchors the scroll offset after the data set changed.
    ///
    /// Looks up the previously bound first-visible key (nearest range first,
    /// then a full scan) and shifts the offset so that item stays first. A
    /// vanished key leaves the offset where it is; the next layout pass
    /// clamps it.
    pub fn reconcile_items(&mut self, items: &impl ListItems, item_extent: f32) {
        let Some((old_index, within)) = self.anchor else {
            return;
        };
        let Some(key) = self.first_visible_key else {
            return;
        };
        let count = items.item_count();
        let new_index = items
            .index_of_key_within(key, self.nearest.range())
            .or_else(|| items.index_of_key(key))
            .unwrap_or_else(|| old_index.min(count.saturating_sub(1)));
        if new_index != old_index {
            log::debug!("scroll anchor followed key {key} from index {old_index} to {new_index}");
            self.scroll_offset = new_index as f32 * item_extent + within;
            self.anchor = Some((new_index, within));
            self.nearest.update(new_index);
        }
    }

    /// Caches the measured extent of an item and updates the running average.
    ///
    /// The cache is a bounded LRU; re-recording an item refreshes it.
    /// Non-positive or non-finite extents are ignored.
    pub fn record_item_extent(&mut self, index: usize, extent: f32) {
        if !extent.is_finite() || extent <= 0.0 {
            log::debug!("ignoring invalid measured extent {extent} for item {index}");
            return;
        }

        if let Some(slot) = self.extent_cache.get_mut(&index) {
            *slot = extent;
            if let Some(pos) = self.extent_lru.iter().position(|&i| i == index) {
                self.extent_lru.remove(pos);
            }
            self.extent_lru.push_back(index);
            return;
        }

        while self.extent_cache.len() >= EXTENT_CACHE_CAPACITY {
            match self.extent_lru.pop_front() {
                Some(oldest) => {
                    self.extent_cache.remove(&oldest);
                }
                None => break,
            }
        }

        self.extent_cache.insert(index, extent);
        self.extent_lru.push_back(index);
        self.measured_count += 1;
        let n = self.measured_count as f32;
        self.average_extent = self.average_extent * ((n - 1.0) / n) + extent / n;
    }

    /// The cached measured extent for `index`, if still resident.
    pub fn cached_extent(&self, index: usize) -> Option<f32> {
        self.extent_cache.get(&index).copied()
    }

    /// Running average of all recorded extents, or the default estimate.
    pub fn average_item_extent(&self) -> f32 {
        self.average_extent
    }

    /// Builds a prefix-sum extent table for a variable-extent list.
    ///
    /// Each item uses its measured extent when cached, else the provider's
    /// hint, else the running average.
    pub fn extent_table(&self, items: &impl ListItems) -> Result<ExtentTable, LayoutError> {
        ExtentTable::from_extents((0..items.item_count()).map(|index| {
            self.cached_extent(index)
                .or_else(|| items.extent_hint(index))
                .unwrap_or(self.average_extent)
        }))
    }

    /// Replaces the prefetch strategy.
    pub fn set_prefetch_strategy(&mut self, strategy: PrefetchStrategy) {
        self.prefetch_strategy = strategy;
    }

    /// Drains the indices planned for prefetch by the last layout pass.
    pub fn take_prefetch_indices(&mut self) -> PrefetchIndices {
        std::mem::take(&mut self.prefetch_queue)
    }

    /// Viewport-relative placements for the materialized items.
    ///
    /// Offsets are measured from the viewport start; overscan items above the
    /// visible area come out negative.
    pub fn visible_placements(&self, item_extent: f32) -> impl Iterator<Item = ItemPlacement> + '_ {
        let scroll_offset = self.scroll_offset;
        self.window.indices().map(move |index| ItemPlacement {
            index,
            offset: index as f32 * item_extent - scroll_offset,
        })
    }
}
