//! Prefetch planning.
//!
//! Materializing an item the frame it scrolls into view can miss the frame
//! budget. Prefetching prepares a few items beyond the window in the
//! direction of travel so they are ready before they become visible.

use smallvec::SmallVec;

use lazylist_core::Window;

use crate::velocity::ScrollDirection;

/// Index buffer returned by [`plan_prefetch`].
pub type PrefetchIndices = SmallVec<[usize; 8]>;

/// Tuning for prefetch planning.
#[derive(Clone, Copy, Debug)]
pub struct PrefetchStrategy {
    /// Items prepared beyond the window at normal scroll speeds.
    pub depth: usize,
    /// Depth used when the scroll speed exceeds `boost_threshold`.
    pub boosted_depth: usize,
    /// Speed in px/s beyond which `boosted_depth` applies.
    pub boost_threshold: f32,
    /// Disables prefetching entirely when `false`.
    pub enabled: bool,
}

impl Default for PrefetchStrategy {
    fn default() -> Self {
        Self {
            depth: 2,
            boosted_depth: 6,
            boost_threshold: 1_500.0,
            enabled: true,
        }
    }
}

impl PrefetchStrategy {
    /// Depth to use at the given scroll speed.
    pub fn effective_depth(&self, velocity: f32) -> usize {
        if !self.enabled {
            return 0;
        }
        if velocity.abs() >= self.boost_threshold {
            self.boosted_depth
        } else {
            self.depth
        }
    }
}

/// Plans which indices to prepare ahead of the window.
///
/// Indices run outward from the window edge in the direction of travel,
/// nearest first, clamped to the list bounds. With no recorded direction the
/// plan looks forward; lists overwhelmingly open at the top and scroll down.
pub fn plan_prefetch(
    window: &Window,
    item_count: usize,
    direction: Option<ScrollDirection>,
    velocity: f32,
    strategy: &PrefetchStrategy,
) -> PrefetchIndices {
    let mut plan = PrefetchIndices::new();
    let depth = strategy.effective_depth(velocity);
    if depth == 0 || window.is_empty() {
        return plan;
    }

    match direction.unwrap_or(ScrollDirection::Forward) {
        ScrollDirection::Forward => {
            let last = window.last_visible().unwrap_or(0);
            for step in 1..=depth {
                let index = last.saturating_add(step);
                if index >= item_count {
                    break;
                }
                plan.push(index);
            }
        }
        ScrollDirection::Backward => {
            let first = window.first_visible().unwrap_or(0);
            for step in 1..=depth {
                if first < step {
                    break;
                }
                plan.push(first - step);
            }
        }
    }
    plan
}
