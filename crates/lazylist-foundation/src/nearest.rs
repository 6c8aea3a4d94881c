//! Sliding window bounding key→index searches.
//!
//! Scanning the whole list for a key is `O(N)`. Items rarely move far between
//! frames, so searches are bounded to a block of indices around the first
//! visible item. The block only shifts when the first visible index crosses a
//! block boundary, keeping the range stable across small scrolls.

use std::ops::Range;

/// Block sizing for [`NearestRange`].
#[derive(Clone, Copy, Debug)]
pub struct NearestRangeConfig {
    /// Width of one block; the range recomputes when the first visible item
    /// leaves its current block.
    pub block: usize,
    /// Extra indices included on each side of the block.
    pub extra: usize,
}

impl Default for NearestRangeConfig {
    fn default() -> Self {
        Self {
            block: 30,
            extra: 100,
        }
    }
}

/// Tracks the index range worth searching for item keys.
#[derive(Clone, Debug)]
pub struct NearestRange {
    config: NearestRangeConfig,
    block_index: usize,
    range: Range<usize>,
}

impl NearestRange {
    /// Creates a range anchored at `first_visible` with default block sizes.
    pub fn new(first_visible: usize) -> Self {
        Self::with_config(first_visible, NearestRangeConfig::default())
    }

    /// Creates a range anchored at `first_visible` with custom block sizes.
    pub fn with_config(first_visible: usize, config: NearestRangeConfig) -> Self {
        let block_index = first_visible / config.block.max(1);
        Self {
            range: Self::range_for(block_index, &config),
            block_index,
            config,
        }
    }

    /// The current search range. May extend past the list end; callers clamp.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Re-anchors on a new first visible index.
    ///
    /// Returns `true` when the range actually moved (a block boundary was
    /// crossed).
    pub fn update(&mut self, first_visible: usize) -> bool {
        let block_index = first_visible / self.config.block.max(1);
        if block_index == self.block_index {
            return false;
        }
        self.block_index = block_index;
        self.range = Self::range_for(block_index, &self.config);
        true
    }

    fn range_for(block_index: usize, config: &NearestRangeConfig) -> Range<usize> {
        let block_start = block_index.saturating_mul(config.block);
        let start = block_start.saturating_sub(config.extra);
        let end = block_start
            .saturating_add(config.block)
            .saturating_add(config.extra);
        start..end
    }
}
