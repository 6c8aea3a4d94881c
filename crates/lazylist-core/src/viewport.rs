//! Viewport extent resolution.
//!
//! Detects infinite or absurdly large viewports (a list placed in an
//! unconstrained parent) and substitutes a bounded fallback extent so the
//! window computation stays finite.

/// Largest viewport extent treated as a real measurement.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Number of items' worth of extent used when the viewport is unbounded.
const FALLBACK_ITEM_COUNT: f32 = 20.0;

/// A validated viewport extent, clamped when the raw value is unbounded.
#[derive(Clone, Copy, Debug)]
pub struct ViewportExtent {
    effective: f32,
    clamped: bool,
}

impl ViewportExtent {
    /// Resolves a raw viewport extent against the item extent.
    ///
    /// An infinite or unreasonably large extent is replaced with
    /// [`FALLBACK_ITEM_COUNT`] items' worth of space. The caller is expected
    /// to have rejected non-positive extents already.
    pub fn resolve(raw: f32, item_extent: f32) -> Self {
        let clamped = raw.is_infinite() || raw > MAX_REASONABLE_VIEWPORT;
        let effective = if clamped {
            let fallback = item_extent * FALLBACK_ITEM_COUNT;
            log::warn!(
                "unbounded viewport extent ({raw}), using fallback {fallback}; \
                 constrain the scrollable container to avoid this"
            );
            fallback
        } else {
            raw
        };
        Self { effective, clamped }
    }

    /// The extent to use for window computation.
    #[inline]
    pub fn effective(&self) -> f32 {
        self.effective
    }

    /// Whether the raw extent was replaced with the fallback.
    #[inline]
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}
