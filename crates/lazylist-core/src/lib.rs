//! Core windowing math for virtualized lists.
//!
//! Given a scroll offset, a viewport extent, and per-item metrics, this crate
//! computes which logical items of a large list must be materialized and how
//! much filler extent stands in for the items that are skipped, so the total
//! scrollable extent stays identical to a fully materialized list.
//!
//! # Architecture
//!
//! - [`compute_window`] - pure mapping from scroll inputs to a [`Window`]
//! - [`on_scroll`] - incremental wrapper reporting whether the materialized
//!   range actually changed since the previous frame
//! - [`ExtentTable`] + [`compute_window_variable`] - prefix-sum lookup for
//!   lists with non-uniform item extents
//!
//! The crate holds no state and performs no I/O. Scroll state, prefetch
//! planning, and item providers live in `lazylist-foundation`.

mod error;
mod extent;
mod viewport;
mod window;

pub use error::LayoutError;
pub use extent::{compute_window_variable, ExtentTable};
pub use viewport::ViewportExtent;
pub use window::{compute_window, on_scroll, Window, WindowUpdate};
