//! Scroll state, prefetch planning, and item providers for lazylist.
//!
//! `lazylist-core` is a pure function; this crate is the stateful session an
//! application embeds around it:
//!
//! - [`ListWindowState`] - accumulates scroll deltas between frames, resolves
//!   programmatic scroll-to requests, and recomputes the window once per
//!   layout pass
//! - [`ListItems`] - the data-source trait (count, stable keys, extent hints)
//! - [`plan_prefetch`] - direction-aware prefetch planning beyond the window
//! - [`ScrollVelocityTracker`] - scroll speed estimation feeding prefetch
//!   depth
//!
//! Materialized visuals stay owned by the renderer; nothing here creates or
//! destroys them.

mod nearest;
mod prefetch;
mod provider;
mod state;
mod velocity;


pub use nearest::{NearestRange, NearestRangeConfig};
pub use prefetch::{plan_prefetch, PrefetchIndices, PrefetchStrategy};
pub use provider::ListItems;
pub use state::{ItemPlacement, ListWindowState, DEFAULT_ITEM_EXTENT_ESTIMATE};
pub use velocity::{ScrollDirection, ScrollVelocityTracker};
