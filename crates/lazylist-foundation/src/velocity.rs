//! Scroll velocity tracking.
//!
//! Keeps a short history of timestamped scroll deltas and estimates the
//! current speed in px/s. The estimate feeds prefetch planning: fast flings
//! warrant deeper prefetch than slow drags. Samples older than a small
//! horizon are discarded so a pause in the gesture reads as zero velocity.

use std::collections::VecDeque;

use web_time::{Duration, Instant};

/// Samples older than this no longer contribute to the velocity estimate.
const HORIZON: Duration = Duration::from_millis(100);

/// Maximum retained samples.
const HISTORY_SIZE: usize = 20;

/// Scroll direction derived from the most recent delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards increasing offsets.
    Forward,
    /// Towards decreasing offsets.
    Backward,
}

/// Estimates scroll velocity from a stream of deltas.
#[derive(Clone, Debug, Default)]
pub struct ScrollVelocityTracker {
    samples: VecDeque<(Instant, f32)>,
    last_direction: Option<ScrollDirection>,
}

impl ScrollVelocityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll delta observed now.
    pub fn record(&mut self, delta: f32) {
        let now = Instant::now();
        if delta > 0.0 {
            self.last_direction = Some(ScrollDirection::Forward);
        } else if delta < 0.0 {
            self.last_direction = Some(ScrollDirection::Backward);
        }
        self.samples.push_back((now, delta));
        while self.samples.len() > HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.prune(now);
    }

    /// Direction of the last non-zero delta, `None` before any movement.
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.last_direction
    }

    /// Current velocity estimate in px/s.
    ///
    /// Returns `0.0` with fewer than two recent samples; a single event has
    /// no measurable duration.
    pub fn velocity(&mut self) -> f32 {
        let now = Instant::now();
        self.prune(now);
        let Some(&(oldest, _)) = self.samples.front() else {
            return 0.0;
        };
        if self.samples.len() < 2 {
            return 0.0;
        }
        let span = now.saturating_duration_since(oldest);
        let seconds = span.as_secs_f32();
        if seconds <= 0.0 {
            return 0.0;
        }
        let travelled: f32 = self.samples.iter().map(|&(_, delta)| delta).sum();
        travelled / seconds
    }

    /// Forgets all history, e.g. when the gesture ends.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_direction = None;
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&(t, _)) = self.samples.front() {
            if now.saturating_duration_since(t) > HORIZON {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}
