#![forbid(unsafe_code)]

//! Container resize coalescing.
//!
//! Resize observers fire in bursts, often several times between two painted
//! frames. Relayout is pure but not free, and rendering intermediate sizes
//! causes visible jitter, so the coalescer keeps only the latest observed
//! size and releases it once per frame tick. Latest-wins: intermediate
//! sizes within one frame are dropped, never queued.

use gridboard_core::geometry::PxSize;
use tracing::trace;

/// Counters for observability and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Size observations received.
    pub observed: u64,
    /// Observations overwritten before a frame consumed them.
    pub coalesced: u64,
    /// Sizes released to a frame.
    pub applied: u64,
}

/// Latest-wins size coalescer, polled once per animation frame.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    pending: Option<PxSize>,
    last_applied: Option<PxSize>,
    stats: CoalescerStats,
}

impl FrameCoalescer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed container size. Overwrites any pending size.
    pub fn observe(&mut self, size: PxSize) {
        self.stats.observed += 1;
        if self.pending.replace(size).is_some() {
            self.stats.coalesced += 1;
        }
        trace!(width = size.width, height = size.height, "container size observed");
    }

    /// Release the pending size for this frame, if it changes anything.
    ///
    /// Returns `None` when nothing was observed since the last poll or when
    /// the pending size equals the last applied one, so a caller can skip
    /// relayout entirely on quiet frames.
    pub fn poll_frame(&mut self) -> Option<PxSize> {
        let size = self.pending.take()?;
        if self.last_applied == Some(size) {
            return None;
        }
        self.last_applied = Some(size);
        self.stats.applied += 1;
        trace!(width = size.width, height = size.height, "container size applied");
        Some(size)
    }

    /// True when a poll would release a size.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some_and(|size| self.last_applied != Some(size))
    }

    #[must_use]
    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }
}
