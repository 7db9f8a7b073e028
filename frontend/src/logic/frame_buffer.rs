//! Latest-frame buffer between the capture thread and its readers
//!
//! One slot, overwritten on every publish. The frame and its timing stats
//! are swapped in together under one lock so readers never see a frame
//! paired with another iteration's stats.

use super::timing::TimingStats;
use super::utils::lock;
use media::VideoFrame;
use std::sync::{Arc, Mutex, MutexGuard};

/// A published frame with the timing of the iteration that produced it
pub struct BufferedFrame {
    pub frame: VideoFrame,
    pub stats: TimingStats,
    /// Publish order, starting at 1
    pub sequence: u64,
}

#[derive(Default)]
struct Slot {
    latest: Option<Arc<BufferedFrame>>,
    drop_pending: bool,
    published: u64,
}

/// Single-slot frame buffer
#[derive(Default)]
pub struct FrameBuffer {
    slot: Mutex<Slot>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffered frame
    ///
    /// A dropped-frame flag in `stats` stays pending until
    /// [`take_dropped`](Self::take_dropped) consumes it, even if later
    /// frames arrive on time.
    pub fn publish(&self, frame: VideoFrame, stats: TimingStats) {
        let mut slot = self.lock();
        slot.drop_pending |= stats.dropped;
        slot.published += 1;
        slot.latest = Some(Arc::new(BufferedFrame {
            frame,
            stats,
            sequence: slot.published,
        }));
    }

    /// Most recent frame, if any has been published
    pub fn latest(&self) -> Option<Arc<BufferedFrame>> {
        self.lock().latest.clone()
    }

    /// Returns whether a drop happened since the last call, and clears it
    pub fn take_dropped(&self) -> bool {
        std::mem::take(&mut self.lock().drop_pending)
    }

    /// Number of frames published so far
    #[cfg(test)]
    pub fn published_count(&self) -> u64 {
        self.lock().published
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        lock(&self.slot)
    }
}
