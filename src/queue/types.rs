/*!
 * Queue Types
 * Events, statistics, and lifetime counters
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Change notification broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QueueEvent {
    /// An item was queued at `position`; `len` is the new length
    Added { position: usize, len: usize },
    /// An item was taken from `position`; `len` is the new length
    Taken { position: usize, len: usize },
    /// The buffer was emptied by `clear`
    Cleared { removed: usize },
    /// Order changed through `reverse` or `shuffle`
    Reordered,
    /// Every accepted item has been marked done
    Drained,
}

/// Point-in-time queue statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub length: usize,
    pub capacity: Option<usize>,
    pub waiting_getters: usize,
    pub waiting_putters: usize,
    pub unfinished: usize,
    pub items_put: u64,
    pub items_taken: u64,
    pub cancelled_waiters: u64,
    pub forwarded_wakeups: u64,
}

/// Lifetime counters, readable without the queue lock
#[derive(Debug, Default)]
pub(super) struct QueueCounters {
    pub items_put: AtomicU64,
    pub items_taken: AtomicU64,
    pub cancelled_waiters: AtomicU64,
    pub forwarded_wakeups: AtomicU64,
}

impl QueueCounters {
    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn read(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}
