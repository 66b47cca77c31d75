/*!
 * Completion Tracker
 * Counts accepted items that have not been marked done and releases joiners
 */

use crate::core::errors::{QueueError, QueueResult};
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
struct Progress {
    unfinished: usize,
    /// Bumped every time `unfinished` drops to zero
    drains: u64,
}

/// Outstanding-work counter with a level-triggered "all done" signal
///
/// A joiner registered while work is outstanding is released by the next
/// drain even if new work arrives before it gets to run.
#[derive(Debug)]
pub struct CompletionTracker {
    progress: watch::Sender<Progress>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(Progress::default());
        Self { progress }
    }

    /// Record one accepted item
    pub fn mark_added(&self) {
        self.progress.send_modify(|p| p.unfinished += 1);
    }

    /// Record one finished item, returning how many remain
    pub fn mark_done(&self) -> QueueResult<usize> {
        let mut remaining = None;
        self.progress.send_if_modified(|p| {
            if p.unfinished == 0 {
                return false;
            }
            p.unfinished -= 1;
            if p.unfinished == 0 {
                p.drains = p.drains.wrapping_add(1);
            }
            remaining = Some(p.unfinished);
            true
        });

        match remaining {
            Some(0) => {
                debug!("all queued items finished");
                Ok(0)
            }
            Some(n) => Ok(n),
            None => {
                warn!("task_done() called with no unfinished items");
                Err(QueueError::TaskDoneOverflow)
            }
        }
    }

    /// Suspend until every accepted item has been marked done
    pub async fn join(&self) {
        let mut rx = self.progress.subscribe();
        let start = *rx.borrow_and_update();
        if start.unfinished == 0 {
            return;
        }

        // Sender lives in self, so the channel cannot close while borrowed
        let _ = rx
            .wait_for(|p| p.unfinished == 0 || p.drains != start.drains)
            .await;
    }

    pub fn unfinished(&self) -> usize {
        self.progress.borrow().unfinished
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_join_immediate_when_idle() {
        let tracker = CompletionTracker::new();
        let mut join = task::spawn(tracker.join());
        assert_ready!(join.poll());
    }

    #[test]
    fn test_mark_done_counts_down() {
        let tracker = CompletionTracker::new();
        tracker.mark_added();
        tracker.mark_added();
        assert_eq!(tracker.unfinished(), 2);
        assert_eq!(tracker.mark_done(), Ok(1));
        assert_eq!(tracker.mark_done(), Ok(0));
        assert_eq!(tracker.mark_done(), Err(QueueError::TaskDoneOverflow));
        assert_eq!(tracker.unfinished(), 0);
    }

    #[test]
    fn test_join_released_by_drain() {
        let tracker = CompletionTracker::new();
        tracker.mark_added();

        let mut join = task::spawn(tracker.join());
        assert_pending!(join.poll());

        tracker.mark_done().unwrap();
        assert!(join.is_woken());
        assert_ready!(join.poll());
    }

    #[test]
    fn test_join_survives_refill_after_drain() {
        let tracker = CompletionTracker::new();
        tracker.mark_added();

        let mut join = task::spawn(tracker.join());
        assert_pending!(join.poll());

        tracker.mark_done().unwrap();
        tracker.mark_added();
        assert_ready!(join.poll());
        assert_eq!(tracker.unfinished(), 1);
    }
}
