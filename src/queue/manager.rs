/*!
 * Playback Queue
 * Shared state, construction, and non-suspending operations
 */

use super::buffer::OrderedBuffer;
use super::completion::CompletionTracker;
use super::config::QueueConfig;
use super::types::{QueueCounters, QueueEvent, QueueStats};
use crate::core::errors::QueueResult;
use crate::core::limits::MAX_QUEUE_CAPACITY;
use crate::core::sync::{Waiter, WaiterRegistry};
use parking_lot::Mutex;
use rand::Rng;
use std::fmt;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Everything guarded by the queue lock
pub(super) struct QueueState<T> {
    pub buffer: OrderedBuffer<T>,
    pub getters: WaiterRegistry,
    pub putters: WaiterRegistry,
}

/// Which registry a suspended call is parked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WaiterRole {
    Getter,
    Putter,
}

/// Ordered, cancellation-safe playback queue
///
/// Share it between producers and the playback loop with an `Arc`. Buffer,
/// waiter registries, and the completion count change together under one
/// lock, and the lock is never held across a suspension point.
///
/// # Examples
///
/// ```
/// use playback_queue::PlaybackQueue;
///
/// # tokio_test::block_on(async {
/// let queue = PlaybackQueue::new();
/// queue.put("intro").await;
/// queue.put("outro").await;
/// queue.put_pos("verse", 1).await.unwrap();
///
/// assert_eq!(queue.get().await, "intro");
/// assert_eq!(queue.get().await, "verse");
/// # });
/// ```
pub struct PlaybackQueue<T> {
    pub(super) state: Mutex<QueueState<T>>,
    pub(super) tracker: CompletionTracker,
    pub(super) capacity: Option<usize>,
    pub(super) events: broadcast::Sender<QueueEvent>,
    pub(super) counters: QueueCounters,
}

impl<T> PlaybackQueue<T> {
    /// Create an unbounded queue
    pub fn new() -> Self {
        Self::build(QueueConfig::unbounded())
    }

    /// Create a queue from a validated configuration
    pub fn with_config(config: QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: QueueConfig) -> Self {
        let capacity = config.capacity.map(|capacity| {
            if capacity > MAX_QUEUE_CAPACITY {
                warn!(
                    requested = capacity,
                    max = MAX_QUEUE_CAPACITY,
                    "queue capacity clamped"
                );
            }
            capacity.min(MAX_QUEUE_CAPACITY)
        });
        let (events, _) = broadcast::channel(config.event_buffer);

        debug!(?capacity, event_buffer = config.event_buffer, "playback queue created");
        Self {
            state: Mutex::new(QueueState {
                buffer: OrderedBuffer::new(),
                getters: WaiterRegistry::new("getter"),
                putters: WaiterRegistry::new("putter"),
            }),
            tracker: CompletionTracker::new(),
            capacity,
            events,
            counters: QueueCounters::default(),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    /// Drop every buffered item, returning how many were removed
    ///
    /// Does not touch the completion count. In a bounded queue the freed
    /// room is handed to suspended producers.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.buffer.clear();
        if removed > 0 {
            let mut woken = 0;
            for _ in 0..removed {
                let wake = state.putters.resolve_next();
                if !wake.is_woken() {
                    break;
                }
                woken += wake.count();
            }
            debug!(removed, putters_woken = woken, "queue cleared");
            self.emit(QueueEvent::Cleared { removed });
        }
        removed
    }

    pub fn reverse(&self) {
        self.state.lock().buffer.reverse();
        self.emit(QueueEvent::Reordered);
    }

    pub fn shuffle(&self) {
        self.state.lock().buffer.shuffle();
        self.emit(QueueEvent::Reordered);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.state.lock().buffer.shuffle_with(rng);
        self.emit(QueueEvent::Reordered);
    }

    /// Remove the item at `pos` without suspending
    ///
    /// Used for skip/remove commands. The completion count is unchanged
    /// because the item was never handed to the consumer.
    pub fn remove(&self, pos: usize) -> QueueResult<T> {
        let mut state = self.state.lock();
        let item = state.buffer.pop_at(pos)?;
        state.putters.resolve_next();
        self.emit(QueueEvent::Taken {
            position: pos,
            len: state.buffer.len(),
        });
        Ok(item)
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    /// Items accepted but not yet marked done
    pub fn unfinished(&self) -> usize {
        self.tracker.unfinished()
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        QueueStats {
            length: state.buffer.len(),
            capacity: self.capacity,
            waiting_getters: state.getters.len(),
            waiting_putters: state.putters.len(),
            unfinished: self.tracker.unfinished(),
            items_put: QueueCounters::read(&self.counters.items_put),
            items_taken: QueueCounters::read(&self.counters.items_taken),
            cancelled_waiters: QueueCounters::read(&self.counters.cancelled_waiters),
            forwarded_wakeups: QueueCounters::read(&self.counters.forwarded_wakeups),
        }
    }

    pub(super) fn has_room(&self, state: &QueueState<T>) -> bool {
        self.capacity
            .map_or(true, |capacity| state.buffer.len() < capacity)
    }

    pub(super) fn push_back(&self, state: &mut QueueState<T>, item: T) {
        state.buffer.append(item);
        let position = state.buffer.len() - 1;
        self.on_accepted(state, position);
    }

    pub(super) fn insert_at(&self, state: &mut QueueState<T>, pos: usize, item: T) -> QueueResult<()> {
        state.buffer.insert(pos, item)?;
        self.on_accepted(state, pos);
        Ok(())
    }

    fn on_accepted(&self, state: &mut QueueState<T>, position: usize) {
        self.tracker.mark_added();
        QueueCounters::bump(&self.counters.items_put);
        state.getters.resolve_next();
        self.emit(QueueEvent::Added {
            position,
            len: state.buffer.len(),
        });
    }

    pub(super) fn take_front(&self, state: &mut QueueState<T>) -> Option<T> {
        let item = state.buffer.pop_front()?;
        self.on_taken(state, 0);
        Some(item)
    }

    pub(super) fn take_at(&self, state: &mut QueueState<T>, pos: usize) -> QueueResult<T> {
        let item = state.buffer.pop_at(pos)?;
        self.on_taken(state, pos);
        Ok(item)
    }

    fn on_taken(&self, state: &mut QueueState<T>, position: usize) {
        state.putters.resolve_next();
        QueueCounters::bump(&self.counters.items_taken);
        self.emit(QueueEvent::Taken {
            position,
            len: state.buffer.len(),
        });
    }

    /// Hand a wakeup that was consumed by a caller who cannot use it to the
    /// next waiter in the same registry
    pub(super) fn forward(&self, state: &mut QueueState<T>, role: WaiterRole) {
        let registry = match role {
            WaiterRole::Getter => &mut state.getters,
            WaiterRole::Putter => &mut state.putters,
        };
        if registry.resolve_next().is_woken() {
            QueueCounters::bump(&self.counters.forwarded_wakeups);
            debug!(?role, "wakeup forwarded to next waiter");
        }
    }

    /// Withdraw the waiter of a cancelled call
    ///
    /// If the waiter had already been resolved and the event it was woken
    /// for is still available, the wakeup moves on to the next waiter.
    pub(super) fn withdraw(&self, role: WaiterRole, waiter: Waiter) {
        let mut state = self.state.lock();
        QueueCounters::bump(&self.counters.cancelled_waiters);

        let still_pending = match role {
            WaiterRole::Getter => state.getters.withdraw(waiter.id()),
            WaiterRole::Putter => state.putters.withdraw(waiter.id()),
        };
        if still_pending {
            debug!(?role, "cancelled before wakeup");
            return;
        }

        let available = match role {
            WaiterRole::Getter => !state.buffer.is_empty(),
            WaiterRole::Putter => self.has_room(&state),
        };
        if available {
            self.forward(&mut state, role);
        }
    }

    pub(super) fn emit(&self, event: QueueEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl<T: Clone> PlaybackQueue<T> {
    /// Clone of the item at `pos`, if any
    pub fn peek(&self, pos: usize) -> Option<T> {
        self.state.lock().buffer.get(pos).cloned()
    }

    /// Clone of every buffered item in queue order
    pub fn snapshot(&self) -> Vec<T> {
        self.state.lock().buffer.iter().cloned().collect()
    }
}

impl<T> Default for PlaybackQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PlaybackQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PlaybackQueue")
            .field("len", &state.buffer.len())
            .field("capacity", &self.capacity)
            .field("waiting_getters", &state.getters.len())
            .field("waiting_putters", &state.putters.len())
            .field("unfinished", &self.tracker.unfinished())
            .finish()
    }
}
