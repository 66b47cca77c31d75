/*!
 * Queue Operations
 * Put, get, and completion tracking operations
 */

use super::guard::WaiterGuard;
use super::manager::{PlaybackQueue, WaiterRole};
use super::types::QueueEvent;
use crate::core::errors::{QueueResult, TryPutError};
use tracing::trace;

impl<T> PlaybackQueue<T> {
    /// Append an item and wake one waiting consumer
    ///
    /// Completes immediately unless the queue is bounded and full, in which
    /// case it suspends until room is made.
    pub async fn put(&self, item: T) {
        loop {
            let waiter = {
                let mut state = self.state.lock();
                if self.has_room(&state) {
                    self.push_back(&mut state, item);
                    return;
                }
                state.putters.register()
            };

            trace!("put suspended on full queue");
            WaiterGuard::new(self, WaiterRole::Putter, waiter).wait().await;
        }
    }

    /// Insert an item so that it ends up at `pos`
    ///
    /// `pos` may equal the current length (append). A larger position fails
    /// with `IndexOutOfRange` and leaves the queue unchanged.
    pub async fn put_pos(&self, item: T, pos: usize) -> QueueResult<()> {
        let mut woken = false;
        loop {
            let waiter = {
                let mut state = self.state.lock();
                if let Err(e) = state.buffer.check_insert(pos) {
                    if woken && self.has_room(&state) {
                        self.forward(&mut state, WaiterRole::Putter);
                    }
                    return Err(e);
                }
                if self.has_room(&state) {
                    return self.insert_at(&mut state, pos, item);
                }
                state.putters.register()
            };

            trace!(pos, "put_pos suspended on full queue");
            WaiterGuard::new(self, WaiterRole::Putter, waiter).wait().await;
            woken = true;
        }
    }

    /// Append without suspending; a full bounded queue hands the item back
    pub fn try_put(&self, item: T) -> Result<(), TryPutError<T>> {
        let mut state = self.state.lock();
        match self.capacity {
            Some(capacity) if !self.has_room(&state) => Err(TryPutError::Full { item, capacity }),
            _ => {
                self.push_back(&mut state, item);
                Ok(())
            }
        }
    }

    /// Take the front item, suspending while the queue is empty
    ///
    /// Cancel-safe: dropping the future never loses an item. If this call
    /// had already been chosen to receive an item when it was dropped, the
    /// wakeup passes to the next waiting consumer.
    pub async fn get(&self) -> T {
        loop {
            let waiter = {
                let mut state = self.state.lock();
                if let Some(item) = self.take_front(&mut state) {
                    return item;
                }
                state.getters.register()
            };

            trace!("get suspended on empty queue");
            WaiterGuard::new(self, WaiterRole::Getter, waiter).wait().await;
        }
    }

    /// Take the item at `pos`, suspending while the queue is empty
    ///
    /// Same cancellation behaviour as `get`. Once the queue is non-empty an
    /// invalid `pos` fails with `IndexOutOfRange`.
    pub async fn get_pos(&self, pos: usize) -> QueueResult<T> {
        let mut woken = false;
        loop {
            let waiter = {
                let mut state = self.state.lock();
                if !state.buffer.is_empty() {
                    let taken = self.take_at(&mut state, pos);
                    if taken.is_err() && woken {
                        // The item we were woken for is still there
                        self.forward(&mut state, WaiterRole::Getter);
                    }
                    return taken;
                }
                state.getters.register()
            };

            trace!(pos, "get_pos suspended on empty queue");
            WaiterGuard::new(self, WaiterRole::Getter, waiter).wait().await;
            woken = true;
        }
    }

    /// Take the front item without suspending
    pub fn try_get(&self) -> Option<T> {
        let mut state = self.state.lock();
        self.take_front(&mut state)
    }

    /// Mark one previously taken item as finished
    ///
    /// Fails with `TaskDoneOverflow` if every accepted item is already done.
    pub fn task_done(&self) -> QueueResult<()> {
        if self.tracker.mark_done()? == 0 {
            self.emit(QueueEvent::Drained);
        }
        Ok(())
    }

    /// Suspend until every accepted item has been marked done
    pub async fn join(&self) {
        self.tracker.join().await
    }
}
