/*!
 * Waiter Guard
 * Cancellation cleanup for a suspended queue call
 */

use super::manager::{PlaybackQueue, WaiterRole};
use crate::core::sync::Waiter;

/// Owns the waiter of one suspension
///
/// Awaiting `wait` to completion disarms the guard. Dropping it earlier
/// (the caller's future was cancelled) withdraws the waiter under the queue
/// lock while its receiver is still alive, so the queue can tell a pending
/// waiter from one that already absorbed a wakeup.
pub(super) struct WaiterGuard<'a, T> {
    queue: &'a PlaybackQueue<T>,
    role: WaiterRole,
    waiter: Option<Waiter>,
}

impl<'a, T> WaiterGuard<'a, T> {
    pub fn new(queue: &'a PlaybackQueue<T>, role: WaiterRole, waiter: Waiter) -> Self {
        Self {
            queue,
            role,
            waiter: Some(waiter),
        }
    }

    /// Suspend until resolved
    pub async fn wait(mut self) {
        if let Some(waiter) = self.waiter.as_mut() {
            waiter.resolved().await;
        }
        self.waiter = None;
    }
}

impl<T> Drop for WaiterGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(waiter) = self.waiter.take() {
            self.queue.withdraw(self.role, waiter);
        }
    }
}
