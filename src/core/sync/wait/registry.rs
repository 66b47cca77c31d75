/*!
 * Waiter Registry
 *
 * FIFO of single-shot waiter tokens with single-wakeup discipline.
 *
 * # Design: Token Queue Over Broadcast Notification
 *
 * Every suspended call owns its own token, so a resolve hands exactly one
 * unit of progress to exactly one caller (oldest first), and a cancelled
 * caller can be removed precisely without disturbing the others.
 */

use super::traits::WakeResult;
use super::waiter::{Waiter, WaiterId};
use std::collections::VecDeque;
use tokio::sync::oneshot;
use tracing::trace;

/// Ordered registry of suspended callers
#[derive(Debug)]
pub struct WaiterRegistry {
    kind: &'static str,
    next_id: u64,
    waiters: VecDeque<(WaiterId, oneshot::Sender<()>)>,
}

impl WaiterRegistry {
    /// Create an empty registry; `kind` labels trace output (e.g. "getter")
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            next_id: 0,
            waiters: VecDeque::new(),
        }
    }

    /// Append a new pending waiter and return the token to suspend on
    pub fn register(&mut self) -> Waiter {
        let id = WaiterId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let (tx, rx) = oneshot::channel();
        self.waiters.push_back((id, tx));
        trace!(kind = self.kind, waiter = id.as_u64(), pending = self.waiters.len(), "waiter registered");
        Waiter::new(id, rx)
    }

    /// Resolve the oldest waiter that is still pending
    ///
    /// Tokens whose owner has gone away are discarded on the way.
    pub fn resolve_next(&mut self) -> WakeResult {
        while let Some((id, tx)) = self.waiters.pop_front() {
            if tx.send(()).is_ok() {
                trace!(kind = self.kind, waiter = id.as_u64(), "waiter resolved");
                return WakeResult::Woken(1);
            }
            trace!(kind = self.kind, waiter = id.as_u64(), "skipped withdrawn waiter");
        }
        WakeResult::NoWaiters
    }

    /// Remove a waiter that is giving up
    ///
    /// Returns `true` if it was still pending. `false` means it had already
    /// been resolved and so consumed a wakeup.
    pub fn withdraw(&mut self, id: WaiterId) -> bool {
        match self.waiters.iter().position(|(waiter, _)| *waiter == id) {
            Some(index) => {
                self.waiters.remove(index);
                trace!(kind = self.kind, waiter = id.as_u64(), "pending waiter withdrawn");
                true
            }
            None => false,
        }
    }

    /// Number of waiters still pending
    pub fn len(&self) -> usize {
        self.waiters.iter().filter(|(_, tx)| !tx.is_closed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_resolve_oldest_first() {
        let mut registry = WaiterRegistry::new("getter");
        let mut first = registry.register();
        let mut second = registry.register();

        assert_eq!(registry.resolve_next(), WakeResult::Woken(1));
        assert!(first.resolved().now_or_never().is_some());
        assert!(second.resolved().now_or_never().is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_empty_is_noop() {
        let mut registry = WaiterRegistry::new("putter");
        assert_eq!(registry.resolve_next(), WakeResult::NoWaiters);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_skips_dropped_waiters() {
        let mut registry = WaiterRegistry::new("getter");
        let dropped = registry.register();
        let mut live = registry.register();
        drop(dropped);

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve_next().is_woken());
        assert!(live.resolved().now_or_never().is_some());
        assert_eq!(registry.resolve_next(), WakeResult::NoWaiters);
    }

    #[test]
    fn test_withdraw_reports_pending_state() {
        let mut registry = WaiterRegistry::new("getter");
        let pending = registry.register();
        let resolved = registry.register();

        assert!(registry.withdraw(pending.id()));
        assert!(registry.resolve_next().is_woken());
        assert!(!registry.withdraw(resolved.id()));
        assert!(registry.is_empty());
    }
}
