/*!
 * Waiter Token
 *
 * Single-shot suspension token backed by a oneshot channel.
 * The registry keeps the sending half; resolving a waiter is a send,
 * suspending on it is a receive.
 */

use tokio::sync::oneshot;

/// Identifier of a waiter within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaiterId(pub(super) u64);

impl WaiterId {
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Suspension half of a registered waiter
///
/// Owned by exactly one suspended call. Dropping it withdraws the token
/// from the registry's point of view: a later resolve skips it.
#[derive(Debug)]
pub struct Waiter {
    id: WaiterId,
    rx: oneshot::Receiver<()>,
}

impl Waiter {
    pub(super) fn new(id: WaiterId, rx: oneshot::Receiver<()>) -> Self {
        Self { id, rx }
    }

    #[inline]
    pub fn id(&self) -> WaiterId {
        self.id
    }

    /// Suspend until the registry resolves this waiter
    ///
    /// Also returns if the registry itself is dropped. Must not be awaited
    /// again once it has returned.
    pub async fn resolved(&mut self) {
        // A closed sender only happens when the registry is torn down
        let _ = (&mut self.rx).await;
    }
}
