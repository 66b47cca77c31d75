/*!
 * Wait/Notify Primitives
 *
 * Single-shot waiter tokens and the FIFO registry that resolves them.
 *
 * # Architecture
 *
 * A suspended call registers a `Waiter`, awaits it, and on wake re-checks
 * its own condition. The registry resolves at most one waiter per event and
 * reports whether a withdrawn waiter had already consumed a wakeup, so the
 * caller can forward it.
 */

mod registry;
mod traits;
mod waiter;

// Re-export public API
pub use registry::WaiterRegistry;
pub use traits::WakeResult;
pub use waiter::{Waiter, WaiterId};
