/*!
 * Synchronization Primitives
 *
 * Building blocks for suspending and resuming queue callers.
 *
 * # Use Cases
 *
 * - **Getters**: consumers waiting for the queue to become non-empty
 * - **Putters**: producers waiting for room in a bounded queue
 */

pub mod wait;

pub use wait::{Waiter, WaiterId, WaiterRegistry, WakeResult};
