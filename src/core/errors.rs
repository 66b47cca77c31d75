/*!
 * Error Types
 * Queue error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Queue operation result
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors surfaced by queue operations
///
/// Cancellation is not represented here: a suspended `get`/`put` is cancelled
/// by dropping its future.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error("Position {pos} out of range for queue of length {len}")]
    #[diagnostic(
        code(queue::index_out_of_range),
        help("The queue may have changed since its length was read. Re-check size() before addressing a position.")
    )]
    IndexOutOfRange { pos: usize, len: usize },

    #[error("task_done() called too many times")]
    #[diagnostic(
        code(queue::task_done_overflow),
        help("Call task_done() exactly once for every item taken from the queue.")
    )]
    TaskDoneOverflow,

    #[error("Invalid queue configuration: {0}")]
    #[diagnostic(
        code(queue::invalid_config),
        help("Capacity and event buffer must be at least 1.")
    )]
    InvalidConfig(String),
}

/// Error returned by `try_put` on a full bounded queue
///
/// Hands the rejected item back to the caller.
#[derive(Clone, PartialEq, Eq)]
pub enum TryPutError<T> {
    Full { item: T, capacity: usize },
}

impl<T> TryPutError<T> {
    /// Recover the item that could not be queued
    pub fn into_inner(self) -> T {
        match self {
            TryPutError::Full { item, .. } => item,
        }
    }
}

impl<T> fmt::Debug for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPutError::Full { capacity, .. } => f
                .debug_struct("Full")
                .field("capacity", capacity)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPutError::Full { capacity, .. } => write!(f, "Queue full: {}/{}", capacity, capacity),
        }
    }
}

impl<T> std::error::Error for TryPutError<T> {}
