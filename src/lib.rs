/*!
 * Playback Queue Library
 * Cancellation-safe ordered queue shared by track producers and a playback loop
 */

pub mod core;
pub mod monitoring;
pub mod queue;

// Re-exports
pub use crate::core::errors::{QueueError, QueueResult, TryPutError};
pub use monitoring::{init_tracing, session_span};
pub use queue::{PlaybackQueue, QueueConfig, QueueEvent, QueueStats};
