/*!
 * Queue Module
 * Ordered playback queue with suspending get/put and completion tracking
 */

pub mod buffer;
pub mod completion;
pub mod config;
mod guard;
pub mod manager;
mod operations;
pub mod types;

// Re-export public API
pub use buffer::OrderedBuffer;
pub use completion::CompletionTracker;
pub use config::QueueConfig;
pub use manager::PlaybackQueue;
pub use types::{QueueEvent, QueueStats};
