/*!
 * Queue Configuration
 *
 * Capacity and event settings, loadable from serde sources or the environment
 */

use crate::core::errors::{QueueError, QueueResult};
use crate::core::limits::{DEFAULT_EVENT_BUFFER, ENV_EVENT_BUFFER, ENV_QUEUE_CAPACITY};
use serde::{Deserialize, Serialize};

/// Playback queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of buffered items; `None` never blocks producers
    pub capacity: Option<usize>,
    /// Depth of the event broadcast channel
    pub event_buffer: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl QueueConfig {
    /// Producers never suspend
    pub const fn unbounded() -> Self {
        Self {
            capacity: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }

    /// Producers suspend while `capacity` items are buffered
    pub const fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }

    /// Load overrides from the environment on top of the defaults
    ///
    /// Environment variables:
    /// - PLAYBACK_QUEUE_CAPACITY: bounded capacity (unset or empty: unbounded)
    /// - PLAYBACK_QUEUE_EVENT_BUFFER: event channel depth
    pub fn from_env() -> QueueResult<Self> {
        let mut config = Self::default();

        if let Some(capacity) = read_env(ENV_QUEUE_CAPACITY)? {
            config.capacity = Some(capacity);
        }
        if let Some(event_buffer) = read_env(ENV_EVENT_BUFFER)? {
            config.event_buffer = event_buffer;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> QueueResult<()> {
        if self.capacity == Some(0) {
            return Err(QueueError::InvalidConfig("capacity must be at least 1".into()));
        }
        if self.event_buffer == 0 {
            return Err(QueueError::InvalidConfig("event_buffer must be at least 1".into()));
        }
        Ok(())
    }
}

fn read_env(key: &str) -> QueueResult<Option<usize>> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| QueueError::InvalidConfig(format!("{}={:?}: {}", key, value, e))),
        Err(_) => Ok(None),
    }
}
