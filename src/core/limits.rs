/*!
 * Queue Limits and Constants
 *
 * Centralized location for queue-wide limits, defaults, and environment keys.
 */

// =============================================================================
// CAPACITY
// =============================================================================

/// Maximum bounded queue capacity (10,000 items)
/// Larger configured capacities are clamped to this value
pub const MAX_QUEUE_CAPACITY: usize = 10_000;

// =============================================================================
// EVENTS
// =============================================================================

/// Default broadcast buffer for queue events (64 events)
/// Slow subscribers lag and skip events beyond this depth
pub const DEFAULT_EVENT_BUFFER: usize = 64;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Bounded capacity override (unset or empty means unbounded)
pub const ENV_QUEUE_CAPACITY: &str = "PLAYBACK_QUEUE_CAPACITY";

/// Event broadcast buffer override
pub const ENV_EVENT_BUFFER: &str = "PLAYBACK_QUEUE_EVENT_BUFFER";

/// Enables JSON trace output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "PLAYBACK_TRACE_JSON";
