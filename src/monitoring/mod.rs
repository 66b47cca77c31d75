/*!
 * Monitoring Module
 * Tracing setup for processes hosting playback queues
 */

mod tracer;

pub use tracer::{init_tracing, session_span};
