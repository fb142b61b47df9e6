//! Logging infrastructure: event sinks.
//!
//! - [`JsonlEventSink`]: one JSON object per event, appended to a file
//! - [`TracingEventSink`]: forwards events to `tracing`
//!
//! Both implement the [`EventSink`](wavefront_application::EventSink) port
//! and can be combined with a
//! [`CompositeEventSink`](wavefront_application::CompositeEventSink).

mod jsonl_event_sink;
mod tracing_event_sink;

pub use jsonl_event_sink::JsonlEventSink;
pub use tracing_event_sink::TracingEventSink;
