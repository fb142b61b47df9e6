//! Port definitions for the application layer
//!
//! Ports define the interfaces that infrastructure adapters implement.

pub mod composite_event_sink;
pub mod event_sink;
pub mod planner;
pub mod tool_registry;
