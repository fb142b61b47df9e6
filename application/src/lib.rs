//! Application layer for wavefront
//!
//! This crate contains use cases, port definitions, the cancellation token,
//! and execution configuration. It depends only on the domain layer.
//!
//! - [`ExecuteWaveUseCase`] runs one wave of tool calls with bounded
//!   concurrency, per-call timeouts and transient-error retries
//! - [`RunAgentUseCase`] drives the plan → execute → re-plan loop to a
//!   [`LoopOutcome`](wavefront_domain::LoopOutcome)

pub mod cancellation;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use cancellation::OperationCancellation;
pub use config::ExecutionParams;
pub use ports::{
    composite_event_sink::CompositeEventSink,
    event_sink::{EventSink, NoEventSink, WaveEvent},
    planner::{PlannerError, PlannerPort},
    tool_registry::{Capability, ToolRegistryPort},
};
pub use use_cases::execute_wave::{ExecuteWaveUseCase, WaveReport};
pub use use_cases::run_agent::{RunAgentInput, RunAgentUseCase};
