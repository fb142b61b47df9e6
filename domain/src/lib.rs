//! Domain layer for wavefront
//!
//! This crate contains the core scheduling logic, entities, and value objects.
//! It has no dependencies on infrastructure, async runtimes, or I/O.
//!
//! # Core Concepts
//!
//! ## Waves
//!
//! A planner emits [`ToolCall`]s with `depends_on` edges. The
//! [`resolve_waves`] resolver layers them into [`Wave`]s: every call in a wave
//! has all its dependencies satisfied by earlier waves, so a wave's calls may
//! run concurrently.
//!
//! ## Outcomes
//!
//! Every executed call yields exactly one [`ExecutionOutcome`], recorded
//! write-once in the [`ResultAccumulator`]. An operation as a whole ends in a
//! [`LoopOutcome`]: completed, cancelled, failed, or out of iterations.

pub mod config;
pub mod core;
pub mod orchestration;
pub mod tool;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::DomainError;
pub use orchestration::{
    history::{ConversationHistory, HistoryEntry, Role},
    outcome::{FailureKind, LoopOutcome},
    phase::LoopPhase,
    plan::{PlanStatus, PlanningResult},
    results::ResultAccumulator,
    wave::{Wave, resolve_waves},
};
pub use tool::{
    Arguments, ArgumentsExt, CallRecord, ErrorKind, ExecutionOutcome, ToolCall, ToolCallId,
    ToolDefinition, ToolError, ToolParameter, ToolSpec,
};
