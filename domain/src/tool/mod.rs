//! Tool domain module
//!
//! Definitions for the capabilities a plan can invoke and for what comes back.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ExecutionOutcome │
//! │ (registry)   │    │ (invocation) │    │ (one per call)   │
//! └──────┬───────┘    └──────────────┘    └──────────────────┘
//!        │
//!        ├─ aliases: "cat" → "read_file"
//!        └─ tools:   "read_file" → ToolDefinition
//! ```
//!
//! A capability reports problems as [`ToolError`]; the wave executor converts
//! those (and timeouts, and panics) into [`ExecutionOutcome::Failure`] so that
//! per-call failures never escape as errors.
//!
//! # Key Types
//!
//! - [`ToolSpec`]: available capabilities + alias mappings
//! - [`ToolCall`]: one planned invocation with arguments and dependencies
//! - [`ToolError`]: code-based capability error; only `TRANSIENT` is retried
//! - [`ExecutionOutcome`]: terminal per-call result
//! - [`placeholder`]: `${id.path}` substitution from earlier payloads

pub mod entities;
pub mod placeholder;
pub mod value_objects;

pub use entities::{
    Arguments, ArgumentsExt, ToolCall, ToolCallId, ToolDefinition, ToolParameter, ToolSpec,
};
pub use value_objects::{CallRecord, ErrorKind, ExecutionOutcome, ToolError};
