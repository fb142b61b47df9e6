//! Domain error types

use crate::tool::entities::ToolCallId;
use thiserror::Error;

/// Domain-level errors
///
/// Every variant here is a *planning-time* error: it describes a plan that
/// cannot be executed at all. Per-call failures (timeouts, capability errors)
/// are never errors at this level; they are recorded as
/// [`ExecutionOutcome::Failure`](crate::tool::value_objects::ExecutionOutcome) data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Dependency cycle between tool calls: {}", join_ids(.0))]
    PlanCycle(Vec<ToolCallId>),

    #[error("Tool call '{call}' depends on unknown id '{dependency}'")]
    UnknownDependency {
        call: ToolCallId,
        dependency: ToolCallId,
    },

    #[error("Duplicate tool call id: {0}")]
    DuplicateCallId(ToolCallId),

    #[error("Unknown capability '{capability}' requested by tool call '{call}'")]
    UnknownCapability {
        call: ToolCallId,
        capability: String,
    },

    #[error("Outcome for '{0}' is already recorded")]
    DuplicateOutcome(ToolCallId),
}

impl DomainError {
    /// Check if this error is a dependency cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, DomainError::PlanCycle(_))
    }
}

fn join_ids(ids: &[ToolCallId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
