//! Terminal outcome of one orchestrated operation.
//!
//! The loop never returns an error: cancellation and the iteration limit are
//! ordinary shutdown paths, and fatal planning errors become
//! [`LoopOutcome::Failed`] with the results gathered so far.

use crate::core::error::DomainError;
use crate::orchestration::results::ResultAccumulator;
use serde::Serialize;

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PlanCycle,
    UnknownCapability,
    UnknownDependency,
    DuplicateCallId,
    PlannerFailed,
    /// The plan was rejected for any other reason
    InvalidPlan,
}

impl FailureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FailureKind::PlanCycle => "plan_cycle",
            FailureKind::UnknownCapability => "unknown_capability",
            FailureKind::UnknownDependency => "unknown_dependency",
            FailureKind::DuplicateCallId => "duplicate_call_id",
            FailureKind::PlannerFailed => "planner_failed",
            FailureKind::InvalidPlan => "invalid_plan",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&DomainError> for FailureKind {
    fn from(error: &DomainError) -> Self {
        match error {
            DomainError::PlanCycle(_) => FailureKind::PlanCycle,
            DomainError::UnknownDependency { .. } => FailureKind::UnknownDependency,
            DomainError::DuplicateCallId(_) => FailureKind::DuplicateCallId,
            DomainError::UnknownCapability { .. } => FailureKind::UnknownCapability,
            DomainError::DuplicateOutcome(_) => FailureKind::InvalidPlan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The planner said done (or returned no tools)
    Completed {
        results: ResultAccumulator,
        iterations: u32,
    },
    /// The token was observed before the next iteration's waves started
    Cancelled {
        results: ResultAccumulator,
        reason: String,
        stopped_before_wave: u32,
    },
    Failed {
        error_kind: FailureKind,
        message: String,
        /// Results accumulated before the failure, kept for inspection
        results: ResultAccumulator,
    },
    IterationLimitExceeded {
        results: ResultAccumulator,
        iterations: u32,
    },
}

impl LoopOutcome {
    /// Build a `Failed` outcome from a fatal planning error
    pub fn failed(error: &DomainError, results: ResultAccumulator) -> Self {
        LoopOutcome::Failed {
            error_kind: FailureKind::from(error),
            message: error.to_string(),
            results,
        }
    }

    pub fn results(&self) -> &ResultAccumulator {
        match self {
            LoopOutcome::Completed { results, .. }
            | LoopOutcome::Cancelled { results, .. }
            | LoopOutcome::Failed { results, .. }
            | LoopOutcome::IterationLimitExceeded { results, .. } => results,
        }
    }

    pub fn into_results(self) -> ResultAccumulator {
        match self {
            LoopOutcome::Completed { results, .. }
            | LoopOutcome::Cancelled { results, .. }
            | LoopOutcome::Failed { results, .. }
            | LoopOutcome::IterationLimitExceeded { results, .. } => results,
        }
    }

    pub fn status(&self) -> &str {
        match self {
            LoopOutcome::Completed { .. } => "completed",
            LoopOutcome::Cancelled { .. } => "cancelled",
            LoopOutcome::Failed { .. } => "failed",
            LoopOutcome::IterationLimitExceeded { .. } => "iteration_limit_exceeded",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, LoopOutcome::Completed { .. })
    }
}
