//! Orchestrator loop phases.
//!
//! ```text
//! PLANNING ──▶ EXECUTING ──▶ EVALUATING ──▶ PLANNING
//!    │                           │
//!    └──▶ DONE | CANCELLED | FAILED ◀──┘
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    Planning,
    Executing,
    Evaluating,
    Done,
    Cancelled,
    Failed,
}

impl LoopPhase {
    pub fn as_str(&self) -> &str {
        match self {
            LoopPhase::Planning => "planning",
            LoopPhase::Executing => "executing",
            LoopPhase::Evaluating => "evaluating",
            LoopPhase::Done => "done",
            LoopPhase::Cancelled => "cancelled",
            LoopPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopPhase::Done | LoopPhase::Cancelled | LoopPhase::Failed)
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: LoopPhase) -> bool {
        use LoopPhase::*;
        match (self, next) {
            (Planning, Executing | Done | Cancelled | Failed) => true,
            (Executing, Evaluating | Failed) => true,
            (Evaluating, Planning | Done | Cancelled | Failed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
