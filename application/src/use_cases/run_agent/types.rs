//! Type definitions for the RunAgent use case.

use crate::config::ExecutionParams;
use tracing::{debug, warn};
use wavefront_domain::LoopPhase;

/// Input for the RunAgent use case
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    /// The user's request, seeded into the conversation history
    pub request: String,
    /// Executor and loop parameters
    pub execution: ExecutionParams,
}

impl RunAgentInput {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Current loop phase, guarded by [`LoopPhase::can_transition_to`].
pub(super) struct PhaseTracker {
    current: LoopPhase,
}

impl PhaseTracker {
    pub(super) fn new() -> Self {
        Self {
            current: LoopPhase::Planning,
        }
    }

    pub(super) fn current(&self) -> LoopPhase {
        self.current
    }

    pub(super) fn advance(&mut self, next: LoopPhase) {
        if !self.current.can_transition_to(next) {
            warn!(from = %self.current, to = %next, "Illegal loop phase transition");
            debug_assert!(false, "illegal loop phase transition {} -> {}", self.current, next);
        }
        debug!(from = %self.current, to = %next, "Loop phase");
        self.current = next;
    }
}
