//! Planner output consumed once per loop iteration.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Whether the planner wants more work done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Continue,
    Done,
}

impl PlanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PlanStatus::Continue => "continue",
            PlanStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One planner response.
///
/// `action` and `reasoning` are human-readable and opaque to the loop; they
/// are only recorded in the conversation history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanningResult {
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub tools: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl PlanningResult {
    pub fn done() -> Self {
        Self {
            status: PlanStatus::Done,
            ..Default::default()
        }
    }

    pub fn continue_with(tools: Vec<ToolCall>) -> Self {
        Self {
            status: PlanStatus::Continue,
            tools,
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Done, or nothing left to run
    pub fn is_finished(&self) -> bool {
        self.status == PlanStatus::Done || self.tools.is_empty()
    }
}
