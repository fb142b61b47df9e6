//! File-driven planner.
//!
//! A plan script is a TOML or JSON document listing the planner's responses
//! in order:
//!
//! ```toml
//! request = "Summarize the two notes"
//!
//! [[steps]]
//! action = "read both notes"
//!
//! [[steps.tools]]
//! id = "a"
//! capability = "read_file"
//! arguments = { path = "notes/a.txt" }
//!
//! [[steps.tools]]
//! id = "b"
//! capability = "read_file"
//! arguments = { path = "notes/b.txt" }
//!
//! [[steps.tools]]
//! id = "joined"
//! capability = "concat"
//! arguments = { parts = ["${a.content}", "${b.content}"] }
//! depends_on = ["a", "b"]
//! ```
//!
//! Once every step has been served the planner answers `done`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use wavefront_application::{PlannerError, PlannerPort};
use wavefront_domain::{ConversationHistory, PlanningResult, ResultAccumulator};

/// Parsed plan script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanScript {
    /// The request that seeds the conversation history
    pub request: String,
    /// Planner responses, served in order
    pub steps: Vec<PlanningResult>,
}

impl PlanScript {
    pub fn from_toml_str(source: &str) -> Result<Self, PlannerError> {
        toml::from_str(source).map_err(|e| PlannerError::Script(format!("invalid TOML: {}", e)))
    }

    pub fn from_json_str(source: &str) -> Result<Self, PlannerError> {
        serde_json::from_str(source)
            .map_err(|e| PlannerError::Script(format!("invalid JSON: {}", e)))
    }

    /// Read a script, choosing the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::Script(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            _ => Err(PlannerError::Script(format!(
                "unsupported plan script format: {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    /// Total number of tool calls across all steps
    pub fn call_count(&self) -> usize {
        self.steps.iter().map(|step| step.tools.len()).sum()
    }
}

/// Planner that replays a [`PlanScript`]
pub struct ScriptedPlanner {
    request: String,
    remaining: Mutex<VecDeque<PlanningResult>>,
    total: usize,
}

impl ScriptedPlanner {
    pub fn new(script: PlanScript) -> Self {
        let total = script.steps.len();
        Self {
            request: script.request,
            remaining: Mutex::new(script.steps.into()),
            total,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        PlanScript::load(path).map(Self::new)
    }

    /// The request the script was written for
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Steps not yet served
    pub fn remaining(&self) -> usize {
        self.remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl PlannerPort for ScriptedPlanner {
    async fn plan(
        &self,
        results: &ResultAccumulator,
        history: &ConversationHistory,
    ) -> Result<PlanningResult, PlannerError> {
        let next = self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(step) => {
                let left = self.remaining();
                debug!(
                    step = self.total - left,
                    total = self.total,
                    tools = step.tools.len(),
                    known_results = results.len(),
                    history = history.len(),
                    "Serving scripted step"
                );
                Ok(step)
            }
            None => {
                debug!("Plan script exhausted");
                Ok(PlanningResult::done())
            }
        }
    }
}
