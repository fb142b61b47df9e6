//! Planner port
//!
//! The planner decides what to do next. It sees every outcome accumulated so
//! far plus the conversation history, and answers with a [`PlanningResult`]:
//! either more tool calls (`continue`) or `done`.
//!
//! Plan generation itself lives outside this system; adapters wrap whatever
//! produces plans (a language model, a rules engine, a script file).

use async_trait::async_trait;
use thiserror::Error;
use wavefront_domain::{ConversationHistory, PlanningResult, ResultAccumulator};

/// Errors a planner may report. All of them are fatal to the loop.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Planner unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid planner response: {0}")]
    InvalidResponse(String),

    #[error("Planner script error: {0}")]
    Script(String),
}

/// Port for plan generation.
///
/// Called once per loop iteration; never concurrently for the same operation.
#[async_trait]
pub trait PlannerPort: Send + Sync {
    async fn plan(
        &self,
        results: &ResultAccumulator,
        history: &ConversationHistory,
    ) -> Result<PlanningResult, PlannerError>;
}
