//! Run Agent use case
//!
//! Drives the plan → execute → re-plan loop until a terminal condition:
//!
//! ```text
//! PLANNING ──▶ EXECUTING ──▶ EVALUATING ──▶ PLANNING ...
//!     │             │
//!     │             └──▶ FAILED (unknown capability, cycle, bad dependency)
//!     ├──▶ DONE       (planner says done, or no tools)
//!     ├──▶ CANCELLED  (token observed before the next iteration runs)
//!     └──▶ FAILED     (planner error, iteration limit)
//! ```
//!
//! | Step | Action |
//! |------|--------|
//! | 1. Planning | planner sees every outcome so far plus the history |
//! | 2. Done? | `done` or empty `tools` → `Completed` |
//! | 3. Cancelled? | token read once → `Cancelled { stopped_before_wave }` |
//! | 4. Limit? | `max_iterations` already executed → `IterationLimitExceeded` |
//! | 5. Executing | resolve capabilities and waves, run them, merge outcomes |
//! | 6. Evaluating | count the iteration, record call summaries, loop |
//!
//! Cancellation is only read at step 3. A wave that has started always runs
//! to completion, so partial results contain only calls that finished.
//! [`RunAgentUseCase::execute`] never returns an error; every exit is a
//! [`LoopOutcome`].

mod types;

pub use types::RunAgentInput;

use types::PhaseTracker;

use crate::cancellation::OperationCancellation;
use crate::ports::event_sink::{EventSink, NoEventSink, WaveEvent, emit_isolated};
use crate::ports::planner::PlannerPort;
use crate::ports::tool_registry::ToolRegistryPort;
use crate::use_cases::execute_wave::ExecuteWaveUseCase;
use crate::use_cases::shared::{cancellation_reason, summarize_call};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wavefront_domain::core::string::truncate;
use wavefront_domain::{
    ConversationHistory, DomainError, FailureKind, LoopOutcome, LoopPhase, ResultAccumulator,
    Role, resolve_waves,
};

/// Use case for running the orchestrator loop
pub struct RunAgentUseCase<P: PlannerPort + 'static, T: ToolRegistryPort + 'static> {
    planner: Arc<P>,
    registry: Arc<T>,
    cancellation: Option<OperationCancellation>,
    events: Arc<dyn EventSink>,
}

impl<P, T> Clone for RunAgentUseCase<P, T>
where
    P: PlannerPort + 'static,
    T: ToolRegistryPort + 'static,
{
    fn clone(&self) -> Self {
        Self {
            planner: self.planner.clone(),
            registry: self.registry.clone(),
            cancellation: self.cancellation.clone(),
            events: self.events.clone(),
        }
    }
}

impl<P: PlannerPort + 'static, T: ToolRegistryPort + 'static> RunAgentUseCase<P, T> {
    pub fn new(planner: Arc<P>, registry: Arc<T>) -> Self {
        Self {
            planner,
            registry,
            cancellation: None,
            events: Arc::new(NoEventSink),
        }
    }

    /// Set a cancellation token for cooperative interruption
    pub fn with_cancellation(mut self, token: OperationCancellation) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set the sink that receives loop, wave and call events
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Run one operation to its terminal outcome.
    pub async fn execute(&self, input: RunAgentInput) -> LoopOutcome {
        let params = input.execution;
        let executor = ExecuteWaveUseCase::new(self.registry.clone(), params.clone())
            .with_event_sink(self.events.clone());

        let mut results = ResultAccumulator::new();
        let mut history = ConversationHistory::with_request(input.request.as_str());
        let mut phase = PhaseTracker::new();
        let mut iterations: u32 = 0;
        let mut waves_run: usize = 0;

        info!(
            request = %truncate(&input.request, 80),
            max_iterations = params.max_iterations,
            max_concurrency = params.max_concurrency,
            "Starting operation"
        );

        loop {
            // ========== Planning ==========
            let plan = match self.planner.plan(&results, &history).await {
                Ok(plan) => plan,
                Err(e) => {
                    warn!("Planner failed: {}", e);
                    phase.advance(LoopPhase::Failed);
                    return LoopOutcome::Failed {
                        error_kind: FailureKind::PlannerFailed,
                        message: e.to_string(),
                        results,
                    };
                }
            };

            if let Some(action) = plan.action.as_deref().or(plan.reasoning.as_deref()) {
                history.push(Role::Planner, action);
            }

            if plan.is_finished() {
                phase.advance(LoopPhase::Done);
                info!(iterations, results = results.len(), "Operation completed");
                return LoopOutcome::Completed {
                    results,
                    iterations,
                };
            }

            if let Some(reason) = cancellation_reason(&self.cancellation) {
                let stopped_before_wave = iterations + 1;
                phase.advance(LoopPhase::Cancelled);
                info!(%reason, stopped_before_wave, "Operation cancelled");
                emit_isolated(
                    self.events.as_ref(),
                    &WaveEvent::OperationCancelled {
                        reason: reason.clone(),
                        stopped_before_wave,
                    },
                );
                return LoopOutcome::Cancelled {
                    results,
                    reason,
                    stopped_before_wave,
                };
            }

            if iterations >= params.max_iterations {
                phase.advance(LoopPhase::Failed);
                warn!(iterations, "Iteration limit reached with work still planned");
                return LoopOutcome::IterationLimitExceeded {
                    results,
                    iterations,
                };
            }

            // ========== Executing ==========
            phase.advance(LoopPhase::Executing);
            debug!(iteration = iterations + 1, calls = plan.tools.len(), "Executing plan");

            let waves = match executor
                .check_capabilities(&plan.tools)
                .and_then(|()| resolve_waves(plan.tools, &results))
            {
                Ok(waves) => waves,
                Err(e) => return self.fail(&mut phase, &e, results),
            };

            // Number waves across the whole operation
            let waves: Vec<_> = waves
                .into_iter()
                .map(|mut wave| {
                    wave.index += waves_run;
                    wave
                })
                .collect();
            waves_run += waves.len();

            let reports = match executor.execute_plan(&waves, &mut results).await {
                Ok(reports) => reports,
                Err(e) => return self.fail(&mut phase, &e, results),
            };

            // ========== Evaluating ==========
            phase.advance(LoopPhase::Evaluating);
            iterations += 1;

            for report in &reports {
                for (record, (_, outcome)) in report.records.iter().zip(&report.outcomes) {
                    history.push(Role::Tool, summarize_call(record, outcome));
                }
            }

            let (succeeded, failed) = results.counts();
            debug!(
                iteration = iterations,
                waves = reports.len(),
                succeeded,
                failed,
                phase = %phase.current(),
                "Iteration evaluated"
            );
            phase.advance(LoopPhase::Planning);
        }
    }

    fn fail(
        &self,
        phase: &mut PhaseTracker,
        error: &DomainError,
        results: ResultAccumulator,
    ) -> LoopOutcome {
        warn!("Plan rejected: {}", error);
        phase.advance(LoopPhase::Failed);
        LoopOutcome::failed(error, results)
    }
}
