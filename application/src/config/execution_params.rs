//! Execution parameters: wave executor and loop control.
//!
//! [`ExecutionParams`] groups the static parameters read by
//! [`ExecuteWaveUseCase`](crate::use_cases::execute_wave::ExecuteWaveUseCase)
//! and [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wavefront_domain::{ConfigIssue, ConfigIssueCode, ToolDefinition};

/// Execution control parameters.
///
/// | Parameter | Default | Used by |
/// |-----------|---------|---------|
/// | `max_concurrency` | 8 | wave executor (semaphore permits) |
/// | `per_call_timeout` | 30s | wave executor (per attempt) |
/// | `max_retries` | 1 | wave executor (transient errors only) |
/// | `retry_backoff` | 200ms | wave executor (doubles each retry) |
/// | `max_iterations` | 5 | orchestrator loop |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum calls in flight within one wave.
    pub max_concurrency: usize,
    /// Timeout for a single attempt of a single call.
    pub per_call_timeout: Duration,
    /// Extra attempts after a transient failure.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
    /// Maximum plan → execute iterations.
    pub max_iterations: u32,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            per_call_timeout: Duration::from_secs(30),
            max_retries: 1,
            retry_backoff: Duration::from_millis(200),
            max_iterations: 5,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    // ==================== Derived Values ====================

    /// Delay before retry number `attempt` (1-based): `retry_backoff * 2^(attempt-1)`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_backoff.saturating_mul(factor)
    }

    /// Timeout for one attempt of the given capability
    pub fn timeout_for(&self, definition: Option<&ToolDefinition>) -> Duration {
        definition
            .and_then(ToolDefinition::timeout)
            .unwrap_or(self.per_call_timeout)
    }

    /// Check the parameters as a whole; an empty list means valid.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_concurrency == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroConcurrency,
                "max_concurrency must be at least 1",
            ));
        }
        if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroIterations,
                "max_iterations must be at least 1",
            ));
        }
        if self.per_call_timeout.is_zero() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "per_call_timeout must be greater than zero",
            ));
        }
        if self.max_retries > 0 && self.retry_backoff.is_zero() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::RetryWithoutBackoff,
                format!(
                    "{} retries configured with zero backoff; transient failures will be retried immediately",
                    self.max_retries
                ),
            ));
        }

        issues
    }
}
