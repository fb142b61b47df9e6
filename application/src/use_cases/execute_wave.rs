//! Execute Wave use case
//!
//! Runs one [`Wave`] to completion: every call in it ends with exactly one
//! [`ExecutionOutcome`], success or failure. Calls run concurrently on a
//! [`JoinSet`], gated by a semaphore of `max_concurrency` permits.
//!
//! ```text
//!            ┌─ permit ─▶ call A ─▶ timeout/retry ─▶ outcome A ─┐
//! wave ──────┼─ permit ─▶ call B ─▶ timeout/retry ─▶ outcome B ─┼──▶ WaveReport
//!            └─ (waits) ▶ call C ─▶ timeout/retry ─▶ outcome C ─┘
//! ```
//!
//! Per-call problems never escape as errors:
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | attempt exceeds its timeout | `Failure { Timeout }` |
//! | `TRANSIENT` error, retries left | sleep `retry_backoff * 2^(n-1)`, try again |
//! | other error, or retries exhausted | `Failure { ExecutionError }` |
//! | capability panics | `Failure { ExecutionError }` |
//!
//! The only error [`ExecuteWaveUseCase::execute`] returns is an unknown
//! capability, detected before any call starts.

use crate::config::ExecutionParams;
use crate::ports::event_sink::{EventSink, NoEventSink, WaveEvent, emit_isolated};
use crate::ports::tool_registry::{Capability, ToolRegistryPort};
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use wavefront_domain::tool::placeholder::{placeholder_references, resolve_arguments};
use wavefront_domain::{
    Arguments, CallRecord, DomainError, ErrorKind, ExecutionOutcome, ResultAccumulator, ToolCall,
    ToolCallId, Wave,
};

/// Result of one executed wave.
#[derive(Debug, Clone)]
pub struct WaveReport {
    pub wave_index: usize,
    /// One outcome per call, in wave order
    pub outcomes: Vec<(ToolCallId, ExecutionOutcome)>,
    /// Attempts and timing per call, in wave order
    pub records: Vec<CallRecord>,
    pub duration_ms: u64,
}

impl WaveReport {
    pub fn outcome(&self, id: &str) -> Option<&ExecutionOutcome> {
        self.outcomes
            .iter()
            .find(|(call_id, _)| call_id.as_str() == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn record(&self, id: &str) -> Option<&CallRecord> {
        self.records.iter().find(|record| record.id.as_str() == id)
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .count()
    }
}

/// A call whose capability has been resolved
struct PreparedCall {
    id: ToolCallId,
    /// Canonical name (aliases already resolved)
    capability_name: String,
    capability: Arc<dyn Capability>,
    timeout: Duration,
}

/// Use case for executing waves of tool calls
pub struct ExecuteWaveUseCase<T: ToolRegistryPort + 'static> {
    registry: Arc<T>,
    params: ExecutionParams,
    events: Arc<dyn EventSink>,
}

impl<T: ToolRegistryPort + 'static> Clone for ExecuteWaveUseCase<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            params: self.params.clone(),
            events: self.events.clone(),
        }
    }
}

impl<T: ToolRegistryPort + 'static> ExecuteWaveUseCase<T> {
    pub fn new(registry: Arc<T>, params: ExecutionParams) -> Self {
        Self {
            registry,
            params,
            events: Arc::new(NoEventSink),
        }
    }

    /// Set the sink that receives wave and call events
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Verify every call names a known capability.
    pub fn check_capabilities(&self, calls: &[ToolCall]) -> Result<(), DomainError> {
        for call in calls {
            self.prepare(call)?;
        }
        Ok(())
    }

    fn prepare(&self, call: &ToolCall) -> Result<PreparedCall, DomainError> {
        let unknown = || DomainError::UnknownCapability {
            call: call.id.clone(),
            capability: call.capability.clone(),
        };

        let canonical = self
            .registry
            .tool_spec()
            .resolve(&call.capability)
            .ok_or_else(unknown)?
            .to_string();
        let capability = self.registry.resolve(&canonical).ok_or_else(unknown)?;

        if canonical != call.capability {
            debug!(
                call_id = %call.id,
                original = %call.capability,
                resolved = %canonical,
                "Resolved capability alias"
            );
        }

        Ok(PreparedCall {
            id: call.id.clone(),
            timeout: self.params.timeout_for(self.registry.get_tool(&canonical)),
            capability_name: canonical,
            capability,
        })
    }

    /// Execute one wave.
    ///
    /// Placeholders in arguments are resolved against `accumulator` as it
    /// stands now; siblings in the same wave never see each other's output.
    pub async fn execute(
        &self,
        wave: &Wave,
        accumulator: &ResultAccumulator,
    ) -> Result<WaveReport, DomainError> {
        let prepared = wave
            .calls
            .iter()
            .map(|call| self.prepare(call))
            .collect::<Result<Vec<_>, _>>()?;

        let started = Instant::now();
        info!(wave = wave.index, size = wave.len(), "Wave started");
        self.emit(&WaveEvent::WaveStart {
            wave_index: wave.index,
            size: wave.len(),
        });

        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrency.max(1)));
        let mut join_set = JoinSet::new();

        for (call, prepared) in wave.calls.iter().zip(prepared) {
            let references = placeholder_references(&call.arguments);
            if !references.is_empty() {
                debug!(
                    call_id = %call.id,
                    references = ?references,
                    "Resolving argument placeholders"
                );
            }
            let arguments = resolve_arguments(&call.arguments, accumulator);

            let semaphore = Arc::clone(&semaphore);
            let events = Arc::clone(&self.events);
            let params = self.params.clone();

            join_set.spawn(async move {
                // Held until the call reaches its outcome
                let _permit = acquire_slot(semaphore).await;
                run_call(prepared, arguments, &params, events.as_ref()).await
            });
        }

        // Barrier: wait for every call, no short-circuit
        let mut finished: HashMap<ToolCallId, (ExecutionOutcome, CallRecord)> =
            HashMap::with_capacity(wave.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((outcome, record)) => {
                    finished.insert(record.id.clone(), (outcome, record));
                }
                Err(e) => {
                    warn!("Call task join error: {}", e);
                }
            }
        }

        let mut outcomes = Vec::with_capacity(wave.len());
        let mut records = Vec::with_capacity(wave.len());
        for call in &wave.calls {
            let (outcome, record) = finished.remove(&call.id).unwrap_or_else(|| {
                (
                    ExecutionOutcome::failure(
                        ErrorKind::ExecutionError,
                        "call task ended without an outcome",
                    ),
                    CallRecord {
                        id: call.id.clone(),
                        capability: call.capability.clone(),
                        attempts: 0,
                        duration_ms: 0,
                    },
                )
            });
            outcomes.push((call.id.clone(), outcome));
            records.push(record);
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        let report = WaveReport {
            wave_index: wave.index,
            outcomes,
            records,
            duration_ms,
        };

        info!(
            wave = wave.index,
            duration_ms,
            failed = report.failures(),
            "Wave completed"
        );
        self.emit(&WaveEvent::WaveComplete {
            wave_index: wave.index,
            duration_ms,
        });

        Ok(report)
    }

    /// Execute waves strictly in order, merging each wave's outcomes into
    /// `accumulator` before the next starts.
    ///
    /// All capabilities are checked up front, so an unknown name means no
    /// wave runs at all.
    pub async fn execute_plan(
        &self,
        waves: &[Wave],
        accumulator: &mut ResultAccumulator,
    ) -> Result<Vec<WaveReport>, DomainError> {
        for wave in waves {
            self.check_capabilities(&wave.calls)?;
        }

        let mut reports = Vec::with_capacity(waves.len());
        for wave in waves {
            let report = self.execute(wave, accumulator).await?;
            accumulator.merge(report.outcomes.iter().cloned())?;
            reports.push(report);
        }
        Ok(reports)
    }

    fn emit(&self, event: &WaveEvent) {
        emit_isolated(self.events.as_ref(), event);
    }
}

/// Drive one call through its attempts to a terminal outcome.
async fn run_call(
    call: PreparedCall,
    arguments: Arguments,
    params: &ExecutionParams,
    events: &dyn EventSink,
) -> (ExecutionOutcome, CallRecord) {
    let started = Instant::now();
    debug!(call_id = %call.id, capability = %call.capability_name, "Call started");
    emit_isolated(
        events,
        &WaveEvent::CallStart {
            id: call.id.clone(),
            capability: call.capability_name.clone(),
        },
    );

    let mut attempts: u32 = 0;
    let outcome = loop {
        attempts += 1;
        let invocation = AssertUnwindSafe(call.capability.invoke(arguments.clone())).catch_unwind();

        match tokio::time::timeout(call.timeout, invocation).await {
            Err(_) => {
                break ExecutionOutcome::failure(
                    ErrorKind::Timeout,
                    format!("timed out after {}ms", call.timeout.as_millis()),
                );
            }
            Ok(Err(panic)) => {
                break ExecutionOutcome::failure(
                    ErrorKind::ExecutionError,
                    format!("capability panicked: {}", panic_message(panic.as_ref())),
                );
            }
            Ok(Ok(Ok(payload))) => break ExecutionOutcome::success(payload),
            Ok(Ok(Err(error))) if error.is_retryable() && attempts <= params.max_retries => {
                let delay = params.backoff_for(attempts);
                warn!(
                    call_id = %call.id,
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Transient failure, retrying: {}",
                    error
                );
                emit_isolated(
                    events,
                    &WaveEvent::CallRetry {
                        id: call.id.clone(),
                        attempt: attempts,
                        delay_ms: delay.as_millis() as u64,
                        error: error.to_string(),
                    },
                );
                tokio::time::sleep(delay).await;
            }
            Ok(Ok(Err(error))) => {
                break ExecutionOutcome::failure(ErrorKind::ExecutionError, error.to_string());
            }
        }
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        ExecutionOutcome::Success { .. } => {
            debug!(call_id = %call.id, duration_ms, attempts, "Call completed");
            emit_isolated(
                events,
                &WaveEvent::CallComplete {
                    id: call.id.clone(),
                    duration_ms,
                },
            );
        }
        ExecutionOutcome::Failure {
            error_kind,
            message,
        } => {
            warn!(
                call_id = %call.id,
                %error_kind,
                duration_ms,
                attempts,
                "Call failed: {}",
                message
            );
            emit_isolated(
                events,
                &WaveEvent::CallError {
                    id: call.id.clone(),
                    error_kind: *error_kind,
                    duration_ms,
                },
            );
        }
    }

    let record = CallRecord {
        id: call.id,
        capability: call.capability_name,
        attempts,
        duration_ms,
    };
    (outcome, record)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Wait for a concurrency slot.
///
/// The wave owns its semaphore and never closes it. A closed semaphore is
/// logged and the call runs without a permit rather than being dropped.
async fn acquire_slot(semaphore: Arc<Semaphore>) -> Option<OwnedSemaphorePermit> {
    match semaphore.acquire_owned().await {
        Ok(permit) => Some(permit),
        Err(_) => {
            warn!("Concurrency semaphore closed; running call without a permit");
            None
        }
    }
}
