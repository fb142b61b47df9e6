//! Execution event port.
//!
//! [`EventSink`] is an **output port**: the wave executor and the orchestrator
//! loop report what they are doing, and adapters (tracing, JSONL file, test
//! recorders) decide what to do with it.
//!
//! Emission is fire-and-forget. Sinks must not block, and a sink that panics
//! is isolated by [`emit_isolated`] so it can never fail a wave.
//!
//! # Events
//!
//! | Event | Payload | When |
//! |-------|---------|------|
//! | `waveStart` | `waveIndex`, `size` | before the first call of a wave starts |
//! | `waveComplete` | `waveIndex`, `durationMs` | after every call of the wave has an outcome |
//! | `callStart` | `id`, `capability` | a call acquired a concurrency slot |
//! | `callRetry` | `id`, `attempt`, `delayMs`, `error` | a transient failure will be retried |
//! | `callComplete` | `id`, `durationMs` | a call succeeded |
//! | `callError` | `id`, `errorKind`, `durationMs` | a call ended in failure |
//! | `operationCancelled` | `reason`, `stoppedBeforeWave` | the loop observed cancellation |

use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::warn;
use wavefront_domain::{ErrorKind, ToolCallId};

/// Something the executor or the loop reports.
///
/// Serialized with a camelCase `type` tag and camelCase fields, matching
/// [`WaveEvent::name`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WaveEvent {
    WaveStart {
        wave_index: usize,
        size: usize,
    },
    WaveComplete {
        wave_index: usize,
        duration_ms: u64,
    },
    CallStart {
        id: ToolCallId,
        capability: String,
    },
    CallRetry {
        id: ToolCallId,
        attempt: u32,
        delay_ms: u64,
        error: String,
    },
    CallComplete {
        id: ToolCallId,
        duration_ms: u64,
    },
    CallError {
        id: ToolCallId,
        error_kind: ErrorKind,
        duration_ms: u64,
    },
    OperationCancelled {
        reason: String,
        stopped_before_wave: u32,
    },
}

impl WaveEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            WaveEvent::WaveStart { .. } => "waveStart",
            WaveEvent::WaveComplete { .. } => "waveComplete",
            WaveEvent::CallStart { .. } => "callStart",
            WaveEvent::CallRetry { .. } => "callRetry",
            WaveEvent::CallComplete { .. } => "callComplete",
            WaveEvent::CallError { .. } => "callError",
            WaveEvent::OperationCancelled { .. } => "operationCancelled",
        }
    }
}

/// Receiver of [`WaveEvent`]s.
///
/// Called from executor tasks running concurrently; implementations must be
/// cheap and must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &WaveEvent);
}

/// Event sink that discards everything.
pub struct NoEventSink;

impl EventSink for NoEventSink {
    fn emit(&self, _event: &WaveEvent) {}
}

/// Deliver an event, swallowing any panic raised by the sink.
pub fn emit_isolated(sink: &dyn EventSink, event: &WaveEvent) {
    if catch_unwind(AssertUnwindSafe(|| sink.emit(event))).is_err() {
        warn!(event = event.name(), "Event sink panicked; event dropped");
    }
}
