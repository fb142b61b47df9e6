//! Forwards wave events to `tracing`.

use tracing::{debug, info, warn};
use wavefront_application::{EventSink, WaveEvent};

/// Event sink that logs every [`WaveEvent`] as a structured `tracing` event.
///
/// Wave boundaries log at `info`, per-call progress at `debug`, failures and
/// cancellation at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &WaveEvent) {
        match event {
            WaveEvent::WaveStart { wave_index, size } => {
                info!(wave = wave_index, size, "Wave started");
            }
            WaveEvent::WaveComplete {
                wave_index,
                duration_ms,
            } => {
                info!(wave = wave_index, duration_ms, "Wave complete");
            }
            WaveEvent::CallStart { id, capability } => {
                debug!(call_id = %id, capability = %capability, "Call started");
            }
            WaveEvent::CallRetry {
                id,
                attempt,
                delay_ms,
                error,
            } => {
                warn!(call_id = %id, attempt, delay_ms, error = %error, "Retrying call");
            }
            WaveEvent::CallComplete { id, duration_ms } => {
                debug!(call_id = %id, duration_ms, "Call complete");
            }
            WaveEvent::CallError {
                id,
                error_kind,
                duration_ms,
            } => {
                warn!(call_id = %id, error_kind = %error_kind, duration_ms, "Call failed");
            }
            WaveEvent::OperationCancelled {
                reason,
                stopped_before_wave,
            } => {
                warn!(reason = %reason, stopped_before_wave, "Operation cancelled");
            }
        }
    }
}
