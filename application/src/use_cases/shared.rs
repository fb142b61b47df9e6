//! Shared utilities for use cases.

use crate::cancellation::OperationCancellation;
use wavefront_domain::core::string::value_preview;
use wavefront_domain::{CallRecord, ExecutionOutcome};

/// Check if cancellation has been requested.
///
/// Returns the reason if the token exists and is cancelled. A single read:
/// the flag and the reason come from the same locked snapshot.
pub(crate) fn cancellation_reason(token: &Option<OperationCancellation>) -> Option<String> {
    token.as_ref().and_then(OperationCancellation::reason)
}

/// One-line summary of an executed call for the conversation history.
pub(crate) fn summarize_call(record: &CallRecord, outcome: &ExecutionOutcome) -> String {
    match outcome {
        ExecutionOutcome::Success { payload } => format!(
            "{} ({}): success: {}",
            record.id,
            record.capability,
            value_preview(payload, 120)
        ),
        ExecutionOutcome::Failure {
            error_kind,
            message,
        } => format!(
            "{} ({}): {}: {}",
            record.id, record.capability, error_kind, message
        ),
    }
}
