//! Tool domain value objects: immutable error and outcome types
//!
//! A capability either returns a JSON payload or a [`ToolError`]. The wave
//! executor turns every call into exactly one [`ExecutionOutcome`], which is
//! what the rest of the system (accumulator, planner) sees.
//!
//! Error codes in [`ToolError`] drive the **retry strategy**:
//!
//! | Code | Retryable? | Description |
//! |------|-----------|-------------|
//! | `TRANSIENT` | Yes | Temporary failure, may succeed on retry |
//! | `INVALID_ARGUMENT` | No | Malformed input (e.g. an unresolved placeholder) |
//! | `NOT_FOUND` | No | Missing resource |
//! | `EXECUTION_FAILED` | No | Runtime failure |
//! | `TIMEOUT` | No | The capability gave up on its own |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entities::ToolCallId;

pub const TRANSIENT: &str = "TRANSIENT";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const EXECUTION_FAILED: &str = "EXECUTION_FAILED";
pub const TIMEOUT: &str = "TIMEOUT";

/// Error raised by a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "TRANSIENT", "NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(TRANSIENT, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            NOT_FOUND,
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(INVALID_ARGUMENT, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(EXECUTION_FAILED, message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            TIMEOUT,
            format!("Operation timed out: {}", operation.into()),
        )
    }

    /// Only transient failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.code == TRANSIENT
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Kind of per-call failure recorded in an [`ExecutionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The call exceeded its allotted duration
    Timeout,
    /// The capability failed (after any retries) or panicked
    ExecutionError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::ExecutionError => "execution_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal outcome of one tool call.
///
/// Written exactly once per call id into the result accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success { payload: Value },
    Failure { error_kind: ErrorKind, message: String },
}

impl ExecutionOutcome {
    pub fn success(payload: impl Into<Value>) -> Self {
        Self::Success {
            payload: payload.into(),
        }
    }

    pub fn failure(error_kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            error_kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Payload of a successful call
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Error kind of a failed call
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_kind, .. } => Some(*error_kind),
        }
    }
}

/// Execution metadata for one call, reported alongside its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: ToolCallId,
    /// Canonical capability name that was invoked
    pub capability: String,
    /// Number of attempts made (1 = no retry)
    pub attempts: u32,
    pub duration_ms: u64,
}
