//! Structured configuration issues.
//!
//! Execution parameters are validated as a whole and every problem is
//! reported, rather than stopping at the first one. Callers decide what to do
//! with warnings; errors mean the configuration cannot work at all.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `max_concurrency = 0`: no call could ever start.
    ZeroConcurrency,
    /// `max_iterations = 0`: the loop could never execute anything.
    ZeroIterations,
    /// `per_call_timeout = 0`: every call would time out immediately.
    ZeroTimeout,
    /// Retries configured with a zero backoff hammer the capability.
    RetryWithoutBackoff,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// True if any issue in the list is an error
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|issue| issue.severity == Severity::Error)
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
