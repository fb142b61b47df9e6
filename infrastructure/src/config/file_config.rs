//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Durations are plain milliseconds here and become [`Duration`]s in
//! [`ExecutionParams`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use wavefront_application::ExecutionParams;
use wavefront_domain::{ConfigIssue, Severity};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid [execution] settings: {0}")]
    InvalidExecution(String),

    #[error("events.jsonl_path cannot be empty")]
    EmptyJsonlPath,

    #[error("tool alias '{0}' has an empty target")]
    EmptyAliasTarget(String),
}

/// Raw executor and loop configuration from TOML
///
/// ```toml
/// [execution]
/// max_concurrency = 8
/// per_call_timeout_ms = 30000
/// max_retries = 1
/// retry_backoff_ms = 200
/// max_iterations = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub max_concurrency: usize,
    pub per_call_timeout_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub max_iterations: u32,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_concurrency: params.max_concurrency,
            per_call_timeout_ms: params.per_call_timeout.as_millis() as u64,
            max_retries: params.max_retries,
            retry_backoff_ms: params.retry_backoff.as_millis() as u64,
            max_iterations: params.max_iterations,
        }
    }
}

/// Raw event output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEventsConfig {
    /// Write every event as a JSON line to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonl_path: Option<PathBuf>,
    /// Forward events to the tracing log
    pub tracing: bool,
}

impl Default for FileEventsConfig {
    fn default() -> Self {
        Self {
            jsonl_path: None,
            tracing: true,
        }
    }
}

/// Raw tool configuration from TOML
///
/// ```toml
/// [tools.aliases]
/// cat = "read_file"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Alias → canonical capability name
    pub aliases: BTreeMap<String, String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Executor and loop settings
    pub execution: FileExecutionConfig,
    /// Event output settings
    pub events: FileEventsConfig,
    /// Tool registry settings
    pub tools: FileToolsConfig,
}

impl FileConfig {
    /// Convert the `[execution]` section into executor parameters
    pub fn to_execution_params(&self) -> ExecutionParams {
        let execution = &self.execution;
        ExecutionParams::default()
            .with_max_concurrency(execution.max_concurrency)
            .with_per_call_timeout(Duration::from_millis(execution.per_call_timeout_ms))
            .with_max_retries(execution.max_retries)
            .with_retry_backoff(Duration::from_millis(execution.retry_backoff_ms))
            .with_max_iterations(execution.max_iterations)
    }

    /// Validate the configuration
    ///
    /// Returns the non-fatal warnings on success.
    pub fn validate(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.to_execution_params().validate();
        if ConfigIssue::has_errors(&issues) {
            let messages: Vec<String> = issues
                .iter()
                .filter(|issue| issue.severity == Severity::Error)
                .map(|issue| issue.message.clone())
                .collect();
            return Err(ConfigValidationError::InvalidExecution(messages.join("; ")));
        }

        if let Some(path) = &self.events.jsonl_path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigValidationError::EmptyJsonlPath);
        }

        for (alias, target) in &self.tools.aliases {
            if target.trim().is_empty() {
                return Err(ConfigValidationError::EmptyAliasTarget(alias.clone()));
            }
        }

        Ok(issues)
    }
}
