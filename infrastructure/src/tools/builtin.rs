//! Builtin demo capabilities: echo, concat, sleep, fail
//!
//! Small, dependency-free capabilities that make plan scripts runnable out of
//! the box. `read_file` lives in [`super::file`].

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};
use std::time::Duration;
use wavefront_application::Capability;
use wavefront_domain::{Arguments, ArgumentsExt, ToolDefinition, ToolError, ToolParameter};

pub const ECHO: &str = "echo";
pub const CONCAT: &str = "concat";
pub const SLEEP: &str = "sleep";
pub const FAIL: &str = "fail";

type Handler = dyn Fn(Arguments) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync;

/// A capability backed by a closure.
pub struct FnCapability {
    handler: Box<Handler>,
}

impl FnCapability {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Arguments) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }
}

#[async_trait]
impl Capability for FnCapability {
    async fn invoke(&self, arguments: Arguments) -> Result<Value, ToolError> {
        (self.handler)(arguments).await
    }
}

pub fn echo_definition() -> ToolDefinition {
    ToolDefinition::new(ECHO, "Return the arguments unchanged as an object")
}

pub fn concat_definition() -> ToolDefinition {
    ToolDefinition::new(CONCAT, "Join an array of values into one string")
        .with_parameter(ToolParameter::new("parts", "Values to join", true).with_type("array"))
        .with_parameter(ToolParameter::new("separator", "Separator (default: empty)", false))
}

pub fn sleep_definition() -> ToolDefinition {
    ToolDefinition::new(SLEEP, "Wait for the given number of milliseconds")
        .with_parameter(ToolParameter::new("ms", "Milliseconds to wait", true).with_type("number"))
}

pub fn fail_definition() -> ToolDefinition {
    ToolDefinition::new(FAIL, "Always fail; useful to exercise retries and failure handling")
        .with_parameter(ToolParameter::new("message", "Error message", false))
        .with_parameter(
            ToolParameter::new("transient", "Report a retryable failure", false)
                .with_type("boolean"),
        )
}

pub fn echo() -> FnCapability {
    FnCapability::new(|arguments| run_echo(arguments).boxed())
}

pub fn concat() -> FnCapability {
    FnCapability::new(|arguments| run_concat(arguments).boxed())
}

pub fn sleep() -> FnCapability {
    FnCapability::new(|arguments| run_sleep(arguments).boxed())
}

pub fn fail() -> FnCapability {
    FnCapability::new(|arguments| run_fail(arguments).boxed())
}

async fn run_echo(arguments: Arguments) -> Result<Value, ToolError> {
    Ok(Value::Object(arguments.into_iter().collect()))
}

async fn run_concat(arguments: Arguments) -> Result<Value, ToolError> {
    let parts = arguments
        .get("parts")
        .and_then(Value::as_array)
        .ok_or_else(|| ToolError::invalid_argument("'parts' must be an array"))?;
    let separator = arguments.get_string("separator").unwrap_or("");
    let joined = parts
        .iter()
        .map(|part| match part {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator);
    Ok(Value::String(joined))
}

async fn run_sleep(arguments: Arguments) -> Result<Value, ToolError> {
    let ms = arguments
        .get_u64("ms")
        .ok_or_else(|| ToolError::invalid_argument("'ms' must be a non-negative integer"))?;
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(json!({ "slept_ms": ms }))
}

async fn run_fail(arguments: Arguments) -> Result<Value, ToolError> {
    let message = arguments
        .get_string("message")
        .unwrap_or("requested failure")
        .to_string();
    if arguments.get_bool("transient").unwrap_or(false) {
        Err(ToolError::transient(message))
    } else {
        Err(ToolError::execution_failed(message))
    }
}
