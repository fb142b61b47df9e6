//! Infrastructure layer for wavefront
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod planner;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEventsConfig, FileExecutionConfig,
    FileToolsConfig,
};
pub use logging::{JsonlEventSink, TracingEventSink};
pub use planner::{PlanScript, ScriptedPlanner};
pub use tools::{FnCapability, ReadFileCapability, ToolRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wavefront_application::{ExecutionParams, RunAgentInput, RunAgentUseCase};
    use wavefront_domain::{ErrorKind, ExecutionOutcome, LoopOutcome};

    fn params() -> ExecutionParams {
        ExecutionParams::default()
            .with_max_retries(1)
            .with_retry_backoff(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_script_runs_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("note.txt");
        std::fs::write(&note, "hello").unwrap();
        let events_path = dir.path().join("events.jsonl");

        let script = PlanScript::from_toml_str(&format!(
            r#"
request = "greet from a file"

[[steps]]
[[steps.tools]]
id = "note"
capability = "cat"
arguments = {{ path = {path:?} }}

[[steps.tools]]
id = "name"
capability = "echo"
arguments = {{ who = "world" }}

[[steps.tools]]
id = "greeting"
capability = "concat"
arguments = {{ parts = ["${{note.content}}", "${{name.who}}"], separator = ", " }}
depends_on = ["note", "name"]

[[steps]]
[[steps.tools]]
id = "flaky"
capability = "fail"
arguments = {{ transient = true }}
"#,
            path = note.to_str().unwrap()
        ))
        .unwrap();

        let planner = Arc::new(ScriptedPlanner::new(script));
        let registry = Arc::new(
            ToolRegistry::new()
                .with_builtin_tools()
                .register_alias("cat", "read_file"),
        );
        let sink = Arc::new(JsonlEventSink::new(&events_path).unwrap());

        let outcome = RunAgentUseCase::new(planner.clone(), registry)
            .with_event_sink(sink.clone())
            .execute(RunAgentInput::new(planner.request()).with_execution(params()))
            .await;

        let LoopOutcome::Completed {
            results,
            iterations,
        } = outcome
        else {
            panic!("expected completion, got {:?}", outcome);
        };
        assert_eq!(iterations, 2);
        assert_eq!(results.payload("greeting"), Some(&json!("hello, world")));
        assert_eq!(
            results.get("flaky").and_then(ExecutionOutcome::error_kind),
            Some(ErrorKind::ExecutionError)
        );

        drop(sink);
        let lines = std::fs::read_to_string(&events_path).unwrap();
        let types: Vec<String> = lines
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(types.first().map(String::as_str), Some("waveStart"));
        assert!(types.iter().any(|t| t == "callRetry"));
        assert!(types.iter().any(|t| t == "callError"));
        assert_eq!(types.last().map(String::as_str), Some("waveComplete"));
    }
}
