//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wavefront_infrastructure::FileConfig;

/// Output format for the final outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary of every call
    Summary,
    /// The full outcome as JSON
    Json,
}

/// CLI arguments for wavefront
#[derive(Parser, Debug)]
#[command(name = "wavefront")]
#[command(author, version, about = "Run a tool-call plan as dependency-ordered concurrent waves")]
#[command(long_about = r#"
Wavefront replays a plan script through the orchestrator loop.

Each step of the script is one planner response. Its tool calls are layered
into waves by their `depends_on` edges; calls in the same wave run
concurrently, and later calls can reference earlier payloads with
placeholders such as "${fetch.body}".

Configuration files are loaded from (in priority order):
1. WAVEFRONT_* environment variables (e.g. WAVEFRONT_EXECUTION__MAX_RETRIES=3)
2. --config <path>     Explicit config file
3. ./wavefront.toml    Project-level config
4. ~/.config/wavefront/config.toml   Global config

Command-line flags override all of them.

Exit status: 0 completed, 1 failed, 2 cancelled, 3 iteration limit exceeded.

Example:
  wavefront plan.toml
  wavefront --max-concurrency 2 --events events.jsonl plan.toml
  wavefront -o json plan.json
"#)]
pub struct Cli {
    /// Plan script (.toml or .json)
    #[arg(value_name = "PLAN", required_unless_present = "show_config")]
    pub plan: Option<PathBuf>,

    /// Maximum calls in flight within one wave
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Timeout for a single call attempt, in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Extra attempts after a transient failure
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Maximum plan → execute iterations
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Write every wave event as a JSON line to this file
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut FileConfig) {
        if let Some(n) = self.max_concurrency {
            config.execution.max_concurrency = n;
        }
        if let Some(ms) = self.timeout_ms {
            config.execution.per_call_timeout_ms = ms;
        }
        if let Some(n) = self.max_retries {
            config.execution.max_retries = n;
        }
        if let Some(n) = self.max_iterations {
            config.execution.max_iterations = n;
        }
        if let Some(path) = &self.events {
            config.events.jsonl_path = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "wavefront",
            "--max-concurrency",
            "2",
            "--timeout-ms",
            "500",
            "-vv",
            "-o",
            "json",
            "plan.toml",
        ])
        .unwrap();

        assert_eq!(cli.plan, Some(PathBuf::from("plan.toml")));
        assert_eq!(cli.max_concurrency, Some(2));
        assert_eq!(cli.timeout_ms, Some(500));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_plan_required_unless_show_config() {
        assert!(Cli::try_parse_from(["wavefront"]).is_err());
        let cli = Cli::try_parse_from(["wavefront", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.plan.is_none());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "wavefront",
            "--max-retries",
            "0",
            "--max-iterations",
            "9",
            "--events",
            "out.jsonl",
            "plan.toml",
        ])
        .unwrap();

        let mut config = FileConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.execution.max_retries, 0);
        assert_eq!(config.execution.max_iterations, 9);
        assert_eq!(config.events.jsonl_path, Some(PathBuf::from("out.jsonl")));
        // Untouched values keep the file's settings
        assert_eq!(config.execution.max_concurrency, 8);
    }
}
