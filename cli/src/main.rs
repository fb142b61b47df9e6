//! CLI entrypoint for wavefront
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod output;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, OutputFormat};
use output::{ConsoleFormatter, exit_code};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wavefront_application::{
    CompositeEventSink, EventSink, OperationCancellation, RunAgentInput, RunAgentUseCase,
};
use wavefront_infrastructure::{
    ConfigLoader, JsonlEventSink, ScriptedPlanner, ToolRegistry, TracingEventSink,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs get flushed
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let plan_path = cli
        .plan
        .as_deref()
        .ok_or_else(|| anyhow!("A plan script is required"))?;

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    cli.apply_overrides(&mut config);

    for issue in config.validate()? {
        warn!("{}", issue);
    }
    let execution = config.to_execution_params();

    // === Dependency Injection ===
    let planner = Arc::new(
        ScriptedPlanner::load(plan_path)
            .with_context(|| format!("Failed to load plan {}", plan_path.display()))?,
    );

    let registry = config
        .tools
        .aliases
        .iter()
        .fold(ToolRegistry::new().with_builtin_tools(), |registry, (alias, target)| {
            registry.register_alias(alias.as_str(), target.as_str())
        });

    let mut events = CompositeEventSink::default();
    if config.events.tracing {
        events.push(Arc::new(TracingEventSink));
    }
    if let Some(path) = &config.events.jsonl_path {
        let sink = JsonlEventSink::new(path)
            .ok_or_else(|| anyhow!("Cannot write events to {}", path.display()))?;
        events.push(Arc::new(sink));
    }
    let events: Arc<dyn EventSink> = Arc::new(events);

    // Ctrl-C stops the loop before its next iteration; the running wave finishes
    let cancellation = OperationCancellation::new();
    let token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() && token.cancel("interrupted by user") {
            warn!("Interrupt received; finishing the current wave");
        }
    });

    info!(
        plan = %plan_path.display(),
        max_concurrency = execution.max_concurrency,
        max_iterations = execution.max_iterations,
        "Starting wavefront"
    );

    let input = RunAgentInput::new(planner.request()).with_execution(execution);
    let use_case = RunAgentUseCase::new(planner, Arc::new(registry))
        .with_cancellation(cancellation)
        .with_event_sink(events);

    let outcome = use_case.execute(input).await;

    let rendered = match cli.output {
        OutputFormat::Summary => ConsoleFormatter::format(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", rendered);

    Ok(exit_code(&outcome))
}

/// Initialize logging based on verbosity level
///
/// Console logs go to stderr so `-o json` output stays parseable. With a log
/// directory, a second layer writes to a daily rolling file.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "wavefront.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .init();
            None
        }
    }
}
