//! Console output formatter for loop outcomes

use colored::Colorize;
use std::process::ExitCode;
use wavefront_domain::core::string::value_preview;
use wavefront_domain::{ExecutionOutcome, LoopOutcome};

/// Width of a payload preview in the summary
const PREVIEW_LEN: usize = 80;

/// Formats [`LoopOutcome`]s for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a summary: status line, then one line per call
    pub fn format(outcome: &LoopOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Wavefront Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_line(outcome)
        ));

        let results = outcome.results();
        let (succeeded, failed) = results.counts();
        output.push_str(&format!(
            "{} {} succeeded, {} failed\n",
            "Calls:".cyan().bold(),
            succeeded,
            failed
        ));

        if !results.is_empty() {
            output.push_str(&Self::section_header("Results"));
            for (id, call_outcome) in results.iter() {
                match call_outcome {
                    ExecutionOutcome::Success { payload } => output.push_str(&format!(
                        "  {} {}  {}\n",
                        "ok".green().bold(),
                        id,
                        value_preview(payload, PREVIEW_LEN).dimmed()
                    )),
                    ExecutionOutcome::Failure {
                        error_kind,
                        message,
                    } => output.push_str(&format!(
                        "  {} {}  {}: {}\n",
                        "!!".red().bold(),
                        id,
                        error_kind,
                        message
                    )),
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &LoopOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    fn status_line(outcome: &LoopOutcome) -> String {
        match outcome {
            LoopOutcome::Completed { iterations, .. } => format!(
                "{} after {} iteration(s)",
                "completed".green().bold(),
                iterations
            ),
            LoopOutcome::Cancelled {
                reason,
                stopped_before_wave,
                ..
            } => format!(
                "{} before iteration {} ({})",
                "cancelled".yellow().bold(),
                stopped_before_wave,
                reason
            ),
            LoopOutcome::Failed {
                error_kind,
                message,
                ..
            } => format!("{} [{}] {}", "failed".red().bold(), error_kind, message),
            LoopOutcome::IterationLimitExceeded { iterations, .. } => format!(
                "{} after {} iteration(s)",
                "iteration limit exceeded".yellow().bold(),
                iterations
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

/// Process exit status for an outcome
pub fn exit_code(outcome: &LoopOutcome) -> ExitCode {
    ExitCode::from(exit_status(outcome))
}

fn exit_status(outcome: &LoopOutcome) -> u8 {
    match outcome {
        LoopOutcome::Completed { .. } => 0,
        LoopOutcome::Failed { .. } => 1,
        LoopOutcome::Cancelled { .. } => 2,
        LoopOutcome::IterationLimitExceeded { .. } => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wavefront_domain::{DomainError, ErrorKind, ResultAccumulator};

    fn results() -> ResultAccumulator {
        let mut results = ResultAccumulator::new();
        results
            .insert("A".into(), ExecutionOutcome::success(json!({"room": "4B"})))
            .unwrap();
        results
            .insert(
                "X".into(),
                ExecutionOutcome::failure(ErrorKind::Timeout, "timed out after 100ms"),
            )
            .unwrap();
        results
    }

    #[test]
    fn test_summary_lists_every_call() {
        colored::control::set_override(false);
        let outcome = LoopOutcome::Completed {
            results: results(),
            iterations: 2,
        };

        let text = ConsoleFormatter::format(&outcome);
        assert!(text.contains("completed after 2 iteration(s)"));
        assert!(text.contains("1 succeeded, 1 failed"));
        assert!(text.contains(r#"ok A  {"room":"4B"}"#));
        assert!(text.contains("!! X  timeout: timed out after 100ms"));
    }

    #[test]
    fn test_summary_cancelled() {
        colored::control::set_override(false);
        let outcome = LoopOutcome::Cancelled {
            results: ResultAccumulator::new(),
            reason: "interrupted by user".into(),
            stopped_before_wave: 2,
        };
        let text = ConsoleFormatter::format(&outcome);
        assert!(text.contains("cancelled before iteration 2 (interrupted by user)"));
        assert!(text.contains("Wavefront Results"));
        // No per-call section for an empty accumulator
        assert!(!text.contains("\nResults\n"));
        assert!(!text.contains("  ok "));
        assert!(!text.contains("  !! "));
    }

    #[test]
    fn test_summary_has_results_section_when_calls_ran() {
        colored::control::set_override(false);
        let outcome = LoopOutcome::Completed {
            results: results(),
            iterations: 1,
        };
        let text = ConsoleFormatter::format(&outcome);
        assert!(text.contains("\nResults\n"));
    }

    #[test]
    fn test_json_output() {
        let outcome = LoopOutcome::failed(
            &DomainError::PlanCycle(vec!["A".into(), "B".into()]),
            results(),
        );
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&outcome)).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error_kind"], "plan_cycle");
        assert_eq!(value["results"]["A"]["status"], "success");
    }

    #[test]
    fn test_exit_status() {
        let empty = ResultAccumulator::new;
        assert_eq!(
            exit_status(&LoopOutcome::Completed {
                results: empty(),
                iterations: 1
            }),
            0
        );
        assert_eq!(
            exit_status(&LoopOutcome::failed(
                &DomainError::DuplicateCallId("A".into()),
                empty()
            )),
            1
        );
        assert_eq!(
            exit_status(&LoopOutcome::Cancelled {
                results: empty(),
                reason: "r".into(),
                stopped_before_wave: 1
            }),
            2
        );
        assert_eq!(
            exit_status(&LoopOutcome::IterationLimitExceeded {
                results: empty(),
                iterations: 5
            }),
            3
        );
    }
}
