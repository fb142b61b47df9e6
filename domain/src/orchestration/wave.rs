//! Waves and the dependency resolver.
//!
//! A plan is a flat list of [`ToolCall`]s whose `depends_on` edges form a DAG.
//! [`resolve_waves`] layers it Kahn-style: each wave holds every remaining
//! call whose dependencies were all placed in earlier waves (or already have
//! an outcome from a previous loop iteration).
//!
//! ```text
//! A ─┐
//!    ├─▶ C        waves: [A, B] → [C]
//! B ─┘
//! ```

use crate::core::error::DomainError;
use crate::orchestration::results::ResultAccumulator;
use crate::tool::entities::{ToolCall, ToolCallId};
use serde::Serialize;
use std::collections::HashSet;

/// A batch of tool calls that may run concurrently. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wave {
    /// 0-based position within the resolved plan
    pub index: usize,
    pub calls: Vec<ToolCall>,
}

impl Wave {
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.calls.iter().map(|call| &call.id)
    }
}

/// Partition `calls` into dependency-respecting waves.
///
/// `satisfied` holds outcomes from earlier loop iterations; dependencies on
/// those ids count as already met. Ties keep the input order.
///
/// Errors (nothing should execute when any is returned):
/// - [`DomainError::DuplicateCallId`]: an id repeats within the plan, or
///   already has an outcome in `satisfied`
/// - [`DomainError::UnknownDependency`]: a dependency names neither a call in
///   the plan nor a satisfied id
/// - [`DomainError::PlanCycle`]: the remaining calls cannot be ordered; lists
///   every call left unscheduled (self-dependency included)
pub fn resolve_waves(
    calls: Vec<ToolCall>,
    satisfied: &ResultAccumulator,
) -> Result<Vec<Wave>, DomainError> {
    let mut planned: HashSet<ToolCallId> = HashSet::with_capacity(calls.len());
    for call in &calls {
        if satisfied.contains(call.id.as_str()) || !planned.insert(call.id.clone()) {
            return Err(DomainError::DuplicateCallId(call.id.clone()));
        }
    }
    for call in &calls {
        if let Some(dependency) = call
            .depends_on
            .iter()
            .find(|dep| !planned.contains(*dep) && !satisfied.contains(dep.as_str()))
        {
            return Err(DomainError::UnknownDependency {
                call: call.id.clone(),
                dependency: dependency.clone(),
            });
        }
    }

    let mut placed: HashSet<ToolCallId> = HashSet::with_capacity(calls.len());
    let mut remaining = calls;
    let mut waves = Vec::new();

    while !remaining.is_empty() {
        let (ready, blocked): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|call| {
            call.depends_on
                .iter()
                .all(|dep| placed.contains(dep) || satisfied.contains(dep.as_str()))
        });

        if ready.is_empty() {
            return Err(DomainError::PlanCycle(
                blocked.into_iter().map(|call| call.id).collect(),
            ));
        }

        // Mark only after partitioning so siblings never satisfy each other
        placed.extend(ready.iter().map(|call| call.id.clone()));
        waves.push(Wave {
            index: waves.len(),
            calls: ready,
        });
        remaining = blocked;
    }

    Ok(waves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ExecutionOutcome;
    use serde_json::json;

    fn call(id: &str, deps: &[&str]) -> ToolCall {
        deps.iter()
            .fold(ToolCall::new(id, "echo"), |call, dep| call.depends_on(*dep))
    }

    fn wave_ids(waves: &[Wave]) -> Vec<Vec<&str>> {
        waves
            .iter()
            .map(|wave| wave.ids().map(|id| id.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_two_independent_then_join() {
        let calls = vec![call("A", &[]), call("B", &[]), call("C", &["A", "B"])];
        let waves = resolve_waves(calls, &ResultAccumulator::new()).unwrap();

        assert_eq!(wave_ids(&waves), vec![vec!["A", "B"], vec!["C"]]);
        assert_eq!(waves[0].index, 0);
        assert_eq!(waves[1].index, 1);
    }

    #[test]
    fn test_empty_plan_has_no_waves() {
        let waves = resolve_waves(Vec::new(), &ResultAccumulator::new()).unwrap();
        assert!(waves.is_empty());
    }

    #[test]
    fn test_chain_and_diamond() {
        // D depends on B and C, which both depend on A; E is independent
        let calls = vec![
            call("D", &["B", "C"]),
            call("C", &["A"]),
            call("E", &[]),
            call("B", &["A"]),
            call("A", &[]),
        ];
        let waves = resolve_waves(calls, &ResultAccumulator::new()).unwrap();
        assert_eq!(
            wave_ids(&waves),
            vec![vec!["E", "A"], vec!["C", "B"], vec!["D"]]
        );
    }

    #[test]
    fn test_every_dependency_lands_in_an_earlier_wave() {
        let calls = vec![
            call("a", &[]),
            call("b", &["a"]),
            call("c", &["a"]),
            call("d", &["b"]),
            call("e", &["c", "d"]),
            call("f", &[]),
            call("g", &["f", "e"]),
        ];
        let waves = resolve_waves(calls.clone(), &ResultAccumulator::new()).unwrap();

        let wave_of = |id: &ToolCallId| {
            waves
                .iter()
                .position(|wave| wave.ids().any(|placed| placed == id))
        };
        let total: usize = waves.iter().map(Wave::len).sum();
        assert_eq!(total, calls.len());
        for c in &calls {
            let own = wave_of(&c.id).unwrap();
            for dep in &c.depends_on {
                assert!(wave_of(dep).unwrap() < own, "{} must follow {}", c.id, dep);
            }
        }
        assert!(waves.iter().all(|wave| !wave.is_empty()));
    }

    #[test]
    fn test_two_node_cycle() {
        let calls = vec![call("A", &["B"]), call("B", &["A"])];
        let err = resolve_waves(calls, &ResultAccumulator::new()).unwrap_err();
        assert_eq!(err, DomainError::PlanCycle(vec!["A".into(), "B".into()]));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let calls = vec![call("ok", &[]), call("A", &["A"])];
        let err = resolve_waves(calls, &ResultAccumulator::new()).unwrap_err();
        assert_eq!(err, DomainError::PlanCycle(vec!["A".into()]));
    }

    #[test]
    fn test_cycle_reports_downstream_calls_too() {
        let calls = vec![
            call("A", &[]),
            call("B", &["C"]),
            call("C", &["B"]),
            call("D", &["B"]),
        ];
        let err = resolve_waves(calls, &ResultAccumulator::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::PlanCycle(vec!["B".into(), "C".into(), "D".into()])
        );
    }

    #[test]
    fn test_unknown_dependency() {
        let calls = vec![call("A", &[]), call("C", &["A", "Z"])];
        let err = resolve_waves(calls, &ResultAccumulator::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownDependency {
                call: "C".into(),
                dependency: "Z".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let calls = vec![call("A", &[]), call("A", &[])];
        let err = resolve_waves(calls, &ResultAccumulator::new()).unwrap_err();
        assert_eq!(err, DomainError::DuplicateCallId("A".into()));
    }

    #[test]
    fn test_satisfied_ids_count_as_met() {
        let mut satisfied = ResultAccumulator::new();
        satisfied
            .insert("A".into(), ExecutionOutcome::success(json!("earlier")))
            .unwrap();

        let waves = resolve_waves(vec![call("B", &["A"]), call("C", &["B"])], &satisfied).unwrap();
        assert_eq!(wave_ids(&waves), vec![vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_reusing_a_satisfied_id_is_rejected() {
        let mut satisfied = ResultAccumulator::new();
        satisfied
            .insert("A".into(), ExecutionOutcome::success(json!(1)))
            .unwrap();

        let err = resolve_waves(vec![call("A", &[])], &satisfied).unwrap_err();
        assert_eq!(err, DomainError::DuplicateCallId("A".into()));
    }
}
