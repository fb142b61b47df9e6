//! Result accumulator: the write-once map of call id to outcome.

use crate::core::error::DomainError;
use crate::tool::entities::ToolCallId;
use crate::tool::value_objects::ExecutionOutcome;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Mapping from call id to [`ExecutionOutcome`], grown across waves and
/// loop iterations.
///
/// Entries are write-once: an id that already has an outcome can never be
/// overwritten. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultAccumulator {
    outcomes: HashMap<ToolCallId, ExecutionOutcome>,
    order: Vec<ToolCallId>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one call.
    pub fn insert(&mut self, id: ToolCallId, outcome: ExecutionOutcome) -> Result<(), DomainError> {
        if self.outcomes.contains_key(&id) {
            return Err(DomainError::DuplicateOutcome(id));
        }
        self.order.push(id.clone());
        self.outcomes.insert(id, outcome);
        Ok(())
    }

    /// Merge a delta (typically one wave's outcomes).
    ///
    /// All-or-nothing: if any id is already present, or appears twice in the
    /// delta, nothing is written.
    pub fn merge(
        &mut self,
        delta: impl IntoIterator<Item = (ToolCallId, ExecutionOutcome)>,
    ) -> Result<(), DomainError> {
        let delta: Vec<_> = delta.into_iter().collect();
        let mut incoming = HashSet::with_capacity(delta.len());
        for (id, _) in &delta {
            if self.outcomes.contains_key(id) || !incoming.insert(id) {
                return Err(DomainError::DuplicateOutcome(id.clone()));
            }
        }
        for (id, outcome) in delta {
            self.order.push(id.clone());
            self.outcomes.insert(id, outcome);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ExecutionOutcome> {
        self.outcomes.get(id)
    }

    /// Payload of a successful call, if any
    pub fn payload(&self, id: &str) -> Option<&Value> {
        self.get(id).and_then(ExecutionOutcome::payload)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.outcomes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Outcomes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&ToolCallId, &ExecutionOutcome)> {
        self.order
            .iter()
            .filter_map(|id| self.outcomes.get(id).map(|outcome| (id, outcome)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.order.iter()
    }

    /// (succeeded, failed)
    pub fn counts(&self) -> (usize, usize) {
        let succeeded = self.outcomes.values().filter(|o| o.is_success()).count();
        (succeeded, self.outcomes.len() - succeeded)
    }
}

impl Serialize for ResultAccumulator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, outcome) in self.iter() {
            map.serialize_entry(id, outcome)?;
        }
        map.end()
    }
}
