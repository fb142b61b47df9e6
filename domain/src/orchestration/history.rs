//! In-memory conversation history handed to the planner.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Planner,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Planner => "planner",
            Role::Tool => "tool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Append-only log of one operation: the user request, each planner turn,
/// and a one-line summary per executed call. Lives only as long as the loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History seeded with the user's request
    pub fn with_request(request: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.push(Role::User, request);
        history
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(HistoryEntry {
            role,
            content: content.into(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first user entry, if any
    pub fn request(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.role == Role::User)
            .map(|entry| entry.content.as_str())
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |entry| entry.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_append_only_log() {
        let mut history = ConversationHistory::with_request("book a room");
        history.push(Role::Planner, "check availability");
        history.push(Role::Tool, "A: success");
        history.push(Role::Tool, "B: failure (timeout)");

        assert_eq!(history.len(), 4);
        assert_eq!(history.request(), Some("book a room"));
        assert_eq!(history.by_role(Role::Tool).count(), 2);
        assert_eq!(history.last().unwrap().content, "B: failure (timeout)");
    }

    #[test]
    fn test_empty_history() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.request(), None);
    }
}
