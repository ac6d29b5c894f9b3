//! Task entity and partition types.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Read-time partition a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPartition {
    /// Task is not completed.
    Active,
    /// Task is completed.
    Completed,
}

impl TaskPartition {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// A single to-do item held in the local task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
}

impl Task {
    /// Creates a task from its remote-confirmed fields.
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }

    /// Returns the remote-issued identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the partition this task belongs to.
    #[must_use]
    pub const fn partition(&self) -> TaskPartition {
        if self.completed {
            TaskPartition::Completed
        } else {
            TaskPartition::Active
        }
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Sets the completion flag, returning `true` when the partition changed.
    pub(crate) const fn set_completed(&mut self, completed: bool) -> bool {
        let changed = self.completed != completed;
        self.completed = completed;
        changed
    }
}
