//! Immutable read views of the task list.

use super::{EditSession, Task, TaskId, TaskPartition};

/// Immutable view of the task list handed to readers.
///
/// Partitions are computed at read time, so every task appears in exactly
/// one of [`TaskListSnapshot::active`] and [`TaskListSnapshot::completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListSnapshot {
    tasks: Vec<Task>,
    edit_session: Option<EditSession>,
    show_completed: bool,
    revision: u64,
}

impl TaskListSnapshot {
    pub(crate) const fn new(
        tasks: Vec<Task>,
        edit_session: Option<EditSession>,
        show_completed: bool,
        revision: u64,
    ) -> Self {
        Self {
            tasks,
            edit_session,
            show_completed,
            revision,
        }
    }

    /// Returns every task in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns `true` when the collection holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns tasks in the given partition, in collection order.
    #[must_use]
    pub fn partition(&self, partition: TaskPartition) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.partition() == partition)
            .collect()
    }

    /// Returns tasks that are not completed.
    #[must_use]
    pub fn active(&self) -> Vec<&Task> {
        self.partition(TaskPartition::Active)
    }

    /// Returns completed tasks.
    #[must_use]
    pub fn completed(&self) -> Vec<&Task> {
        self.partition(TaskPartition::Completed)
    }

    /// Returns completed tasks when the completed section is shown, or an
    /// empty list when it is hidden.
    #[must_use]
    pub fn visible_completed(&self) -> Vec<&Task> {
        if self.show_completed {
            self.completed()
        } else {
            Vec::new()
        }
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the open edit session, if any.
    #[must_use]
    pub const fn edit_session(&self) -> Option<&EditSession> {
        self.edit_session.as_ref()
    }

    /// Returns `true` when the given task is the current edit target.
    #[must_use]
    pub fn is_editing(&self, id: TaskId) -> bool {
        self.edit_session
            .as_ref()
            .is_some_and(|session| session.target() == id)
    }

    /// Returns whether the completed partition is shown.
    #[must_use]
    pub const fn show_completed(&self) -> bool {
        self.show_completed
    }

    /// Returns the revision of the list this snapshot was taken from.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for TaskListSnapshot {
    fn default() -> Self {
        Self::new(Vec::new(), None, true, 0)
    }
}
