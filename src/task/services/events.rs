//! Change notifications published by the task list controller.

use super::TaskListError;
use crate::task::domain::TaskId;

/// Notification emitted after each commit or failure.
#[derive(Debug, Clone)]
pub enum TaskListEvent {
    /// The collection was replaced by a fetch.
    Loaded {
        /// Number of tasks held after the load.
        count: usize,
    },
    /// A task was appended, or replaced in place when the remote store
    /// reissued an identifier already held.
    Created(TaskId),
    /// A task's text changed.
    TextUpdated(TaskId),
    /// A task moved between the active and completed partitions.
    PartitionChanged {
        /// Moved task.
        id: TaskId,
        /// New completion flag.
        completed: bool,
    },
    /// Tasks were removed in one commit.
    Removed(Vec<TaskId>),
    /// The edit session opened, moved to another target, or closed.
    EditSessionChanged(Option<TaskId>),
    /// The completed section was shown or hidden.
    VisibilityChanged(bool),
    /// A command failed.
    Failed(TaskListError),
}
