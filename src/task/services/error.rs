//! Errors surfaced by the task list controller.

use crate::task::{domain::TaskId, ports::RemoteStoreError};
use thiserror::Error;

/// Kind of a [`TaskListError`], for presentation-layer routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskListErrorKind {
    /// Initial or refresh fetch failed.
    LoadFailed,
    /// Remote create failed.
    CreateFailed,
    /// Remote update failed.
    UpdateFailed,
    /// Remote delete failed.
    DeleteFailed,
    /// Some deletes of a clear-completed fan-out failed.
    ClearCompletedPartialFailure,
}

impl TaskListErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadFailed => "load_failed",
            Self::CreateFailed => "create_failed",
            Self::UpdateFailed => "update_failed",
            Self::DeleteFailed => "delete_failed",
            Self::ClearCompletedPartialFailure => "clear_completed_partial_failure",
        }
    }
}

/// Non-fatal, user-visible controller errors.
///
/// Every remote store failure is converted into one of these at the
/// controller boundary. The controller stays usable after any of them.
#[derive(Debug, Clone, Error)]
pub enum TaskListError {
    /// The task list could not be fetched; local state is unchanged.
    #[error("failed to load tasks")]
    LoadFailed(#[source] RemoteStoreError),

    /// The task could not be created; local state is unchanged.
    #[error("failed to create task")]
    CreateFailed(#[source] RemoteStoreError),

    /// The task could not be updated; local state is unchanged.
    #[error("failed to update task {id}")]
    UpdateFailed {
        /// Target task.
        id: TaskId,
        /// Remote failure.
        #[source]
        source: RemoteStoreError,
    },

    /// The task could not be deleted; local state is unchanged.
    #[error("failed to delete task {id}")]
    DeleteFailed {
        /// Target task.
        id: TaskId,
        /// Remote failure.
        #[source]
        source: RemoteStoreError,
    },

    /// Some completed tasks could not be deleted. Successful deletions were
    /// committed.
    #[error("failed to delete {} completed task(s)", .failed_ids.len())]
    ClearCompletedPartialFailure {
        /// Tasks whose delete failed, in collection order.
        failed_ids: Vec<TaskId>,
        /// Tasks removed by the same operation.
        removed_ids: Vec<TaskId>,
    },
}

impl TaskListError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> TaskListErrorKind {
        match self {
            Self::LoadFailed(_) => TaskListErrorKind::LoadFailed,
            Self::CreateFailed(_) => TaskListErrorKind::CreateFailed,
            Self::UpdateFailed { .. } => TaskListErrorKind::UpdateFailed,
            Self::DeleteFailed { .. } => TaskListErrorKind::DeleteFailed,
            Self::ClearCompletedPartialFailure { .. } => {
                TaskListErrorKind::ClearCompletedPartialFailure
            }
        }
    }

    /// Returns the identifiers whose remote call failed.
    #[must_use]
    pub fn failed_ids(&self) -> Vec<TaskId> {
        match self {
            Self::LoadFailed(_) | Self::CreateFailed(_) => Vec::new(),
            Self::UpdateFailed { id, .. } | Self::DeleteFailed { id, .. } => vec![*id],
            Self::ClearCompletedPartialFailure { failed_ids, .. } => failed_ids.clone(),
        }
    }
}

/// Result type for controller commands.
pub type TaskListResult<T> = Result<T, TaskListError>;
