//! Remote task store port.
//!
//! The remote store is the source of truth for tasks. The controller
//! confirms every mutation through this port before applying it locally.

use crate::task::domain::{Task, TaskId, TaskText, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote task store operations.
pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Task record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTask {
    /// Remote-issued identifier.
    pub id: TaskId,
    /// Task text.
    pub todo: String,
    /// Completion flag.
    pub completed: bool,
    /// Owning user, when the store reports it.
    pub user_id: Option<UserId>,
}

impl RemoteTask {
    /// Creates a remote record without owner information.
    #[must_use]
    pub fn new(id: TaskId, todo: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            todo: todo.into(),
            completed,
            user_id: None,
        }
    }
}

impl From<RemoteTask> for Task {
    fn from(remote: RemoteTask) -> Self {
        Self::new(remote.id, remote.todo, remote.completed)
    }
}

/// Payload for creating a remote task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRemoteTask {
    /// Task text.
    pub todo: String,
    /// Initial completion flag.
    pub completed: bool,
    /// Owning user.
    pub user_id: UserId,
}

impl NewRemoteTask {
    /// Creates an uncompleted task payload for the given user.
    #[must_use]
    pub fn new(text: TaskText, user_id: UserId) -> Self {
        Self {
            todo: text.into_inner(),
            completed: false,
            user_id,
        }
    }
}

/// Partial update of a remote task.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteTaskPatch {
    /// Replacement text, if changing.
    pub todo: Option<String>,
    /// Replacement completion flag, if changing.
    pub completed: Option<bool>,
}

impl RemoteTaskPatch {
    /// Creates a patch replacing only the text, sent as given.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            todo: Some(text.into()),
            completed: None,
        }
    }

    /// Creates a patch replacing only the completion flag.
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            todo: None,
            completed: Some(completed),
        }
    }
}

/// Gateway to the remote task store.
///
/// Implementations hold no list state of their own; each call either
/// resolves to the remote store's answer or to a [`RemoteStoreError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteTaskStore: Send + Sync {
    /// Lists every task.
    async fn list(&self) -> RemoteStoreResult<Vec<RemoteTask>>;

    /// Creates a task and returns the stored record, including its
    /// remote-issued identifier.
    async fn create(&self, task: NewRemoteTask) -> RemoteStoreResult<RemoteTask>;

    /// Applies a partial update and returns the full updated record.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: RemoteTaskPatch) -> RemoteStoreResult<RemoteTask>;

    /// Deletes a task, returning the store's "deleted" flag.
    ///
    /// The controller treats `Ok(false)` as a failed delete and keeps the
    /// task in the local list.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> RemoteStoreResult<bool>;
}

/// Errors returned by remote task store adapters.
#[derive(Debug, Clone, Error)]
pub enum RemoteStoreError {
    /// The request never produced a response.
    #[error("remote task store transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The store answered with a non-success status.
    #[error("remote task store answered with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("remote task store response could not be decoded: {0}")]
    Decode(String),

    /// The task does not exist in the store.
    #[error("remote task {0} not found")]
    NotFound(TaskId),

    /// The store answered a delete without confirming it.
    #[error("remote task store did not confirm deletion of task {0}")]
    DeleteNotConfirmed(TaskId),

    /// The store refused the call.
    #[error("remote task store unavailable: {0}")]
    Unavailable(String),
}

impl RemoteStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
