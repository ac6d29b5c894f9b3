//! Wire models for the dummyjson-compatible todo API.

use crate::task::{
    domain::{TaskId, UserId},
    ports::{NewRemoteTask, RemoteTask, RemoteTaskPatch},
};
use serde::{Deserialize, Serialize};

/// Todo record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TodoRecord {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl TodoRecord {
    pub fn into_remote(self) -> RemoteTask {
        RemoteTask {
            id: TaskId::new(self.id),
            todo: self.todo,
            completed: self.completed,
            user_id: self.user_id.map(UserId::new),
        }
    }
}

/// Body of `GET /todos`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TodoListResponse {
    pub todos: Vec<TodoRecord>,
}

/// Body of `POST /todos/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddTodoBody {
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

impl From<NewRemoteTask> for AddTodoBody {
    fn from(task: NewRemoteTask) -> Self {
        Self {
            todo: task.todo,
            completed: task.completed,
            user_id: task.user_id.value(),
        }
    }
}

/// Body of `PUT /todos/{id}`; absent fields are left untouched remotely.
#[derive(Debug, Clone, Serialize)]
pub(super) struct UpdateTodoBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<RemoteTaskPatch> for UpdateTodoBody {
    fn from(patch: RemoteTaskPatch) -> Self {
        Self {
            todo: patch.todo,
            completed: patch.completed,
        }
    }
}

/// Body of `DELETE /todos/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteTodoResponse {
    #[serde(default)]
    pub is_deleted: bool,
}
