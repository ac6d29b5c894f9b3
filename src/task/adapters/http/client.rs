//! `reqwest` adapter for a dummyjson-compatible todo API.

use super::models::{
    AddTodoBody, DeleteTodoResponse, TodoListResponse, TodoRecord, UpdateTodoBody,
};
use crate::task::{
    domain::TaskId,
    ports::{
        NewRemoteTask, RemoteStoreError, RemoteStoreResult, RemoteTask, RemoteTaskPatch,
        RemoteTaskStore,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default API base used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Connection settings for [`HttpTaskStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreSettings {
    /// API base URL, without the `/todos` suffix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Bearer token sent with every request, when set.
    pub access_token: Option<String>,
}

impl Default for HttpStoreSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(10),
            access_token: None,
        }
    }
}

/// Remote task store reached over HTTP.
///
/// Endpoints: `GET /todos`, `POST /todos/add`, `PUT /todos/{id}`, and
/// `DELETE /todos/{id}`. The adapter performs no retries; timeouts come from
/// the configured client.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpTaskStore {
    /// Builds a store client from settings.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(settings: HttpStoreSettings) -> RemoteStoreResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(RemoteStoreError::transport)?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            access_token: settings.access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON success body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteStoreResult<T> {
        let response = request.send().await.map_err(RemoteStoreError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(RemoteStoreError::transport)?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "remote task store rejected request");
            return Err(RemoteStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| RemoteStoreError::Decode(err.to_string()))
    }
}

/// Maps a 404 answer for a known task onto [`RemoteStoreError::NotFound`].
fn not_found_as(id: TaskId) -> impl FnOnce(RemoteStoreError) -> RemoteStoreError {
    move |err| match err {
        RemoteStoreError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            RemoteStoreError::NotFound(id)
        }
        other => other,
    }
}

#[async_trait]
impl RemoteTaskStore for HttpTaskStore {
    async fn list(&self) -> RemoteStoreResult<Vec<RemoteTask>> {
        let response: TodoListResponse = self.send_json(self.request(Method::GET, "todos")).await?;
        Ok(response
            .todos
            .into_iter()
            .map(TodoRecord::into_remote)
            .collect())
    }

    async fn create(&self, task: NewRemoteTask) -> RemoteStoreResult<RemoteTask> {
        let request = self
            .request(Method::POST, "todos/add")
            .json(&AddTodoBody::from(task));
        let record: TodoRecord = self.send_json(request).await?;
        Ok(record.into_remote())
    }

    async fn update(&self, id: TaskId, patch: RemoteTaskPatch) -> RemoteStoreResult<RemoteTask> {
        let request = self
            .request(Method::PUT, &format!("todos/{id}"))
            .json(&UpdateTodoBody::from(patch));
        let record: TodoRecord = self.send_json(request).await.map_err(not_found_as(id))?;
        Ok(record.into_remote())
    }

    async fn delete(&self, id: TaskId) -> RemoteStoreResult<bool> {
        let request = self.request(Method::DELETE, &format!("todos/{id}"));
        let response: DeleteTodoResponse =
            self.send_json(request).await.map_err(not_found_as(id))?;
        Ok(response.is_deleted)
    }
}
