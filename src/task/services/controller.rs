//! Task list controller.
//!
//! The controller owns the canonical [`TaskList`] and mediates every
//! mutation through a [`RemoteTaskStore`]. Commands may be in flight
//! concurrently; each one reads its base under the lock, releases it for the
//! remote call, and applies its effect as one atomic commit once the call
//! resolves. Commits therefore land in completion order and the last writer
//! wins per field; [`CommandOutcome::Stale`] marks commits that raced.

use super::{CommandOutcome, TaskListError, TaskListEvent, TaskListResult};
use crate::task::{
    domain::{
        EditSession, RemovalSummary, Task, TaskId, TaskList, TaskListSnapshot, TaskText, UserId,
    },
    ports::{NewRemoteTask, RemoteStoreError, RemoteTaskPatch, RemoteTaskStore},
};
use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Upper bound on buffered events per subscriber.
pub const MAX_EVENT_CAPACITY: usize = 65_536;

/// Construction settings for [`TaskListController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Remote user that owns created tasks.
    pub user_id: UserId,
    /// Buffered events per subscriber before slow subscribers lag, clamped
    /// to `1..=MAX_EVENT_CAPACITY`.
    pub event_capacity: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            user_id: UserId::default(),
            event_capacity: 64,
        }
    }
}

/// Command surface over the local task list and the remote store.
///
/// The controller is constructed with an injected store and torn down by
/// dropping it; snapshot and event subscribers then observe their channels
/// closing.
pub struct TaskListController<S>
where
    S: RemoteTaskStore,
{
    store: Arc<S>,
    settings: ControllerSettings,
    list: Mutex<TaskList>,
    snapshots: watch::Sender<TaskListSnapshot>,
    events: broadcast::Sender<TaskListEvent>,
}

impl<S> TaskListController<S>
where
    S: RemoteTaskStore,
{
    /// Creates a controller holding an empty list.
    #[must_use]
    pub fn new(store: Arc<S>, settings: ControllerSettings) -> Self {
        let list = TaskList::new();
        let (snapshots, _) = watch::channel(list.snapshot());
        let (events, _) =
            broadcast::channel(settings.event_capacity.clamp(1, MAX_EVENT_CAPACITY));
        Self {
            store,
            settings,
            list: Mutex::new(list),
            snapshots,
            events,
        }
    }

    /// Returns the construction settings.
    #[must_use]
    pub const fn settings(&self) -> ControllerSettings {
        self.settings
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        self.list.lock().snapshot()
    }

    /// Subscribes to state snapshots; the receiver always holds the latest.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TaskListSnapshot> {
        self.snapshots.subscribe()
    }

    /// Subscribes to change and error notifications.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<TaskListEvent> {
        self.events.subscribe()
    }

    /// Fetches the full collection and replaces local state with it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::LoadFailed`] when the fetch fails; local
    /// state is left as it was.
    pub async fn load(&self) -> TaskListResult<CommandOutcome> {
        let base = self.revision();
        let remote = self
            .store
            .list()
            .await
            .map_err(|source| self.fail(TaskListError::LoadFailed(source)))?;

        let outcome = self.commit(|list, events| {
            let stale = list.collection_changed_since(base);
            let summary = list.replace_all(remote.into_iter().map(Task::from));
            if summary.duplicates_dropped > 0 {
                tracing::warn!(
                    dropped = summary.duplicates_dropped,
                    "remote task list repeated identifiers"
                );
            }
            events.push(TaskListEvent::Loaded {
                count: summary.count,
            });
            if summary.session_closed {
                events.push(TaskListEvent::EditSessionChanged(None));
            }
            CommandOutcome::committed(stale)
        });
        tracing::debug!(outcome = outcome.as_str(), "task list loaded");
        Ok(outcome)
    }

    /// Creates a task and appends the remote-confirmed record.
    ///
    /// Text that is empty after trimming is skipped without calling the
    /// remote store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::CreateFailed`] when the remote create fails.
    pub async fn create(&self, text: impl AsRef<str>) -> TaskListResult<CommandOutcome> {
        let Ok(text) = TaskText::new(text) else {
            tracing::debug!("create skipped: empty text");
            return Ok(CommandOutcome::Skipped);
        };

        let remote = self
            .store
            .create(NewRemoteTask::new(text, self.settings.user_id))
            .await
            .map_err(|source| self.fail(TaskListError::CreateFailed(source)))?;

        let task = Task::from(remote);
        let id = task.id();
        let outcome = self.commit(|list, events| {
            let replaced = list.upsert(task);
            if replaced {
                tracing::warn!(task_id = %id, "remote store reissued a held identifier");
            }
            events.push(TaskListEvent::Created(id));
            CommandOutcome::committed(replaced)
        });
        tracing::debug!(task_id = %id, outcome = outcome.as_str(), "task created");
        Ok(outcome)
    }

    /// Flips the completion flag of a held task.
    ///
    /// The flag committed locally is the one returned by the remote store,
    /// even when it differs from the requested toggle. Unknown identifiers
    /// are skipped without calling the remote store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::UpdateFailed`] when the remote update fails.
    pub async fn toggle_complete(&self, id: TaskId) -> TaskListResult<CommandOutcome> {
        let (base, requested) = {
            let list = self.list.lock();
            let Some(task) = list.find(id) else {
                tracing::debug!(task_id = %id, "toggle skipped: unknown task");
                return Ok(CommandOutcome::Skipped);
            };
            (list.revision(), !task.completed())
        };

        let remote = self
            .store
            .update(id, RemoteTaskPatch::completed(requested))
            .await
            .map_err(|source| self.fail(TaskListError::UpdateFailed { id, source }))?;
        if remote.completed != requested {
            tracing::debug!(
                task_id = %id,
                requested,
                confirmed = remote.completed,
                "remote store overrode requested completion"
            );
        }

        let outcome = self.commit(|list, events| {
            let stale = list.task_changed_since(id, base);
            match list.apply_completed(id, remote.completed) {
                Some(moved) => {
                    if moved {
                        events.push(TaskListEvent::PartitionChanged {
                            id,
                            completed: remote.completed,
                        });
                    }
                    CommandOutcome::committed(stale)
                }
                None => CommandOutcome::Stale,
            }
        });
        tracing::debug!(task_id = %id, outcome = outcome.as_str(), "task completion toggled");
        Ok(outcome)
    }

    /// Opens an edit session on the task, replacing any open session.
    #[must_use]
    pub fn start_edit(&self, id: TaskId, current_text: impl Into<String>) -> CommandOutcome {
        self.commit(|list, events| {
            let previous = list.edit_session().map(EditSession::target);
            list.start_edit(id, current_text.into());
            if let Some(previous) = previous.filter(|previous| *previous != id) {
                tracing::debug!(task_id = %id, previous = %previous, "edit session moved");
            }
            events.push(TaskListEvent::EditSessionChanged(Some(id)));
            CommandOutcome::Applied
        })
    }

    /// Replaces the draft of the open edit session.
    ///
    /// Skipped when no session is open.
    #[must_use]
    pub fn update_draft(&self, text: impl Into<String>) -> CommandOutcome {
        let mut list = self.list.lock();
        if !list.update_draft(text.into()) {
            return CommandOutcome::Skipped;
        }
        self.snapshots.send_replace(list.snapshot());
        CommandOutcome::Applied
    }

    /// Saves the open edit session through the remote store.
    ///
    /// On success the task takes the server-returned text and the session
    /// closes, unless a newer session was opened meanwhile. The draft is
    /// sent untrimmed. Skipped without a remote call when no session is
    /// open or the draft is blank.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::UpdateFailed`] when the remote update fails;
    /// the session stays open for a retry or cancel.
    pub async fn save_edit(&self) -> TaskListResult<CommandOutcome> {
        let (sequence, target, draft, base) = {
            let list = self.list.lock();
            let Some(session) = list.edit_session() else {
                return Ok(CommandOutcome::Skipped);
            };
            if session.is_blank() {
                tracing::debug!(task_id = %session.target(), "save skipped: blank draft");
                return Ok(CommandOutcome::Skipped);
            }
            (
                session.sequence(),
                session.target(),
                session.draft().to_owned(),
                list.revision(),
            )
        };

        let remote = self
            .store
            .update(target, RemoteTaskPatch::text(draft))
            .await
            .map_err(|source| self.fail(TaskListError::UpdateFailed { id: target, source }))?;

        let outcome = self.commit(|list, events| {
            let stale = list.task_changed_since(target, base);
            let applied = list.apply_text(target, remote.todo);
            if applied {
                events.push(TaskListEvent::TextUpdated(target));
            }
            if list.close_edit_session(sequence) {
                events.push(TaskListEvent::EditSessionChanged(None));
            }
            CommandOutcome::committed(stale || !applied)
        });
        tracing::debug!(task_id = %target, outcome = outcome.as_str(), "task text saved");
        Ok(outcome)
    }

    /// Discards the open edit session. Skipped when none is open.
    #[must_use]
    pub fn cancel_edit(&self) -> CommandOutcome {
        self.commit(|list, events| {
            if list.cancel_edit().is_none() {
                return CommandOutcome::Skipped;
            }
            events.push(TaskListEvent::EditSessionChanged(None));
            CommandOutcome::Applied
        })
    }

    /// Deletes a task through the remote store and removes it locally.
    ///
    /// Closes the edit session when the task was its target.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::DeleteFailed`] when the remote delete fails
    /// or is not confirmed.
    pub async fn delete(&self, id: TaskId) -> TaskListResult<CommandOutcome> {
        let base = self.revision();
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|source| self.fail(TaskListError::DeleteFailed { id, source }))?;
        if !deleted {
            return Err(self.fail(TaskListError::DeleteFailed {
                id,
                source: RemoteStoreError::DeleteNotConfirmed(id),
            }));
        }

        let outcome = self.commit(|list, events| {
            let stale = list.task_changed_since(id, base);
            let RemovalSummary {
                removed,
                session_closed,
            } = list.remove(id);
            if !removed.is_empty() {
                events.push(TaskListEvent::Removed(removed));
            }
            if session_closed {
                events.push(TaskListEvent::EditSessionChanged(None));
            }
            CommandOutcome::committed(stale)
        });
        tracing::debug!(task_id = %id, outcome = outcome.as_str(), "task deleted");
        Ok(outcome)
    }

    /// Deletes every completed task.
    ///
    /// Deletes are issued concurrently and joined; the union of confirmed
    /// deletions is then removed in one commit. Failed deletes are not
    /// rolled back against successful ones. Skipped when nothing is
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::ClearCompletedPartialFailure`] naming every
    /// task whose delete failed or was not confirmed, after committing the
    /// successful deletions.
    pub async fn clear_completed(&self) -> TaskListResult<CommandOutcome> {
        let (targets, base) = {
            let list = self.list.lock();
            (list.completed_ids(), list.revision())
        };
        if targets.is_empty() {
            return Ok(CommandOutcome::Skipped);
        }

        let store = &self.store;
        let results = join_all(
            targets
                .iter()
                .map(|&id| async move { (id, store.delete(id).await) }),
        )
        .await;

        let mut confirmed = Vec::with_capacity(results.len());
        let mut failed_ids = Vec::new();
        for (id, result) in results {
            match result {
                Ok(true) => confirmed.push(id),
                Ok(false) => {
                    tracing::warn!(task_id = %id, "remote store did not confirm deletion");
                    failed_ids.push(id);
                }
                Err(err) => {
                    tracing::warn!(task_id = %id, error = %err, "completed task delete failed");
                    failed_ids.push(id);
                }
            }
        }

        let (outcome, removed_ids) = if confirmed.is_empty() {
            (CommandOutcome::Applied, Vec::new())
        } else {
            self.commit(|list, events| {
                let stale = confirmed
                    .iter()
                    .any(|id| list.task_changed_since(*id, base));
                let RemovalSummary {
                    removed,
                    session_closed,
                } = list.remove_many(&confirmed);
                if !removed.is_empty() {
                    events.push(TaskListEvent::Removed(removed.clone()));
                }
                if session_closed {
                    events.push(TaskListEvent::EditSessionChanged(None));
                }
                (CommandOutcome::committed(stale), removed)
            })
        };
        tracing::debug!(
            removed = removed_ids.len(),
            failed = failed_ids.len(),
            outcome = outcome.as_str(),
            "completed tasks cleared"
        );

        if failed_ids.is_empty() {
            Ok(outcome)
        } else {
            Err(self.fail(TaskListError::ClearCompletedPartialFailure {
                failed_ids,
                removed_ids,
            }))
        }
    }

    /// Shows or hides the completed section, returning the new visibility.
    #[must_use]
    pub fn toggle_completed_visibility(&self) -> bool {
        self.commit(|list, events| {
            let visible = list.toggle_completed_visibility();
            events.push(TaskListEvent::VisibilityChanged(visible));
            visible
        })
    }

    fn revision(&self) -> u64 {
        self.list.lock().revision()
    }

    /// Applies a mutation as one atomic step, then publishes the new
    /// snapshot and the collected events while still holding the lock so
    /// notification order matches commit order.
    fn commit<T>(&self, apply: impl FnOnce(&mut TaskList, &mut Vec<TaskListEvent>) -> T) -> T {
        let mut list = self.list.lock();
        let mut events = Vec::new();
        let value = apply(&mut list, &mut events);
        self.snapshots.send_replace(list.snapshot());
        for event in events {
            self.publish(event);
        }
        value
    }

    fn publish(&self, event: TaskListEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("no task list event subscribers");
        }
    }

    fn fail(&self, error: TaskListError) -> TaskListError {
        tracing::warn!(kind = error.kind().as_str(), error = ?error, "task list command failed");
        self.publish(TaskListEvent::Failed(error.clone()));
        error
    }
}
