//! Task list aggregate.
//!
//! The aggregate holds the canonical ordered collection together with the
//! edit session and the completed-section visibility flag. Every mutation
//! bumps a monotonically increasing revision; per-task revisions record the
//! last commit that touched each task so that the controller can tag
//! commits that raced with another command as stale.

use super::{EditSession, Task, TaskId, TaskListSnapshot};
use std::collections::{HashMap, HashSet};

/// Result of replacing the collection wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Number of tasks held after the replacement.
    pub count: usize,
    /// Number of incoming records dropped because their identifier repeated.
    pub duplicates_dropped: usize,
    /// Whether the edit session closed because its target disappeared.
    pub session_closed: bool,
}

/// Result of removing tasks from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemovalSummary {
    /// Identifiers actually removed, in collection order.
    pub removed: Vec<TaskId>,
    /// Whether the edit session closed because its target was removed.
    pub session_closed: bool,
}

/// Canonical in-memory task collection with edit and visibility state.
#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    touched: HashMap<TaskId, u64>,
    collection_revision: u64,
    edit_session: Option<EditSession>,
    session_sequence: u64,
    show_completed: bool,
    revision: u64,
}

impl TaskList {
    /// Creates an empty list with the completed section shown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            touched: HashMap::new(),
            collection_revision: 0,
            edit_session: None,
            session_sequence: 0,
            show_completed: true,
            revision: 0,
        }
    }

    /// Returns the current revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns every task in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns `true` when a task with the identifier is held.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.find(id).is_some()
    }

    /// Returns identifiers of the completed partition in collection order.
    #[must_use]
    pub fn completed_ids(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|task| task.completed())
            .map(Task::id)
            .collect()
    }

    /// Returns the open edit session, if any.
    #[must_use]
    pub const fn edit_session(&self) -> Option<&EditSession> {
        self.edit_session.as_ref()
    }

    /// Returns whether the completed partition is shown.
    #[must_use]
    pub const fn show_completed(&self) -> bool {
        self.show_completed
    }

    /// Returns `true` when any task was added, changed, or removed after
    /// the given revision.
    #[must_use]
    pub const fn collection_changed_since(&self, base: u64) -> bool {
        self.collection_revision > base
    }

    /// Returns `true` when the task was touched after the given revision or
    /// is no longer held.
    #[must_use]
    pub fn task_changed_since(&self, id: TaskId, base: u64) -> bool {
        !self.contains(id)
            || self
                .touched
                .get(&id)
                .is_some_and(|revision| *revision > base)
    }

    /// Replaces the collection wholesale.
    ///
    /// Records repeating an identifier already seen are dropped so the
    /// collection never holds two tasks with the same identifier. An edit
    /// session whose target is absent from the new collection is closed.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) -> ReplaceSummary {
        let revision = self.bump();
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut duplicates_dropped = 0;
        for task in tasks {
            if seen.insert(task.id()) {
                kept.push(task);
            } else {
                duplicates_dropped += 1;
            }
        }

        self.touched = kept.iter().map(|task| (task.id(), revision)).collect();
        self.collection_revision = revision;
        self.tasks = kept;

        let session_closed = self
            .edit_session
            .as_ref()
            .is_some_and(|session| !seen.contains(&session.target()));
        if session_closed {
            self.edit_session = None;
        }

        ReplaceSummary {
            count: self.tasks.len(),
            duplicates_dropped,
            session_closed,
        }
    }

    /// Appends a task, or replaces the held task with the same identifier in
    /// place. Returns `true` when an existing task was replaced.
    pub fn upsert(&mut self, task: Task) -> bool {
        let id = task.id();
        let replaced = match self.tasks.iter_mut().find(|held| held.id() == id) {
            Some(held) => {
                *held = task;
                true
            }
            None => {
                self.tasks.push(task);
                false
            }
        };
        self.touch(id);
        replaced
    }

    /// Sets the completion flag of a held task.
    ///
    /// Returns `None` when the task is not held, otherwise whether the task
    /// moved between partitions.
    pub fn apply_completed(&mut self, id: TaskId, completed: bool) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        let moved = task.set_completed(completed);
        self.touch(id);
        Some(moved)
    }

    /// Replaces the text of a held task. Returns `false` when the task is
    /// not held.
    pub fn apply_text(&mut self, id: TaskId, text: String) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            return false;
        };
        task.set_text(text);
        self.touch(id);
        true
    }

    /// Removes a single task.
    pub fn remove(&mut self, id: TaskId) -> RemovalSummary {
        self.remove_many(&[id])
    }

    /// Removes every held task whose identifier is listed, as one change.
    ///
    /// Closes the edit session when its target is among the removed tasks.
    pub fn remove_many(&mut self, ids: &[TaskId]) -> RemovalSummary {
        let doomed: HashSet<TaskId> = ids.iter().copied().collect();
        let removed: Vec<TaskId> = self
            .tasks
            .iter()
            .map(Task::id)
            .filter(|id| doomed.contains(id))
            .collect();
        if removed.is_empty() {
            return RemovalSummary::default();
        }

        self.tasks.retain(|task| !doomed.contains(&task.id()));
        let revision = self.bump();
        for id in &removed {
            self.touched.remove(id);
        }
        self.collection_revision = revision;

        let session_closed = self
            .edit_session
            .as_ref()
            .is_some_and(|session| doomed.contains(&session.target()));
        if session_closed {
            self.edit_session = None;
        }

        RemovalSummary {
            removed,
            session_closed,
        }
    }

    /// Opens an edit session for the task, replacing any open session.
    pub fn start_edit(&mut self, target: TaskId, draft: String) -> &EditSession {
        self.session_sequence += 1;
        self.bump();
        self.edit_session
            .insert(EditSession::open(self.session_sequence, target, draft))
    }

    /// Replaces the draft of the open session. Returns `false` when no
    /// session is open.
    pub fn update_draft(&mut self, draft: String) -> bool {
        let Some(session) = self.edit_session.as_mut() else {
            return false;
        };
        session.set_draft(draft);
        self.bump();
        true
    }

    /// Discards the open session, returning it.
    pub fn cancel_edit(&mut self) -> Option<EditSession> {
        let closed = self.edit_session.take();
        if closed.is_some() {
            self.bump();
        }
        closed
    }

    /// Closes the open session only when it is the one with the given
    /// sequence number. Returns `true` when a session was closed.
    pub fn close_edit_session(&mut self, sequence: u64) -> bool {
        if self
            .edit_session
            .as_ref()
            .is_some_and(|session| session.sequence() == sequence)
        {
            self.edit_session = None;
            self.bump();
            return true;
        }
        false
    }

    /// Flips the completed-section visibility, returning the new value.
    pub fn toggle_completed_visibility(&mut self) -> bool {
        self.show_completed = !self.show_completed;
        self.bump();
        self.show_completed
    }

    /// Captures an immutable snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        TaskListSnapshot::new(
            self.tasks.clone(),
            self.edit_session.clone(),
            self.show_completed,
            self.revision,
        )
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn touch(&mut self, id: TaskId) {
        let revision = self.bump();
        self.touched.insert(id, revision);
        self.collection_revision = revision;
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
