//! In-memory remote task store for tests and local demos.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::task::{
    domain::TaskId,
    ports::{
        NewRemoteTask, RemoteStoreError, RemoteStoreResult, RemoteTask, RemoteTaskPatch,
        RemoteTaskStore,
    },
};

/// Remote store operation, used for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `list`.
    List,
    /// `create`.
    Create,
    /// `update`.
    Update,
    /// `delete`.
    Delete,
}

impl StoreOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Thread-safe in-memory stand-in for the remote task store.
///
/// Identifiers are assigned sequentially after the highest seeded one.
/// Failures, unconfirmed deletes, server-side completion overrides, and
/// per-operation latency can be injected to exercise controller recovery.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    records: Vec<RemoteTask>,
    next_id: u64,
    failing_operations: HashSet<StoreOperation>,
    failing_deletes: HashSet<TaskId>,
    unconfirmed_deletes: HashSet<TaskId>,
    pinned_completion: HashMap<TaskId, bool>,
    delays: HashMap<StoreOperation, Duration>,
    delete_delays: HashMap<TaskId, Duration>,
    calls: HashMap<StoreOperation, usize>,
    in_flight: HashMap<StoreOperation, usize>,
    peak_in_flight: HashMap<StoreOperation, usize>,
}

fn lock_error(err: impl ToString) -> RemoteStoreError {
    RemoteStoreError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given records.
    #[must_use]
    pub fn with_tasks(records: impl IntoIterator<Item = RemoteTask>) -> Self {
        let records: Vec<RemoteTask> = records.into_iter().collect();
        let next_id = records
            .iter()
            .map(|record| record.id.value())
            .max()
            .unwrap_or_default();
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState {
                records,
                next_id,
                ..InMemoryStoreState::default()
            })),
        }
    }

    /// Adds a record as if another client had created it.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn seed(&self, record: RemoteTask) -> RemoteStoreResult<()> {
        let mut state = self.write_state()?;
        state.next_id = state.next_id.max(record.id.value());
        state.records.push(record);
        Ok(())
    }

    fn write_state(
        &self,
    ) -> RemoteStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state.write().map_err(lock_error)
    }

    fn read_state(&self) -> RemoteStoreResult<std::sync::RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state.read().map_err(lock_error)
    }

    /// Makes every subsequent call of the operation fail.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_operation(&self, operation: StoreOperation) -> RemoteStoreResult<()> {
        self.write_state()?.failing_operations.insert(operation);
        Ok(())
    }

    /// Lets the operation succeed again.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn restore_operation(&self, operation: StoreOperation) -> RemoteStoreResult<()> {
        self.write_state()?.failing_operations.remove(&operation);
        Ok(())
    }

    /// Makes deletes of the given task fail.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_delete_of(&self, id: TaskId) -> RemoteStoreResult<()> {
        self.write_state()?.failing_deletes.insert(id);
        Ok(())
    }

    /// Makes deletes of the given task answer `deleted = false` without
    /// removing the record.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn leave_delete_unconfirmed(&self, id: TaskId) -> RemoteStoreResult<()> {
        self.write_state()?.unconfirmed_deletes.insert(id);
        Ok(())
    }

    /// Forces the stored completion flag of a task regardless of what
    /// updates request, simulating server-side validation.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn pin_completion(&self, id: TaskId, completed: bool) -> RemoteStoreResult<()> {
        self.write_state()?.pinned_completion.insert(id, completed);
        Ok(())
    }

    /// Delays every call of the operation by the given duration.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn delay_operation(
        &self,
        operation: StoreOperation,
        delay: Duration,
    ) -> RemoteStoreResult<()> {
        self.write_state()?.delays.insert(operation, delay);
        Ok(())
    }

    /// Delays deletes of the given task, on top of any operation delay.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn delay_delete_of(&self, id: TaskId, delay: Duration) -> RemoteStoreResult<()> {
        self.write_state()?.delete_delays.insert(id, delay);
        Ok(())
    }

    /// Returns how many times the operation was called.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn call_count(&self, operation: StoreOperation) -> RemoteStoreResult<usize> {
        Ok(self
            .read_state()?
            .calls
            .get(&operation)
            .copied()
            .unwrap_or_default())
    }

    /// Returns the largest number of calls of the operation that were
    /// outstanding at the same time.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn peak_in_flight(&self, operation: StoreOperation) -> RemoteStoreResult<usize> {
        Ok(self
            .read_state()?
            .peak_in_flight
            .get(&operation)
            .copied()
            .unwrap_or_default())
    }

    /// Returns the stored records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn records(&self) -> RemoteStoreResult<Vec<RemoteTask>> {
        Ok(self.read_state()?.records.clone())
    }

    /// Counts the call and returns the latency to apply before answering,
    /// with a guard that keeps the call in flight until dropped.
    fn begin(
        &self,
        operation: StoreOperation,
    ) -> RemoteStoreResult<(InFlight, Option<Duration>)> {
        let mut state = self.write_state()?;
        *state.calls.entry(operation).or_default() += 1;
        let current = {
            let in_flight = state.in_flight.entry(operation).or_default();
            *in_flight += 1;
            *in_flight
        };
        let peak = state.peak_in_flight.entry(operation).or_default();
        *peak = (*peak).max(current);
        let delay = state.delays.get(&operation).copied();
        let guard = InFlight {
            state: Arc::clone(&self.state),
            operation,
        };
        Ok((guard, delay))
    }

    fn ensure_available(
        state: &InMemoryStoreState,
        operation: StoreOperation,
    ) -> RemoteStoreResult<()> {
        if state.failing_operations.contains(&operation) {
            return Err(RemoteStoreError::Unavailable(format!(
                "{} rejected by test store",
                operation.as_str()
            )));
        }
        Ok(())
    }
}

/// Marks one call as outstanding until dropped.
struct InFlight {
    state: Arc<RwLock<InMemoryStoreState>>,
    operation: StoreOperation,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.write() {
            if let Some(count) = state.in_flight.get_mut(&self.operation) {
                *count = count.saturating_sub(1);
            }
        }
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(duration) = delay {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl RemoteTaskStore for InMemoryTaskStore {
    async fn list(&self) -> RemoteStoreResult<Vec<RemoteTask>> {
        let (_call, delay) = self.begin(StoreOperation::List)?;
        pause(delay).await;
        let state = self.read_state()?;
        Self::ensure_available(&state, StoreOperation::List)?;
        Ok(state.records.clone())
    }

    async fn create(&self, task: NewRemoteTask) -> RemoteStoreResult<RemoteTask> {
        let (_call, delay) = self.begin(StoreOperation::Create)?;
        pause(delay).await;
        let mut state = self.write_state()?;
        Self::ensure_available(&state, StoreOperation::Create)?;
        state.next_id += 1;
        let record = RemoteTask {
            id: TaskId::new(state.next_id),
            todo: task.todo,
            completed: task.completed,
            user_id: Some(task.user_id),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: TaskId, patch: RemoteTaskPatch) -> RemoteStoreResult<RemoteTask> {
        let (_call, delay) = self.begin(StoreOperation::Update)?;
        pause(delay).await;
        let mut state = self.write_state()?;
        Self::ensure_available(&state, StoreOperation::Update)?;
        let pinned = state.pinned_completion.get(&id).copied();
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(RemoteStoreError::NotFound(id))?;
        if let Some(todo) = patch.todo {
            record.todo = todo;
        }
        if let Some(completed) = pinned.or(patch.completed) {
            record.completed = completed;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: TaskId) -> RemoteStoreResult<bool> {
        let (_call, delay) = self.begin(StoreOperation::Delete)?;
        let extra = self.read_state()?.delete_delays.get(&id).copied();
        pause(delay).await;
        pause(extra).await;
        let mut state = self.write_state()?;
        Self::ensure_available(&state, StoreOperation::Delete)?;
        if state.failing_deletes.contains(&id) {
            return Err(RemoteStoreError::Unavailable(format!(
                "delete of task {id} rejected by test store"
            )));
        }
        if !state.records.iter().any(|record| record.id == id) {
            return Err(RemoteStoreError::NotFound(id));
        }
        if state.unconfirmed_deletes.contains(&id) {
            return Ok(false);
        }
        state.records.retain(|record| record.id != id);
        Ok(true)
    }
}
