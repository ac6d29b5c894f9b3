//! Shared test helpers for in-memory controller integration tests.

use std::sync::Arc;

use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskId},
    ports::RemoteTask,
    services::{ControllerSettings, TaskListController},
};

/// Controller type used by the in-memory integration tests.
pub type TestController = TaskListController<InMemoryTaskStore>;

/// Store and controller sharing one in-memory backend.
pub struct Fixture {
    pub store: Arc<InMemoryTaskStore>,
    pub controller: TestController,
}

/// Provides a store seeded with two active tasks and one completed task.
#[fixture]
pub fn seeded() -> Fixture {
    let store = Arc::new(InMemoryTaskStore::with_tasks([
        RemoteTask::new(TaskId::new(1), "Buy milk", false),
        RemoteTask::new(TaskId::new(2), "Walk dog", true),
        RemoteTask::new(TaskId::new(3), "Write report", false),
    ]));
    let controller = TaskListController::new(Arc::clone(&store), ControllerSettings::default());
    Fixture { store, controller }
}

/// Returns the identifiers of the given tasks as plain integers.
pub fn ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<u64> {
    tasks.into_iter().map(|task| task.id().value()).collect()
}

/// Asserts the local collection matches the remote records field by field.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the collections differ.
pub fn assert_mirrors_store(fixture: &Fixture) -> Result<(), eyre::Report> {
    let records = fixture
        .store
        .records()
        .map_err(|err| eyre::eyre!("read store records: {err}"))?;
    let snapshot = fixture.controller.snapshot();
    let local: Vec<(u64, &str, bool)> = snapshot
        .tasks()
        .iter()
        .map(|task| (task.id().value(), task.text(), task.completed()))
        .collect();
    let remote: Vec<(u64, &str, bool)> = records
        .iter()
        .map(|record| (record.id.value(), record.todo.as_str(), record.completed))
        .collect();
    eyre::ensure!(
        local == remote,
        "local {local:?} diverged from remote {remote:?}"
    );
    Ok(())
}
