//! Command sequences driven through the controller against the in-memory
//! store.

use std::sync::Arc;

use super::helpers::{Fixture, assert_mirrors_store, ids, seeded};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::StoreOperation,
    domain::TaskId,
    ports::RemoteTask,
    services::{
        CommandOutcome, ControllerSettings, TaskListController, TaskListErrorKind, TaskListEvent,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_session_keeps_local_state_in_step_with_the_store(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    controller.create("Pay rent").await.expect("create");
    controller
        .toggle_complete(TaskId::new(3))
        .await
        .expect("toggle");
    assert_eq!(
        controller.start_edit(TaskId::new(1), "Buy milk"),
        CommandOutcome::Applied
    );
    assert_eq!(
        controller.update_draft("Buy oat milk"),
        CommandOutcome::Applied
    );
    controller.save_edit().await.expect("save");
    controller
        .delete(TaskId::new(4))
        .await
        .expect("delete created task");
    controller.clear_completed().await.expect("clear completed");

    let snapshot = controller.snapshot();
    assert_eq!(ids(snapshot.active()), vec![1]);
    assert!(snapshot.completed().is_empty());
    assert_mirrors_store(&seeded).expect("local state mirrors the store");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_commands_leave_local_state_mirroring_the_store(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    for operation in [StoreOperation::Create, StoreOperation::Update, StoreOperation::Delete] {
        seeded
            .store
            .fail_operation(operation)
            .expect("failure injection");
    }
    let mut events = controller.events();

    let create = controller.create("Pay rent").await;
    let toggle = controller.toggle_complete(TaskId::new(1)).await;
    let delete = controller.delete(TaskId::new(2)).await;
    let clear = controller.clear_completed().await;

    let kinds: Vec<TaskListErrorKind> = [create, toggle, delete, clear]
        .into_iter()
        .filter_map(Result::err)
        .map(|err| err.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TaskListErrorKind::CreateFailed,
            TaskListErrorKind::UpdateFailed,
            TaskListErrorKind::DeleteFailed,
            TaskListErrorKind::ClearCompletedPartialFailure,
        ]
    );
    let mut failures = 0;
    while let Ok(event) = events.try_recv() {
        assert!(matches!(event, TaskListEvent::Failed(_)));
        failures += 1;
    }
    assert_eq!(failures, 4);
    assert_mirrors_store(&seeded).expect("local state mirrors the store");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_picks_up_changes_made_by_other_clients(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("first load");
    seeded
        .store
        .seed(RemoteTask::new(TaskId::new(10), "Added elsewhere", false))
        .expect("seed");

    let outcome = controller.load().await.expect("reload");

    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(ids(controller.snapshot().active()), vec![1, 3, 10]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_closes_session_on_a_task_deleted_elsewhere(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("first load");
    assert_eq!(
        controller.start_edit(TaskId::new(3), "Write report"),
        CommandOutcome::Applied
    );
    seeded
        .store
        .fail_operation(StoreOperation::List)
        .expect("failure injection");
    assert!(controller.load().await.is_err());
    assert!(controller.snapshot().is_editing(TaskId::new(3)));
    seeded
        .store
        .restore_operation(StoreOperation::List)
        .expect("restore");

    let other = TaskListController::new(Arc::clone(&seeded.store), ControllerSettings::default());
    other.delete(TaskId::new(3)).await.expect("delete elsewhere");
    controller.load().await.expect("reload");

    assert!(controller.snapshot().edit_session().is_none());
    assert_eq!(ids(controller.snapshot().tasks()), vec![1, 2]);
}
