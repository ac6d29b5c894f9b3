//! Overlapping commands against a slow in-memory store.

use std::collections::HashSet;
use std::time::Duration;

use super::helpers::{Fixture, assert_mirrors_store, ids, seeded};
use futures::future::join_all;
use rstest::rstest;
use taskboard::task::{
    adapters::memory::StoreOperation,
    domain::TaskId,
    services::CommandOutcome,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_keep_identifiers_unique(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    seeded
        .store
        .delay_operation(StoreOperation::Create, Duration::from_millis(10))
        .expect("delay");

    let outcomes = join_all((0..8).map(|n| controller.create(format!("Task {n}")))).await;

    assert!(outcomes.iter().all(Result::is_ok));
    let snapshot = controller.snapshot();
    let unique: HashSet<TaskId> = snapshot.tasks().iter().map(|task| task.id()).collect();
    assert_eq!(unique.len(), snapshot.tasks().len());
    assert_eq!(snapshot.tasks().len(), 11);
    assert_mirrors_store(&seeded).expect("local state mirrors the store");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggles_of_different_tasks_do_not_mark_each_other_stale(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    seeded
        .store
        .delay_operation(StoreOperation::Update, Duration::from_millis(20))
        .expect("delay");

    let (first, third) = tokio::join!(
        controller.toggle_complete(TaskId::new(1)),
        controller.toggle_complete(TaskId::new(3)),
    );

    assert_eq!(first.expect("toggle 1"), CommandOutcome::Applied);
    assert_eq!(third.expect("toggle 3"), CommandOutcome::Applied);
    assert_eq!(ids(controller.snapshot().completed()), vec![1, 2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn late_save_does_not_close_a_newer_session(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    seeded
        .store
        .delay_operation(StoreOperation::Update, Duration::from_millis(50))
        .expect("delay");
    assert_eq!(
        controller.start_edit(TaskId::new(1), "Buy oat milk"),
        CommandOutcome::Applied
    );

    let reopen = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.start_edit(TaskId::new(3), "Write summary")
    };
    let (saved, reopened) = tokio::join!(controller.save_edit(), reopen);

    assert_eq!(reopened, CommandOutcome::Applied);
    assert_eq!(saved.expect("save"), CommandOutcome::Applied);
    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.find(TaskId::new(1)).map(|task| task.text()),
        Some("Buy oat milk")
    );
    let session = snapshot.edit_session().expect("newer session kept");
    assert_eq!(session.target(), TaskId::new(3));
    assert_eq!(session.draft(), "Write summary");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_is_not_stale_when_another_task_is_deleted(seeded: Fixture) {
    let controller = &seeded.controller;
    controller.load().await.expect("load");
    seeded
        .store
        .delay_operation(StoreOperation::Update, Duration::from_millis(40))
        .expect("delay");

    let delete_after_dispatch = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.delete(TaskId::new(3)).await
    };
    let (toggle, delete) = tokio::join!(
        controller.toggle_complete(TaskId::new(1)),
        delete_after_dispatch
    );

    assert_eq!(delete.expect("delete"), CommandOutcome::Applied);
    assert_eq!(toggle.expect("toggle"), CommandOutcome::Applied);
    assert_eq!(ids(controller.snapshot().tasks()), vec![1, 2]);
}
