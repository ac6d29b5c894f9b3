//! Then steps for task list BDD scenarios.

use super::world::{TaskListWorld, parse_ids};
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskId, services::TaskListError};

#[then("the task list size is {count:usize}")]
fn task_list_size_is(world: &TaskListWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.controller.snapshot().tasks().len();
    eyre::ensure!(held == count, "expected {count} task(s), found {held}");
    Ok(())
}

#[then(r#"task {id:u64} has text "{text}""#)]
fn task_has_text(world: &TaskListWorld, id: u64, text: String) -> Result<(), eyre::Report> {
    let snapshot = world.controller.snapshot();
    let task = snapshot
        .find(TaskId::new(id))
        .ok_or_else(|| eyre::eyre!("task {id} is not held"))?;
    eyre::ensure!(
        task.text() == text,
        "expected text '{text}', found '{}'",
        task.text()
    );
    Ok(())
}

#[then(r#"the last task is {id:u64} "{text}""#)]
fn last_task_is(world: &TaskListWorld, id: u64, text: String) -> Result<(), eyre::Report> {
    if let Some(Err(err)) = &world.last_result {
        return Err(eyre::eyre!("last command failed: {err}"));
    }
    let snapshot = world.controller.snapshot();
    let last = snapshot
        .tasks()
        .last()
        .ok_or_else(|| eyre::eyre!("task list is empty"))?;
    eyre::ensure!(
        last.id() == TaskId::new(id) && last.text() == text && !last.completed(),
        "expected last task {id} '{text}', found {} '{}'",
        last.id(),
        last.text()
    );
    Ok(())
}

#[then(r#"the active tasks are "{ids}""#)]
fn active_tasks_are(world: &TaskListWorld, ids: String) -> Result<(), eyre::Report> {
    let expected = parse_ids(&ids)?;
    let snapshot = world.controller.snapshot();
    let actual = TaskListWorld::ids_of(snapshot.active());
    eyre::ensure!(
        actual == expected,
        "expected active {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the completed tasks are "{ids}""#)]
fn completed_tasks_are(world: &TaskListWorld, ids: String) -> Result<(), eyre::Report> {
    let expected = parse_ids(&ids)?;
    let snapshot = world.controller.snapshot();
    let actual = TaskListWorld::ids_of(snapshot.completed());
    eyre::ensure!(
        actual == expected,
        "expected completed {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("no task is completed")]
fn no_task_is_completed(world: &TaskListWorld) -> Result<(), eyre::Report> {
    let snapshot = world.controller.snapshot();
    eyre::ensure!(
        snapshot.completed().is_empty(),
        "expected no completed tasks, found {:?}",
        TaskListWorld::ids_of(snapshot.completed())
    );
    Ok(())
}

#[then("no edit session is open")]
fn no_edit_session_is_open(world: &TaskListWorld) -> Result<(), eyre::Report> {
    if let Some(Err(err)) = &world.last_result {
        return Err(eyre::eyre!("last command failed: {err}"));
    }
    eyre::ensure!(
        world.controller.snapshot().edit_session().is_none(),
        "edit session is still open"
    );
    Ok(())
}

#[then(r#"the clear reports a partial failure for "{ids}""#)]
fn clear_reports_partial_failure(world: &TaskListWorld, ids: String) -> Result<(), eyre::Report> {
    let expected = parse_ids(&ids)?;
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing clear-completed result"))?;
    let Err(TaskListError::ClearCompletedPartialFailure { failed_ids, .. }) = result else {
        return Err(eyre::eyre!(
            "expected ClearCompletedPartialFailure, got {result:?}"
        ));
    };
    eyre::ensure!(
        *failed_ids == expected,
        "expected failed {expected:?}, found {failed_ids:?}"
    );
    Ok(())
}

#[then("the task list does not hold task {id:u64}")]
fn task_list_does_not_hold(world: &TaskListWorld, id: u64) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.controller.snapshot().find(TaskId::new(id)).is_none(),
        "task {id} is still held"
    );
    Ok(())
}
