//! When steps for task list BDD scenarios.

use super::world::{TaskListWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::{domain::TaskId, services::CommandOutcome};

#[when("the task list is loaded")]
fn task_list_is_loaded(world: &mut TaskListWorld) {
    world.last_result = Some(run_async(world.controller.load()));
}

#[when(r#"a task "{text}" is created"#)]
fn task_is_created(world: &mut TaskListWorld, text: String) {
    world.last_result = Some(run_async(world.controller.create(text)));
}

#[when(r#"task {id:u64} is edited starting from "{text}""#)]
fn task_is_edited(world: &mut TaskListWorld, id: u64, text: String) -> Result<(), eyre::Report> {
    let outcome = world.controller.start_edit(TaskId::new(id), text);
    eyre::ensure!(
        outcome == CommandOutcome::Applied,
        "edit session did not open: {}",
        outcome.as_str()
    );
    Ok(())
}

#[when(r#"the draft is changed to "{text}""#)]
fn draft_is_changed(world: &mut TaskListWorld, text: String) -> Result<(), eyre::Report> {
    let outcome = world.controller.update_draft(text);
    eyre::ensure!(
        outcome == CommandOutcome::Applied,
        "draft was not updated: {}",
        outcome.as_str()
    );
    Ok(())
}

#[when("the edit is saved")]
fn edit_is_saved(world: &mut TaskListWorld) {
    world.last_result = Some(run_async(world.controller.save_edit()));
}

#[when("completed tasks are cleared")]
fn completed_tasks_are_cleared(world: &mut TaskListWorld) {
    world.last_result = Some(run_async(world.controller.clear_completed()));
}
