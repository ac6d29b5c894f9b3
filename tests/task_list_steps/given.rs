//! Given steps for task list BDD scenarios.

use super::world::{TaskListWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{domain::TaskId, ports::RemoteTask};

#[given(r#"the remote store holds task {id:u64} "{text}" {state}"#)]
fn remote_store_holds_task(
    world: &mut TaskListWorld,
    id: u64,
    text: String,
    state: String,
) -> Result<(), eyre::Report> {
    let completed = match state.as_str() {
        "active" => false,
        "completed" => true,
        other => return Err(eyre::eyre!("unknown task state '{other}' in scenario")),
    };
    world
        .store
        .seed(RemoteTask::new(TaskId::new(id), text, completed))
        .wrap_err("seed remote store")
}

#[given("deleting task {id:u64} fails remotely")]
fn deleting_task_fails(world: &mut TaskListWorld, id: u64) -> Result<(), eyre::Report> {
    world
        .store
        .fail_delete_of(TaskId::new(id))
        .wrap_err("inject delete failure")
}

#[given("the task list has been loaded")]
fn task_list_has_been_loaded(world: &mut TaskListWorld) -> Result<(), eyre::Report> {
    run_async(world.controller.load()).wrap_err("load task list in scenario setup")?;
    Ok(())
}
