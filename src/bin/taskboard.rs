//! Command-line front end for the task list controller.
//!
//! Usage:
//!
//! ```text
//! taskboard [list]
//! taskboard add <text>
//! taskboard toggle <id>
//! taskboard edit <id> <text>
//! taskboard rm <id>
//! taskboard clear-completed
//! ```
//!
//! Every invocation loads the remote collection, applies at most one
//! command through the controller, and prints the resulting active and
//! completed partitions to stdout. The remote store is configured through
//! the `TASKBOARD_*` environment variables read by
//! [`taskboard::config::TaskboardConfig`]; log output goes to stderr and is
//! filtered by `RUST_LOG`.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use taskboard::config::{ConfigError, TaskboardConfig};
use taskboard::task::adapters::http::HttpTaskStore;
use taskboard::task::domain::{TaskId, TaskListSnapshot};
use taskboard::task::ports::{RemoteStoreError, RemoteTaskStore};
use taskboard::task::services::{CommandOutcome, TaskListController, TaskListError};
use taskboard::telemetry;
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("remote store set-up failed: {0}")]
    Store(#[from] RemoteStoreError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error(transparent)]
    TaskList(#[from] TaskListError),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    List,
    Add(String),
    Toggle(TaskId),
    Edit(TaskId, String),
    Remove(TaskId),
    ClearCompleted,
}

impl Operation {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        match args {
            [] => Ok(Self::List),
            [command, rest @ ..] => match (command.as_str(), rest) {
                ("list", []) => Ok(Self::List),
                ("add", words) if !words.is_empty() => Ok(Self::Add(words.join(" "))),
                ("toggle", [id]) => Ok(Self::Toggle(parse_id(id)?)),
                ("edit", [id, words @ ..]) if !words.is_empty() => {
                    Ok(Self::Edit(parse_id(id)?, words.join(" ")))
                }
                ("rm", [id]) => Ok(Self::Remove(parse_id(id)?)),
                ("clear-completed", []) => Ok(Self::ClearCompleted),
                ("list" | "add" | "toggle" | "edit" | "rm" | "clear-completed", _) => Err(
                    CliError::InvalidArgs(format!("wrong number of arguments for '{command}'")),
                ),
                (other, _) => Err(CliError::InvalidArgs(format!(
                    "unknown operation '{other}'; expected list, add, toggle, edit, rm, or clear-completed"
                ))),
            },
        }
    }
}

fn parse_id(raw: &str) -> Result<TaskId, CliError> {
    raw.parse::<u64>()
        .map(TaskId::new)
        .map_err(|err| CliError::InvalidArgs(format!("invalid task id '{raw}': {err}")))
}

fn collect_args() -> Result<Vec<String>, CliError> {
    env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|_| CliError::InvalidArgs("arguments must be valid UTF-8".into()))
        })
        .collect()
}

fn main() -> Result<(), BoxError> {
    let operation = Operation::parse(&collect_args()?)?;
    telemetry::init()?;
    let config = TaskboardConfig::from_env().map_err(CliError::from)?;
    let store = HttpTaskStore::new(config.http_store_settings()).map_err(CliError::from)?;
    let controller = TaskListController::new(Arc::new(store), config.controller_settings());

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    runtime.block_on(run(&controller, operation))?;

    render(&mut io::stdout().lock(), &controller.snapshot()).map_err(CliError::Output)?;
    Ok(())
}

async fn run<S>(controller: &TaskListController<S>, operation: Operation) -> Result<(), CliError>
where
    S: RemoteTaskStore,
{
    controller.load().await?;
    let outcome = match operation {
        Operation::List => return Ok(()),
        Operation::Add(text) => controller.create(text).await?,
        Operation::Toggle(id) => controller.toggle_complete(id).await?,
        Operation::Edit(id, text) => {
            let opened = controller.start_edit(id, text);
            tracing::debug!(task_id = %id, outcome = opened.as_str(), "edit session opened");
            controller.save_edit().await?
        }
        Operation::Remove(id) => controller.delete(id).await?,
        Operation::ClearCompleted => controller.clear_completed().await?,
    };
    if outcome == CommandOutcome::Skipped {
        tracing::info!("command skipped; nothing to change");
    }
    Ok(())
}

fn render(out: &mut impl Write, snapshot: &TaskListSnapshot) -> io::Result<()> {
    if snapshot.is_empty() {
        return writeln!(out, "no tasks");
    }
    for task in snapshot.active() {
        writeln!(out, "[ ] {:>4}  {}", task.id().value(), task.text())?;
    }
    for task in snapshot.completed() {
        writeln!(out, "[x] {:>4}  {}", task.id().value(), task.text())?;
    }
    Ok(())
}
