//! Application services for the task list.

mod controller;
mod error;
mod events;
mod outcome;

pub use controller::{ControllerSettings, MAX_EVENT_CAPACITY, TaskListController};
pub use error::{TaskListError, TaskListErrorKind, TaskListResult};
pub use events::TaskListEvent;
pub use outcome::CommandOutcome;
