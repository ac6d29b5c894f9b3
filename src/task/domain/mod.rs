//! Domain model for the task list.
//!
//! The domain holds the task entity, the edit session, and the list
//! aggregate that applies confirmed mutations. It performs no I/O; remote
//! confirmation is orchestrated by the services layer.

mod edit_session;
mod error;
mod ids;
mod snapshot;
mod task;
mod task_list;
mod text;

pub use edit_session::EditSession;
pub use error::TaskDomainError;
pub use ids::{TaskId, UserId};
pub use snapshot::TaskListSnapshot;
pub use task::{Task, TaskPartition};
pub use task_list::{RemovalSummary, ReplaceSummary, TaskList};
pub use text::TaskText;
