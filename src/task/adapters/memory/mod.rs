//! In-memory adapters for the task list.

mod store;

pub use store::{InMemoryTaskStore, StoreOperation};
