//! Port contracts for the task list.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod remote_store;

#[cfg(test)]
pub use remote_store::MockRemoteTaskStore;
pub use remote_store::{
    NewRemoteTask, RemoteStoreError, RemoteStoreResult, RemoteTask, RemoteTaskPatch,
    RemoteTaskStore,
};
