//! Taskboard: task list client synchronized with a remote task store.
//!
//! The crate keeps an ordered, in-memory task collection consistent with a
//! sequence of user commands and confirms each mutation against a remote
//! source of truth, including partial-failure recovery and item-level edit
//! mode.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure list state with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote task store
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task list controller, domain, and remote store adapters
//! - [`config`]: Environment-driven client configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod task;
pub mod telemetry;
