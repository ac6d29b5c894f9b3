//! Task list state and its synchronization with the remote task store.
//!
//! The module keeps an ordered, in-memory task collection consistent with
//! user commands, confirming every mutation against the remote store before
//! applying it. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The controller and its notifications in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
