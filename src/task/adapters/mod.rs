//! Adapter implementations of the remote task store port.
//!
//! - [`http`]: `reqwest` client for a dummyjson-compatible task API
//! - [`memory`]: deterministic in-memory store for tests and demos

pub mod http;
pub mod memory;
