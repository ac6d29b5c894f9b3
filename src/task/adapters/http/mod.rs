//! HTTP adapter for the remote task store.

mod client;
mod models;

pub use client::{DEFAULT_BASE_URL, HttpStoreSettings, HttpTaskStore};
