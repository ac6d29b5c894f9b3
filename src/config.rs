//! Configuration for the task list client.
//!
//! Configuration is read from environment variables:
//! - `TASKBOARD_BASE_URL` - Optional. Remote task API base URL. Defaults to
//!   `https://dummyjson.com`.
//! - `TASKBOARD_USER_ID` - Optional. Remote user owning created tasks.
//!   Defaults to `1`.
//! - `TASKBOARD_TIMEOUT_SECS` - Optional. Per-request timeout in seconds.
//!   Defaults to `10`.
//! - `TASKBOARD_ACCESS_TOKEN` - Optional. Bearer token sent with requests.
//! - `TASKBOARD_EVENT_CAPACITY` - Optional. Buffered notifications per
//!   subscriber. Defaults to `64`; at most `65536`.

use crate::task::{
    adapters::http::{DEFAULT_BASE_URL, HttpStoreSettings},
    domain::UserId,
    services::{ControllerSettings, MAX_EVENT_CAPACITY},
};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the API base URL.
pub const BASE_URL_VAR: &str = "TASKBOARD_BASE_URL";
/// Environment variable naming the owning user.
pub const USER_ID_VAR: &str = "TASKBOARD_USER_ID";
/// Environment variable naming the request timeout in seconds.
pub const TIMEOUT_SECS_VAR: &str = "TASKBOARD_TIMEOUT_SECS";
/// Environment variable naming the bearer token.
pub const ACCESS_TOKEN_VAR: &str = "TASKBOARD_ACCESS_TOKEN";
/// Environment variable naming the event buffer capacity.
pub const EVENT_CAPACITY_VAR: &str = "TASKBOARD_EVENT_CAPACITY";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskboardConfig {
    /// Remote task API base URL.
    pub base_url: String,
    /// Remote user owning created tasks.
    pub user_id: UserId,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Bearer token sent with requests, when set.
    pub access_token: Option<String>,
    /// Buffered notifications per subscriber.
    pub event_capacity: usize,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_id: UserId::default(),
            request_timeout: Duration::from_secs(10),
            access_token: None,
            event_capacity: 64,
        }
    }
}

impl TaskboardConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed or fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// Unset and blank variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed or fails validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let base_url = match read(BASE_URL_VAR) {
            Some(url) => validate_base_url(url)?,
            None => defaults.base_url,
        };
        let user_id = match read(USER_ID_VAR) {
            Some(raw) => UserId::new(parse_positive(USER_ID_VAR, &raw)?),
            None => defaults.user_id,
        };
        let request_timeout = match read(TIMEOUT_SECS_VAR) {
            Some(raw) => Duration::from_secs(parse_positive(TIMEOUT_SECS_VAR, &raw)?),
            None => defaults.request_timeout,
        };
        let event_capacity = match read(EVENT_CAPACITY_VAR) {
            Some(raw) => parse_event_capacity(&raw)?,
            None => defaults.event_capacity,
        };

        Ok(Self {
            base_url,
            user_id,
            request_timeout,
            access_token: read(ACCESS_TOKEN_VAR),
            event_capacity,
        })
    }

    /// Returns settings for the HTTP store adapter.
    #[must_use]
    pub fn http_store_settings(&self) -> HttpStoreSettings {
        HttpStoreSettings {
            base_url: self.base_url.clone(),
            timeout: self.request_timeout,
            access_token: self.access_token.clone(),
        }
    }

    /// Returns settings for the task list controller.
    #[must_use]
    pub const fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            user_id: self.user_id,
            event_capacity: self.event_capacity,
        }
    }
}

fn validate_base_url(url: String) -> Result<String, ConfigError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::invalid(
            BASE_URL_VAR,
            format!("'{url}' must start with 'http://' or 'https://'"),
        ));
    }
    Ok(url)
}

fn parse_event_capacity(raw: &str) -> Result<usize, ConfigError> {
    let value = parse_positive(EVENT_CAPACITY_VAR, raw)?;
    match usize::try_from(value) {
        Ok(capacity) if capacity <= MAX_EVENT_CAPACITY => Ok(capacity),
        _ => Err(ConfigError::invalid(
            EVENT_CAPACITY_VAR,
            format!("must not exceed {MAX_EVENT_CAPACITY}"),
        )),
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let value: u64 = raw
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigError::invalid(name, err.to_string()))?;
    if value == 0 {
        return Err(ConfigError::invalid(name, "must be greater than zero"));
    }
    Ok(value)
}
