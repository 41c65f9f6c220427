//! Process-wide configuration read from the environment.
//!
//! - `TODO_API_URL`: base URL of the todo service (default `http://127.0.0.1:3000`).
//! - `TODO_USER_ID`: the user whose todos are managed. Absent or blank means
//!   nobody is signed in and the todo feature stays disabled.

use thiserror::Error;

pub const API_URL_VAR: &str = "TODO_API_URL";
pub const USER_ID_VAR: &str = "TODO_USER_ID";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Shown to the user in place of the todo list.
    #[error("Please authenticate to see your todos")]
    MissingUserId,

    #[error("TODO_USER_ID must be a positive integer, got {0:?}")]
    InvalidUserId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub user_id: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let raw = lookup(USER_ID_VAR).unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingUserId);
        }
        let user_id = match raw.parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => return Err(ConfigError::InvalidUserId(raw.to_string())),
        };

        Ok(Self { api_url, user_id })
    }
}
