//! Configuration management for the todo lists server.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::{IdPolicy, ListEnvironment};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Log filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "todo_lists=info,todo_lists_web=info,tower_http=info";

/// Errors found while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `LIST_ID_POLICY` names no known policy
    #[error("LIST_ID_POLICY must be `max_plus_one` or `monotonic`, got `{0}`")]
    UnknownIdPolicy(String),

    /// `SESSION_TTL` is zero
    #[error("SESSION_TTL must be greater than zero")]
    ZeroSessionTtl,

    /// `SESSION_TTL` does not fit in a duration
    #[error("SESSION_TTL of {0} seconds is out of range")]
    SessionTtlOutOfRange(u64),

    /// `SESSION_PURGE_INTERVAL` is zero
    #[error("SESSION_PURGE_INTERVAL must be greater than zero")]
    ZeroPurgeInterval,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Session storage configuration
    pub session: SessionConfig,
    /// Behavior of list operations
    pub lists: ListsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter (`RUST_LOG` syntax)
    pub log_level: String,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4567,
            log_level: DEFAULT_LOG_FILTER.to_string(),
            shutdown_timeout: 30,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle seconds before a session expires (default: 1 day)
    pub ttl: u64,
    /// Seconds between sweeps that drop expired sessions
    pub purge_interval: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: 86_400,
            purge_interval: 300,
        }
    }
}

/// List behavior configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListsConfig {
    /// How new list and todo ids are assigned
    pub id_policy: IdPolicy,
    /// Whether a list may be renamed to its current name
    pub allow_rename_to_self: bool,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownIdPolicy`] when `LIST_ID_POLICY` is set to
    /// an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// Numeric and boolean values that fail to parse fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownIdPolicy`] when `LIST_ID_POLICY` is set to
    /// an unknown value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let id_policy = match lookup("LIST_ID_POLICY") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::UnknownIdPolicy(raw.clone()))?,
            None => defaults.lists.id_policy,
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.server.host),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.port),
                log_level: lookup("RUST_LOG").unwrap_or(defaults.server.log_level),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.shutdown_timeout),
            },
            session: SessionConfig {
                ttl: lookup("SESSION_TTL")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.session.ttl),
                purge_interval: lookup("SESSION_PURGE_INTERVAL")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.session.purge_interval),
            },
            lists: ListsConfig {
                id_policy,
                allow_rename_to_self: lookup("ALLOW_RENAME_TO_SELF")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.lists.allow_rename_to_self),
            },
        })
    }

    /// Check values that would make the server misbehave
    ///
    /// # Errors
    ///
    /// Returns an error for a zero or out-of-range session TTL and for a zero
    /// purge interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.ttl == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }
        if Self::ttl_duration(self.session.ttl).is_none() {
            return Err(ConfigError::SessionTtlOutOfRange(self.session.ttl));
        }
        if self.session.purge_interval == 0 {
            return Err(ConfigError::ZeroPurgeInterval);
        }
        Ok(())
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Session idle TTL
    ///
    /// Saturates at [`chrono::Duration::MAX`]; [`validate`](Self::validate)
    /// rejects values that need it.
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        Self::ttl_duration(self.session.ttl).unwrap_or(chrono::Duration::MAX)
    }

    fn ttl_duration(seconds: u64) -> Option<chrono::Duration> {
        i64::try_from(seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
    }

    /// Interval between expired-session sweeps
    #[must_use]
    pub const fn purge_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session.purge_interval)
    }

    /// Grace period for in-flight requests on shutdown
    #[must_use]
    pub const fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server.shutdown_timeout)
    }

    /// Reducer environment for every new session
    #[must_use]
    pub const fn list_environment(&self) -> ListEnvironment {
        ListEnvironment::new(self.lists.id_policy, self.lists.allow_rename_to_self)
    }
}
