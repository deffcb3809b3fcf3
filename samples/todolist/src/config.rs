//! Configuration management for the todo list server.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Application server configuration
    pub server: ServerConfig,
    /// Behavior endpoint configuration
    pub behavior: BehaviorConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Behavior endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BehaviorConfig {
    /// Path of the POST endpoint requests are sent to, e.g. `/todolist`
    pub endpoint: Endpoint,
}

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The behavior endpoint is not a plain route path.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The rejected value, as configured
        endpoint: String,
        /// What is wrong with it
        reason: &'static str,
    },
}

/// A literal route path: one leading slash, no trailing slash, no route
/// parameters or wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    /// Normalize and validate a configured endpoint.
    ///
    /// Surrounding whitespace and slashes are trimmed, so `lists/` becomes
    /// `/lists` and an empty value becomes `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the path contains route
    /// syntax (`:`, `*`, `{`, `}`), a query or fragment marker, whitespace, or
    /// an empty segment.
    pub fn parse(endpoint: &str) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };

        let path = endpoint.trim().trim_matches('/');

        if path.contains([':', '*', '{', '}']) {
            return Err(invalid("route parameters and wildcards are not allowed"));
        }
        if path.contains(['?', '#']) {
            return Err(invalid("query and fragment markers are not allowed"));
        }
        if path.contains(char::is_whitespace) {
            return Err(invalid("whitespace is not allowed"));
        }
        if path.contains("//") {
            return Err(invalid("empty path segments are not allowed"));
        }

        Ok(Self(format!("/{path}")))
    }

    /// The path, always starting with `/`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a sub-route, e.g. `/todolist` + `tasks` is `/todolist/tasks`
    #[must_use]
    pub fn join(&self, segment: &str) -> String {
        if self.0 == "/" {
            format!("/{segment}")
        } else {
            format!("{}/{segment}", self.0)
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self("/todolist".to_string())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Endpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `BEHAVIOR_ENDPOINT` is not a valid route path.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `BEHAVIOR_ENDPOINT` is not a valid route path.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup("BEHAVIOR_ENDPOINT") {
            Some(endpoint) => Endpoint::parse(&endpoint)?,
            None => Endpoint::default(),
        };

        let defaults = ServerConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.host),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.port),
                log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            },
            behavior: BehaviorConfig { endpoint },
        })
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}
