use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use svcdeck_core::config::{ManagedHost, SupervisorConfig, DEFAULT_SUPERVISOR_BIN};

/// Invalid environment configuration. Startup aborts on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    CorsOrigin(String),

    #[error(
        "REQUEST_TIMEOUT_SECS must be at least {minimum_secs} to cover an action and its save, got {request_secs}"
    )]
    RequestTimeoutTooShort { request_secs: u64, minimum_secs: u64 },
}

/// Slack required on top of two action budgets (the action and its `save`).
pub const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Headroom added over two action budgets when `REQUEST_TIMEOUT_SECS` is unset.
const DEFAULT_REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 15;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: two action budgets plus
    /// 15s, i.e. `75`).
    pub request_timeout_secs: u64,
    /// Supervisor binary, timeouts and managed host.
    pub supervisor: SupervisorConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `75` (see below)        |
    /// | `PM2_BIN`                        | `pm2`                   |
    /// | `SUPERVISOR_QUERY_TIMEOUT_SECS`  | `10`                    |
    /// | `SUPERVISOR_ACTION_TIMEOUT_SECS` | `30`                    |
    /// | `SUPERVISOR_LOG_TIMEOUT_SECS`    | `10`                    |
    /// | `MANAGED_HOST`                   | unset                   |
    /// | `MANAGED_PORT`                   | unset                   |
    /// | `MANAGED_USER`                   | unset                   |
    ///
    /// `REQUEST_TIMEOUT_SECS` must leave room for a lifecycle action plus its
    /// `save`: at least `2 * SUPERVISOR_ACTION_TIMEOUT_SECS + 5`. When unset it
    /// is derived from the action budget.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&var, "PORT", "u16", 3000u16)?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::CorsOrigin(o.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = SupervisorConfig::default();
        let supervisor = SupervisorConfig {
            binary: var("PM2_BIN").unwrap_or_else(|| DEFAULT_SUPERVISOR_BIN.into()),
            query_timeout: parse_secs_or(&var, "SUPERVISOR_QUERY_TIMEOUT_SECS", defaults.query_timeout)?,
            action_timeout: parse_secs_or(&var, "SUPERVISOR_ACTION_TIMEOUT_SECS", defaults.action_timeout)?,
            log_timeout: parse_secs_or(&var, "SUPERVISOR_LOG_TIMEOUT_SECS", defaults.log_timeout)?,
            managed_host: managed_host(&var)?,
        };

        let dispatch_secs = 2 * supervisor.action_timeout.as_secs();
        let request_timeout_secs = parse_or(
            &var,
            "REQUEST_TIMEOUT_SECS",
            "u64",
            dispatch_secs + DEFAULT_REQUEST_TIMEOUT_HEADROOM_SECS,
        )?;
        let minimum_secs = dispatch_secs + REQUEST_TIMEOUT_MARGIN_SECS;
        if request_timeout_secs < minimum_secs {
            return Err(ConfigError::RequestTimeoutTooShort {
                request_secs: request_timeout_secs,
                minimum_secs,
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            supervisor,
        })
    }
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

/// Timeouts must be at least one second.
fn parse_secs_or(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let secs = parse_or(var, key, "positive number of seconds", default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            expected: "positive number of seconds",
            value: "0".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn managed_host(var: &impl Fn(&str) -> Option<String>) -> Result<Option<ManagedHost>, ConfigError> {
    let Some(host) = var("MANAGED_HOST") else {
        return Ok(None);
    };
    let port = match var("MANAGED_PORT") {
        None => None,
        Some(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
            key: "MANAGED_PORT",
            expected: "u16",
            value,
        })?),
    };
    Ok(Some(ManagedHost {
        host,
        port,
        user: var("MANAGED_USER"),
    }))
}
