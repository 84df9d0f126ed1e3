//! Client configuration.
//!
//! # Responsibility
//! - Hold the API endpoint, request timeout and routing constants.
//! - Load overrides from environment variables with local defaults.
//!
//! # Invariants
//! - `api_base_url` is absolute (`http://` or `https://`) and ends with `/`.
//! - `request_timeout` is never zero.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NOT_FOUND_ROUTE: &str = "404";

pub const ENV_API_URL: &str = "WIMC_API_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "WIMC_REQUEST_TIMEOUT_SECS";
pub const ENV_NOT_FOUND_ROUTE: &str = "WIMC_NOT_FOUND_ROUTE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    ZeroTimeout,
    InvalidNumber { key: &'static str, value: String },
    EmptyRoute,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "api base url must start with http:// or https://, got `{value}`")
            }
            Self::ZeroTimeout => write!(f, "request timeout must be greater than zero"),
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a non-negative integer, got `{value}`")
            }
            Self::EmptyRoute => write!(f, "not-found route cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings shared by transport and navigation helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Route the resolver redirects to when an entity does not exist.
    pub not_found_route: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            not_found_route: DEFAULT_NOT_FOUND_ROUTE.to_string(),
            user_agent: format!("wimc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a config for `api_base_url` with default timeouts.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            api_base_url: normalize_base_url(&api_base_url.into())?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the process environment.
    ///
    /// | Env var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `WIMC_API_URL`               | `http://localhost:8080/` |
    /// | `WIMC_REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `WIMC_NOT_FOUND_ROUTE`       | `404`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_base_url = normalize_base_url(&url)?;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_REQUEST_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(route) = lookup(ENV_NOT_FOUND_ROUTE) {
            config.not_found_route = route.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_base_url(&self.api_base_url)?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.not_found_route.trim().is_empty() {
            return Err(ConfigError::EmptyRoute);
        }
        Ok(())
    }

    /// Joins the base URL and a resource path such as `api/comics`.
    pub fn endpoint_for(&self, resource_path: &str) -> String {
        format!(
            "{}{}",
            self.api_base_url,
            resource_path.trim_start_matches('/')
        )
    }
}

fn normalize_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(value.to_string()));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}
