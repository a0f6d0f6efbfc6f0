//! API configuration parsed from environment variables.
//!
//! Explicit values (CLI flags) win over the environment; the environment
//! wins over the defaults.

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing credential: {var} not set")]
    MissingVar { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl ApiTimeouts {
    /// Read `TRELLO_REQUEST_TIMEOUT_SECS` / `TRELLO_CONNECT_TIMEOUT_SECS`,
    /// falling back to the defaults for missing or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_u64("TRELLO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("TRELLO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Values that take precedence over the environment when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub token: String,
    pub timeouts: ApiTimeouts,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str, api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            token: token.into(),
            timeouts: ApiTimeouts::default(),
        }
    }

    /// Build typed API config from environment variables.
    ///
    /// Required:
    /// - `TRELLO_API_KEY`
    /// - `TRELLO_API_TOKEN`
    ///
    /// Optional:
    /// - `TRELLO_BASE_URL`: default `https://api.trello.com/1`
    /// - `TRELLO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TRELLO_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if a credential is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Like [`Self::from_env`], but each field set in `overrides` is used
    /// instead of its environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if a credential is neither
    /// overridden nor set in the environment.
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let api_key = required("TRELLO_API_KEY", overrides.api_key)?;
        let token = required("TRELLO_API_TOKEN", overrides.token)?;
        let base_url = match overrides.base_url {
            Some(base_url) => base_url,
            None => std::env::var("TRELLO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };

        Ok(Self { base_url: normalize_base_url(&base_url), api_key, token, timeouts: ApiTimeouts::from_env() })
    }
}

fn required(var: &'static str, given: Option<String>) -> Result<String, ConfigError> {
    given
        .or_else(|| std::env::var(var).ok())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar { var })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
