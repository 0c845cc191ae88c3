use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_USER_AGENT: &str = concat!("moviepilot-client/", env!("CARGO_PKG_VERSION"));

pub const ENV_URL: &str = "MOVIEPILOT_URL";
pub const ENV_USERNAME: &str = "MOVIEPILOT_USERNAME";
pub const ENV_PASSWORD: &str = "MOVIEPILOT_PASSWORD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for one MoviePilot instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Keeps the password out of `{:?}` output.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl ServerConfig {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Base url without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().map_or(false, |p| !p.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Config {
    pub fn new(server: ServerConfig) -> Self {
        Self {
            server,
            logging: LoggingConfig::default(),
        }
    }

    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overwrite server settings with values from `lookup` (empty values are ignored).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = get(ENV_URL) {
            self.server.url = url;
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.server.username = username;
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.server.password = Some(password);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()
    }
}
