pub mod config;
pub mod paths;

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_PASSWORD, ENV_URL, ENV_USERNAME};
pub use paths::{PathManager, container_base_path};
