use crate::output::{mask_string, new_table, Output};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use comfy_table::Cell;
use moviepilot_config::{Config, PathManager, ServerConfig, ENV_URL, ENV_USERNAME};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Load the configuration, apply environment overrides and validate it.
pub fn load_config(path: Option<&PathBuf>, prompt_password: bool) -> Result<Config> {
    let config_file = path.cloned().unwrap_or_else(|| PathManager::default().config_file());

    let mut config = read_config(&config_file, |key| std::env::var(key).ok())?;
    config.apply_env_overrides();

    if prompt_password && !config.server.has_password() {
        let password = rpassword::prompt_password("MoviePilot password: ")
            .wrap_err("Failed to read password")?;
        config.server.password = Some(password);
    }

    config
        .validate()
        .wrap_err_with(|| format!("Invalid configuration in {}", config_file.display()))?;
    Ok(config)
}

/// Read `config_file`, or build a config from the environment when the file is absent.
fn read_config<F>(config_file: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if config_file.exists() {
        return Config::load_from_file(&config_file.to_path_buf())
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e));
    }

    match (env(ENV_URL), env(ENV_USERNAME)) {
        (Some(url), Some(username)) => Ok(Config::new(ServerConfig::new(url, username, None))),
        _ => Err(eyre!(
            "Configuration file not found at {}. Create it with a [server] section (url, username, password) or set {} and {}.",
            config_file.display(),
            ENV_URL,
            ENV_USERNAME
        )),
    }
}

pub fn show_config(config: &Config, full: bool, output: &Output) -> Result<()> {
    let server = &config.server;
    let password = match &server.password {
        Some(p) if full => p.clone(),
        Some(p) => mask_string(p),
        None => "<not set>".to_string(),
    };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|f| f.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    if !output.is_human() {
        output.json(&json!({
            "server": {
                "url": server.url,
                "username": server.username,
                "password": password,
                "timeout_secs": server.timeout_secs,
                "user_agent": server.user_agent,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": log_file,
            }
        }));
        return Ok(());
    }

    let mut table = new_table(&["Setting", "Value"]);
    table.add_row(vec![Cell::new("Server URL"), Cell::new(&server.url)]);
    table.add_row(vec![Cell::new("Username"), Cell::new(&server.username)]);
    table.add_row(vec![Cell::new("Password"), Cell::new(password)]);
    table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{} seconds", server.timeout_secs))]);
    table.add_row(vec![Cell::new("User-Agent"), Cell::new(&server.user_agent)]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("Log output"), Cell::new(log_file)]);
    output.table(&table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_read_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nurl = \"http://nas:3000\"\nusername = \"admin\"\npassword = \"pw\"\n",
        )
        .unwrap();

        let config = read_config(&path, no_env).unwrap();
        assert_eq!(config.server.base_url(), "http://nas:3000");
        assert_eq!(config.server.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_read_config_from_env_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let env: HashMap<&str, &str> = [(ENV_URL, "http://mp:3000"), (ENV_USERNAME, "bob")].into_iter().collect();

        let config = read_config(&dir.path().join("config.toml"), |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.server.username, "bob");
        assert!(config.server.password.is_none());
    }

    #[test]
    fn test_read_config_missing_everything() {
        let dir = TempDir::new().unwrap();
        let err = read_config(&dir.path().join("config.toml"), no_env).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }
}
