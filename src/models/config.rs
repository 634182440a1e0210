//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target server connection.
    pub server: ServerConfig,
    /// Defaults applied to requests.
    pub defaults: DefaultsConfig,
    /// External client tools.
    pub tools: ToolsConfig,
}

/// Target server connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Administrative user.
    pub user: String,
    /// Administrative password.
    pub password: String,
}

/// Defaults applied to requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Per-statement timeout in seconds.
    pub timeout_secs: u64,
    /// Character set for new databases and dumps.
    pub charset: String,
    /// Directory backups are written to.
    pub backup_dir: PathBuf,
    /// Time zone location placed in connection strings.
    pub location: String,
}

/// External client tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub mysqldump: PathBuf,
    pub mysql: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
        }
    }
}

impl ServerConfig {
    /// Override fields from `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER` and `MYSQL_PWD`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("MYSQL_HOST") {
            self.host = host;
        }
        if let Some(port) = var("MYSQL_PORT").and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Some(user) = var("MYSQL_USER") {
            self.user = user;
        }
        if let Some(password) = var("MYSQL_PWD") {
            self.password = password;
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            charset: "utf8mb4".to_string(),
            backup_dir: dirs_config_path().join("backups"),
            location: "Asia/Shanghai".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mysqldump: PathBuf::from("mysqldump"),
            mysql: PathBuf::from("mysql"),
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mysql_admin")
}

/// Default location of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration from a specific file.
pub fn load_config_from(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from the default file, falling back to defaults.
pub fn load_config() -> Config {
    let config_path = config_file_path();

    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("Ignoring config {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}
