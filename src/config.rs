//! Process configuration.
//!
//! Read once at startup from a TOML file, then `SPACEDOCK_`-prefixed
//! environment variables (`__` separates nested keys, e.g.
//! `SPACEDOCK_DATABASE__URL`). A missing file or malformed content is fatal.

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error as ThisError;

pub const DEFAULT_CONFIG_PATH: &str = "spacedock.toml";
const ENV_PREFIX: &str = "SPACEDOCK_";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Account written to `users` at startup, if set.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: Option<u64>,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: Option<u64>,
}

#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["https://localhost:4200".to_string()]
}

fn default_max_connections() -> u32 {
    10
}

fn default_idle_timeout_secs() -> Option<u64> {
    Some(180)
}

fn default_max_lifetime_secs() -> Option<u64> {
    Some(180)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory database; the connection never idles out.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            idle_timeout_secs: None,
            max_lifetime_secs: None,
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load `path`, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Parse TOML text only, without environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Toml::string(toml))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}

/// First CLI argument, else `SPACEDOCK_CONFIG`, else `spacedock.toml`.
pub fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("SPACEDOCK_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
