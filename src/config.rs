//! Runtime configuration.
//!
//! Settings come from an optional YAML file named by `WEBWORKER_CONFIG`,
//! then individual environment variables override single keys:
//!
//! | Variable          | Key                           | Default            |
//! |-------------------|-------------------------------|--------------------|
//! | `LISTEN`          | `server.listen_addr`          | `127.0.0.1:8080`   |
//! | `READ_TIMEOUT_MS` | `server.read_timeout_ms`      | `30000`            |
//! | `WEB_ROOT`        | `static_files.root`           | `www`              |
//! | `NOT_FOUND_PAGE`  | `static_files.not_found_page` | `www/404.html`     |

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "WEBWORKER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// How long a connection may take to deliver its request head.
    /// Zero waits forever.
    pub read_timeout_ms: u64,
}

/// Where files are served from. Shared read-only by every connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root requested paths are resolved against.
    pub root: PathBuf,
    /// Body of every not-found response.
    pub not_found_page: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_ms: 30_000,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("www"),
            not_found_page: PathBuf::from("www/404.html"),
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads the configuration reading variables through `lookup`.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Some(ms) = lookup("READ_TIMEOUT_MS") {
            cfg.server.read_timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("invalid READ_TIMEOUT_MS value {:?}", ms))?;
        }
        if let Some(root) = lookup("WEB_ROOT") {
            cfg.static_files.root = PathBuf::from(root);
        }
        if let Some(page) = lookup("NOT_FOUND_PAGE") {
            cfg.static_files.not_found_page = PathBuf::from(page);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
