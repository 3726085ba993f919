//! Configuration types and loading
//!
//! Config precedence: CLI `--config` > `CONFIG_PATH` env var > default file.
//! `ADMIN_API_BASE_URL` overrides `backend.base_url` after the file is read.

use admin_gateway::GatewayConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "marketplace-admin.toml";
const BASE_URL_ENV: &str = "ADMIN_API_BASE_URL";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Admin backend connection settings
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_refresh_timeout")]
    pub refresh_timeout_secs: u64,
}

/// Where the session (tokens and identity) is persisted
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_credential_file")]
    pub credential_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential_file: default_credential_file(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_timeout() -> u64 {
    15
}

fn default_credential_file() -> PathBuf {
    PathBuf::from("marketplace-admin-session.json")
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.backend.base_url = url;
        }

        if !config.backend.base_url.starts_with("http://")
            && !config.backend.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                config.backend.base_url
            )));
        }

        if config.backend.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if config.backend.refresh_timeout_secs == 0 {
            return Err(common::Error::Config(
                "refresh_timeout_secs must be greater than 0".into(),
            ));
        }

        if config.session.credential_file.as_os_str().is_empty() {
            return Err(common::Error::Config(
                "credential_file must not be empty".into(),
            ));
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&Path>) -> PathBuf {
        if let Some(p) = cli_path {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.backend.base_url.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
            refresh_timeout: Duration::from_secs(self.backend.refresh_timeout_secs),
        }
    }
}
