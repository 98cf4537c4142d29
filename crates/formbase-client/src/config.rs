//! Client configuration.
//!
//! Configuration can be loaded from:
//! - A TOML file with a `[client]` table (path from `--config` or `FORMBASE_CONFIG`)
//! - Environment variables (`FORMBASE_*` prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use formbase_client::config::ClientConfig;
//!
//! // Load from FORMBASE_CONFIG if set, otherwise env vars
//! let config = ClientConfig::load(None).expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = ClientConfig::from_file(std::path::Path::new("formbase.toml")).expect("Failed to load");
//! ```
//!
//! ```toml
//! [client]
//! base_url = "https://forms.example.com/api"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use formbase_core::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for formbase_core::Error {
    fn from(e: ConfigError) -> Self {
        formbase_core::Error::Config(e.to_string())
    }
}

/// REST backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Load from an explicit path, then `FORMBASE_CONFIG`, then environment
    /// variables.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var("FORMBASE_CONFIG").ok().map(PathBuf::from));

        match path {
            Some(path) => {
                info!("Loading client config from: {}", path.display());
                Self::from_file(&path)
            }
            None => {
                debug!("No config file given, using environment variables");
                let config = Self::from_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a TOML document with a `[client]` table. `${VAR}` placeholders
    /// are replaced from the environment first.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            client: ClientConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        let mut config = root.client;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// - `FORMBASE_API_URL` (default: `http://localhost:3000`)
    /// - `FORMBASE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Self {
        let base_url = env::var("FORMBASE_API_URL")
            .unwrap_or_else(|_| defaults::API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = env::var("FORMBASE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
    }

    fn substitute_env_vars(content: &str) -> String {
        let re = match regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
