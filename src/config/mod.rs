//! Configuration loading for rpalert
//!
//! Settings come from a JSON (or YAML) file and can be overridden through
//! `RP_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable names for config overrides
pub const ENV_BASE_URL: &str = "RP_BASE_URL";
pub const ENV_TOKEN: &str = "RP_TOKEN";
pub const ENV_USERNAME: &str = "RP_USERNAME";
pub const ENV_PASSWORD: &str = "RP_PASSWORD";
pub const ENV_VERIFY_SSL: &str = "RP_VERIFY_SSL";

/// ReportPortal connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server base URL, without trailing slash
    #[serde(default)]
    pub base_url: String,

    /// Pre-issued API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Username for the password grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for the password grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Verify TLS certificates
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_verify_ssl() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            username: None,
            password: None,
            verify_ssl: default_verify_ssl(),
        }
    }
}

impl Config {
    /// Load, overlay the process environment, normalize and validate.
    ///
    /// An explicit `path` must exist. Without one, `config.json` in the
    /// working directory is used when present and the environment alone
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    log::debug!("No {} found, using environment only", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;
        config.normalize();
        config.validate()?;

        log::info!("Config loaded: base_url={}", config.base_url);
        Ok(config)
    }

    /// Parse a config file without validating it
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let config: Config = if is_yaml {
            serde_yaml::from_str(&contents).map_err(ConfigError::from)?
        } else {
            serde_json::from_str(&contents).map_err(ConfigError::from)?
        };

        Ok(config)
    }

    /// Override fields with values from the environment
    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(token) = env(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(user) = env(ENV_USERNAME) {
            self.username = Some(user);
        }
        if let Some(pass) = env(ENV_PASSWORD) {
            self.password = Some(pass);
        }
        if let Some(raw) = env(ENV_VERIFY_SSL) {
            self.verify_ssl = parse_bool(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("{} must be true or false, got '{}'", ENV_VERIFY_SSL, raw))
            })?;
        }
        Ok(())
    }

    /// Trim values, drop empty credentials and strip trailing slashes
    fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        for field in [&mut self.token, &mut self.username, &mut self.password] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }

    /// Validate that required configuration is present
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl.into());
        }
        if self.token.is_none() && !self.has_password_credentials() {
            return Err(ConfigError::MissingCredentials.into());
        }
        Ok(())
    }

    /// Whether both username and password are set
    pub fn has_password_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
