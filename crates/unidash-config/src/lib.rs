//! Configuration for the unidash dashboard.
//!
//! One controller, one site: a flat TOML file layered with `UNIDASH_*`
//! environment variables, translated into `unidash_core::ControllerConfig`.
//! Credentials never live here; they go through [`KeyringStore`].

mod keyring_store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unidash_core::config::{DEFAULT_CREDENTIAL_SERVICE, DEFAULT_SITE};
use unidash_core::{ControllerConfig, DEFAULT_TOP_K, TlsVerification};

pub use keyring_store::KeyringStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.1.1:8443").
    #[serde(default = "default_controller")]
    pub controller: String,

    /// Site whose clients are listed.
    #[serde(default = "default_site")]
    pub site: String,

    /// Accept self-signed certificates. Off unless asked for.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Keyring service the username/password are stored under.
    #[serde(default = "default_service")]
    pub service: String,

    /// How many devices the live view ranks.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: default_controller(),
            site: default_site(),
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
            service: default_service(),
            top: default_top(),
        }
    }
}

fn default_controller() -> String {
    "https://192.168.1.1:8443".into()
}
fn default_site() -> String {
    DEFAULT_SITE.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_service() -> String {
    DEFAULT_CREDENTIAL_SERVICE.into()
}
fn default_top() -> usize {
    DEFAULT_TOP_K
}

impl Config {
    /// Validate and translate into the core's runtime config.
    pub fn to_controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        let url: url::Url = self
            .controller
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "controller".into(),
                reason: format!("invalid URL: {}", self.controller),
            })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "controller".into(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.site.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "site".into(),
                reason: "site cannot be empty".into(),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "timeout must be at least 1 second".into(),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        let mut config = ControllerConfig::new(url);
        config.site.clone_from(&self.site);
        config.tls = tls;
        config.timeout = Duration::from_secs(self.timeout);
        config.credential_service.clone_from(&self.service);
        Ok(config)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unidash", "unidash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unidash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from defaults, the TOML file (`path` or the platform
/// default), then `UNIDASH_*` environment variables. A missing file is
/// not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("UNIDASH_").ignore(&["config"]));

    let config: Config = figment.extract()?;
    tracing::debug!(path = %path.display(), controller = %config.controller, "config loaded");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the default path).
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}
