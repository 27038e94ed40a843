//! Configuration loading
//!
//! Resolution priority (highest first):
//! 1. Command-line argument (applied by the binary after `load`)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing config file is not an error: defaults apply and a warning is logged.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SURVIVAL_CONFIG";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database file backing the record store
    pub database_path: PathBuf,
    /// Record table name
    pub table_name: String,
    /// Local model artifact path (also the download target for object store artifacts)
    pub model_path: PathBuf,
    /// Object store bucket holding the model artifact; local artifact when unset
    pub artifact_bucket: Option<String>,
    /// Object store base URL
    pub artifact_endpoint: String,
    /// Object key of the model artifact inside the bucket
    pub artifact_key: String,
    /// Log destination group
    pub log_group: String,
    /// Log destination stream
    pub log_stream: String,
    /// Deployment environment tag
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: PathBuf::from("survival.db"),
            table_name: "sobreviventes".to_string(),
            model_path: PathBuf::from("tmp").join("model.json"),
            artifact_bucket: None,
            artifact_endpoint: "https://s3.amazonaws.com".to_string(),
            artifact_key: "model.json".to_string(),
            log_group: "survival-api".to_string(),
            log_stream: "default".to_string(),
            environment: "dev".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from TOML (if any) and apply environment overrides
    ///
    /// `explicit_path` comes from the command line. Falls back to
    /// `SURVIVAL_CONFIG`, then the platform config directory.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
            .or_else(default_config_file);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::from_toml_file(&path)?
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Override fields from `SURVIVAL_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(v) = env_value("SURVIVAL_HOST") {
            self.host = v;
        }
        if let Some(v) = env_value("SURVIVAL_PORT") {
            self.port = v
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SURVIVAL_PORT: {}", v)))?;
        }
        if let Some(v) = env_value("SURVIVAL_DATABASE") {
            self.database_path = PathBuf::from(v);
        }
        if let Some(v) = env_value("SURVIVAL_TABLE") {
            self.table_name = v;
        }
        if let Some(v) = env_value("SURVIVAL_MODEL_PATH") {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = env_value("SURVIVAL_ARTIFACT_BUCKET") {
            self.artifact_bucket = Some(v);
        }
        if let Some(v) = env_value("SURVIVAL_ARTIFACT_ENDPOINT") {
            self.artifact_endpoint = v;
        }
        if let Some(v) = env_value("SURVIVAL_ARTIFACT_KEY") {
            self.artifact_key = v;
        }
        if let Some(v) = env_value("SURVIVAL_LOG_GROUP") {
            self.log_group = v;
        }
        if let Some(v) = env_value("SURVIVAL_LOG_STREAM") {
            self.log_stream = v;
        }
        if let Some(v) = env_value("SURVIVAL_ENVIRONMENT") {
            self.environment = v;
        }
        Ok(())
    }

    /// Check values that are interpolated into SQL or otherwise constrained
    pub fn validate(&self) -> Result<()> {
        if !is_valid_table_name(&self.table_name) {
            return Err(Error::Config(format!(
                "Invalid table name: {:?} (alphanumeric and underscore only)",
                self.table_name
            )));
        }
        Ok(())
    }
}

/// Validate table name to prevent SQL injection
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < 100
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Platform config file: `<config_dir>/survival/config.toml`
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("survival").join("config.toml"))
}
