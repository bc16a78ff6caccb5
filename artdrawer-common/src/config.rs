//! Bootstrap configuration loading and root folder resolution
//!
//! The TOML file carries bootstrap concerns only: where data lives, which port to bind,
//! log level, and provider credentials. A missing file is not an error; every field has
//! a built-in default.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "ARTDRAWER_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "artdrawer.db";

/// Default HTTP port for the discovery service
pub const DEFAULT_PORT: u16 = 5790;

/// Bootstrap configuration loaded from `artdrawer.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Folder holding the local database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Remote document store; absent means local-only persistence
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Web/image search provider credentials
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Programmable search engine id (`cx`)
    #[serde(default)]
    pub engine_id: Option<String>,
}

/// Generative enrichment provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model used for structured profile enrichment
    #[serde(default = "default_profile_model")]
    pub profile_model: String,
    /// Model used for the free-text historian chat
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            profile_model: default_profile_model(),
            chat_model: default_chat_model(),
        }
    }
}

/// Remote per-user document store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base URL; documents live at `<base_url>/users/<uid>`
    pub base_url: String,
    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_profile_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

impl TomlConfig {
    /// Effective port (TOML value or [`DEFAULT_PORT`])
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Load TOML config from `path`
///
/// A missing file yields defaults with a warning; a malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write TOML config atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Default config file path: `<config_dir>/artdrawer/artdrawer.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("artdrawer").join("artdrawer.toml"))
        .unwrap_or_else(|| PathBuf::from("artdrawer.toml"))
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `ARTDRAWER_ROOT_FOLDER` environment variable
/// 3. TOML `root_folder`
/// 4. OS-dependent default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("artdrawer"))
        .unwrap_or_else(|| PathBuf::from("./artdrawer_data"))
}

/// Ensures the root folder exists and locates files inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }
}
