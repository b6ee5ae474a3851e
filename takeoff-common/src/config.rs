//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the SQLite database file inside the root folder
pub const DATABASE_FILE: &str = "takeoff.db";

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "TAKEOFF_ROOT_FOLDER";

/// Environment variable carrying the Gemini API key
pub const API_KEY_ENV: &str = "TAKEOFF_GEMINI_API_KEY";

/// Optional TOML configuration file (`~/.config/takeoff/config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding takeoff.db
    pub root_folder: Option<String>,
    /// Gemini API key (the environment variable takes priority)
    pub gemini_api_key: Option<String>,
}

impl TomlConfig {
    /// Load the platform config file if present.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Default configuration file path for the platform
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("takeoff").join("config.toml"))
}

/// Resolve the root folder, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `TAKEOFF_ROOT_FOLDER` environment variable
/// 3. TOML config file `root_folder` key
/// 4. OS-dependent data directory (fallback)
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
        return PathBuf::from(path);
    }

    default_root_folder()
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("takeoff"))
        .unwrap_or_else(|| PathBuf::from("./takeoff_data"))
}

/// Ensure the root folder exists and return the database path inside it
pub fn prepare_root_folder(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    Ok(root.join(DATABASE_FILE))
}

/// Resolve the Gemini API key: environment variable first, then TOML config.
///
/// Startup fails when neither source provides a key; the key is never
/// embedded in the binary or the repository.
pub fn resolve_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .gemini_api_key
        .clone()
        .filter(|k| is_valid_key(k));

    // Warn if multiple sources (potential misconfiguration)
    if env_key.is_some() && toml_key.is_some() {
        tracing::warn!(
            "Gemini API key found in both environment and TOML config. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        tracing::info!("Gemini API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        tracing::info!("Gemini API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(format!(
        "Gemini API key not configured. Provide one via:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: ~/.config/takeoff/config.toml (gemini_api_key = \"your-key\")\n\
         \n\
         Obtain an API key at: https://aistudio.google.com/apikey",
        API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
