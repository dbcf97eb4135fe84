use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod window_state;

pub use window_state::{WindowGeometry, WindowState, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "stoat-desktop";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to write app config: {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize app config")]
    Serialize(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Application-level preferences from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub minimise_to_tray: bool,
    pub hardware_acceleration: bool,
    pub window_state: WindowState,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            minimise_to_tray: false,
            hardware_acceleration: true,
            window_state: WindowState::default(),
        }
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub fn save_app_config(config: &AppConfig) -> ConfigResult<()> {
    let (xdg_config_home, home) = config_env_dirs();
    save_app_config_with(config, xdg_config_home.as_deref(), home.as_deref())
}

fn save_app_config_with(
    config: &AppConfig,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<()> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home).map_err(
        |error| match error {
            ConfigPathError::MissingHomeDirectory => ConfigError::MissingHomeDirectory,
        },
    )?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
    }
    let serialized = serde_json::to_string_pretty(config)?;
    fs::write(&path, serialized).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
