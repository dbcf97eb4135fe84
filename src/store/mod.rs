use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{app_config_path, config_env_dirs, ConfigPathError, APP_DIR};
use crate::server::ServerOrigin;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read server settings: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write server settings: {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse server settings")]
    Parse(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persists the single chosen server origin across restarts.
pub trait OriginStore {
    fn get(&self) -> StoreResult<Option<ServerOrigin>>;
    fn set(&mut self, origin: &ServerOrigin) -> StoreResult<()>;
    fn clear(&mut self) -> StoreResult<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ServerSettings {
    #[serde(rename = "serverUrl", default, skip_serializing_if = "Option::is_none")]
    server_url: Option<String>,
}

/// Origin store backed by `settings.json` in the app config directory.
#[derive(Debug, Clone)]
pub struct FileOriginStore {
    path: PathBuf,
}

impl FileOriginStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_default_path() -> StoreResult<Self> {
        let (xdg_config_home, home) = config_env_dirs();
        Self::with_config_dirs(xdg_config_home.as_deref(), home.as_deref())
    }

    fn with_config_dirs(xdg_config_home: Option<&Path>, home: Option<&Path>) -> StoreResult<Self> {
        let path = app_config_path(APP_DIR, SETTINGS_FILE, xdg_config_home, home).map_err(
            |error| match error {
                ConfigPathError::MissingHomeDirectory => StoreError::MissingHomeDirectory,
            },
        )?;
        Ok(Self::with_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_settings(&self) -> StoreResult<ServerSettings> {
        if !self.path.exists() {
            return Ok(ServerSettings::default());
        }
        let serialized = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&serialized)?)
    }

    fn write_settings(&self, settings: &ServerSettings) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let serialized = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, serialized).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl OriginStore for FileOriginStore {
    fn get(&self) -> StoreResult<Option<ServerOrigin>> {
        let settings = self.read_settings()?;
        let Some(raw) = settings.server_url else {
            return Ok(None);
        };
        match ServerOrigin::parse(&raw) {
            Ok(origin) => Ok(Some(origin)),
            Err(err) => {
                tracing::warn!(?err, path = %self.path.display(), "ignoring unparsable stored server origin");
                Ok(None)
            }
        }
    }

    fn set(&mut self, origin: &ServerOrigin) -> StoreResult<()> {
        tracing::debug!(origin = %origin, path = %self.path.display(), "persisting server origin");
        self.write_settings(&ServerSettings {
            server_url: Some(origin.as_str()),
        })
    }

    fn clear(&mut self) -> StoreResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        tracing::debug!(path = %self.path.display(), "clearing server origin");
        self.write_settings(&ServerSettings::default())
    }
}

/// Non-persistent store for tests and embedders that keep no settings file.
#[derive(Debug, Clone, Default)]
pub struct MemoryOriginStore {
    origin: Option<ServerOrigin>,
}

impl MemoryOriginStore {
    pub fn with_origin(origin: ServerOrigin) -> Self {
        Self {
            origin: Some(origin),
        }
    }
}

impl OriginStore for MemoryOriginStore {
    fn get(&self) -> StoreResult<Option<ServerOrigin>> {
        Ok(self.origin.clone())
    }

    fn set(&mut self, origin: &ServerOrigin) -> StoreResult<()> {
        self.origin = Some(origin.clone());
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.origin = None;
        Ok(())
    }
}
