//! INI configuration file.
//!
//! Loaded from `~/.config/desktop-cdn/config.ini` by default. A missing file
//! yields the defaults; a key missing from a section yields its default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::artifact::ArtifactPriorities;
use crate::path::DEFAULT_CHANNEL;
use crate::resolve::ResolverOptions;
use crate::storage::{DiskStore, HttpStore, ObjectStore, StorageError, DEFAULT_TIMEOUT_SECS};

/// Errors reading, writing or applying the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("storage.base_url is required for the http backend")]
    MissingBaseUrl,

    #[error("Failed to open storage: {0}")]
    Storage(#[from] StorageError),
}

/// Which object store backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Disk,
    Http,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disk => "disk",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disk" => Ok(Self::Disk),
            "http" => Ok(Self::Http),
            other => Err(format!("expected disk or http, got '{}'", other)),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory of the disk backend.
    pub directory: PathBuf,
    /// Base URL of the http backend.
    pub base_url: Option<String>,
    /// Per-request timeout of the http backend.
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Disk,
            directory: PathBuf::from("./bucket"),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl StorageConfig {
    /// Open the configured object store.
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>, ConfigFileError> {
        let store: Arc<dyn ObjectStore> = match self.backend {
            StorageBackend::Disk => {
                let store = DiskStore::new(self.directory.clone());
                debug!(root = %store.root().display(), "Opening disk store");
                Arc::new(store)
            }
            StorageBackend::Http => {
                let base_url = self
                    .base_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .ok_or(ConfigFileError::MissingBaseUrl)?;
                debug!(base_url = base_url, timeout_secs = self.timeout_secs, "Opening http store");
                Arc::new(HttpStore::with_timeout(
                    base_url,
                    Duration::from_secs(self.timeout_secs),
                )?)
            }
        };
        Ok(store)
    }
}

/// `[resolver]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Channel used when a request does not name one.
    pub channel: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for daily rolling log files; stderr only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub storage: StorageConfig,
    pub resolver: ResolverConfig,
    /// `[artifacts]` section.
    pub artifacts: ArtifactPriorities,
    pub logging: LoggingConfig,
}

/// Default configuration file location.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("desktop-cdn")
        .join("config.ini")
}

impl ConfigFile {
    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Save to a specific file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigFileError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigFileError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Resolver options derived from the `[resolver]` and `[artifacts]`
    /// sections.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions::default()
            .with_channel(self.resolver.channel.clone())
            .with_priorities(self.artifacts.clone())
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();
        for key in super::ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in super::ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }
}
