//! Addressable configuration keys.
//!
//! Every setting of [`ConfigFile`] is reachable as `section.key`, which is
//! what the `config get`/`config set` commands accept.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigFile, ConfigFileError, StorageBackend};

/// A `section.key` configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    StorageBackend,
    StorageDirectory,
    StorageBaseUrl,
    StorageTimeoutSecs,
    ResolverChannel,
    ArtifactsLinux,
    ArtifactsMacUniversal,
    ArtifactsMac,
    ArtifactsWindows,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            Self::StorageBackend,
            Self::StorageDirectory,
            Self::StorageBaseUrl,
            Self::StorageTimeoutSecs,
            Self::ResolverChannel,
            Self::ArtifactsLinux,
            Self::ArtifactsMacUniversal,
            Self::ArtifactsMac,
            Self::ArtifactsWindows,
            Self::LoggingLevel,
            Self::LoggingDirectory,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StorageBackend => "storage.backend",
            Self::StorageDirectory => "storage.directory",
            Self::StorageBaseUrl => "storage.base_url",
            Self::StorageTimeoutSecs => "storage.timeout_secs",
            Self::ResolverChannel => "resolver.channel",
            Self::ArtifactsLinux => "artifacts.linux",
            Self::ArtifactsMacUniversal => "artifacts.mac_universal",
            Self::ArtifactsMac => "artifacts.mac",
            Self::ArtifactsWindows => "artifacts.windows",
            Self::LoggingLevel => "logging.level",
            Self::LoggingDirectory => "logging.directory",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        self.split().0
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or((name, ""))
    }

    /// Current value as written in the file. Unset values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            Self::StorageBackend => config.storage.backend.to_string(),
            Self::StorageDirectory => config.storage.directory.to_string_lossy().into_owned(),
            Self::StorageBaseUrl => config.storage.base_url.clone().unwrap_or_default(),
            Self::StorageTimeoutSecs => config.storage.timeout_secs.to_string(),
            Self::ResolverChannel => config.resolver.channel.clone(),
            Self::ArtifactsLinux => config.artifacts.linux.join(", "),
            Self::ArtifactsMacUniversal => config.artifacts.mac_universal.join(", "),
            Self::ArtifactsMac => config.artifacts.mac.join(", "),
            Self::ArtifactsWindows => config.artifacts.windows.join(", "),
            Self::LoggingLevel => config.logging.level.clone(),
            Self::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Validate and apply a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigFileError> {
        let value = value.trim();
        match self {
            Self::StorageBackend => {
                config.storage.backend = value
                    .parse::<StorageBackend>()
                    .map_err(|reason| self.invalid(value, reason))?;
            }
            Self::StorageDirectory => {
                config.storage.directory = PathBuf::from(self.non_empty(value)?);
            }
            Self::StorageBaseUrl => {
                config.storage.base_url = optional(value).map(str::to_string);
            }
            Self::StorageTimeoutSecs => {
                config.storage.timeout_secs = match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => return Err(self.invalid(value, "expected a positive integer")),
                };
            }
            Self::ResolverChannel => {
                config.resolver.channel = self.non_empty(value)?.to_string();
            }
            Self::ArtifactsLinux => config.artifacts.linux = self.list(value)?,
            Self::ArtifactsMacUniversal => config.artifacts.mac_universal = self.list(value)?,
            Self::ArtifactsMac => config.artifacts.mac = self.list(value)?,
            Self::ArtifactsWindows => config.artifacts.windows = self.list(value)?,
            Self::LoggingLevel => {
                config.logging.level = self.non_empty(value)?.to_string();
            }
            Self::LoggingDirectory => {
                config.logging.directory = optional(value).map(PathBuf::from);
            }
        }
        Ok(())
    }

    fn non_empty<'v>(&self, value: &'v str) -> Result<&'v str, ConfigFileError> {
        optional(value).ok_or_else(|| self.invalid(value, "value must not be empty"))
    }

    fn list(&self, value: &str) -> Result<Vec<String>, ConfigFileError> {
        let kinds: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .map(str::to_string)
            .collect();
        if kinds.is_empty() {
            return Err(self.invalid(value, "expected a comma-separated list of artifact kinds"));
        }
        Ok(kinds)
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

fn optional(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigFileError::UnknownKey(s.to_string()))
    }
}
