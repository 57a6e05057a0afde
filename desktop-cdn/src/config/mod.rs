//! Configuration file handling.
//!
//! ```ini
//! [storage]
//! backend = disk
//! directory = ./bucket
//! base_url =
//! timeout_secs = 30
//!
//! [resolver]
//! channel = latest
//!
//! [artifacts]
//! linux = appImage, deb, rpm, snap
//! mac_universal = installer, dmg, zip, mas
//! mac = dmg, zip, pkg
//! windows = nsis-web, nsis, msi, appx
//!
//! [logging]
//! level = info
//! directory =
//! ```

mod file;
mod keys;

pub use file::{
    config_file_path, ConfigFile, ConfigFileError, LoggingConfig, ResolverConfig, StorageBackend,
    StorageConfig,
};
pub use keys::ConfigKey;
