//! Configuration management CLI commands.
//!
//! `config get`, `config set`, `config list` and `config path`. `list`
//! prints the effective settings as INI.

use std::path::Path;

use clap::Subcommand;
use desktop_cdn::config::{ConfigFile, ConfigKey};

use crate::error::CliError;
use crate::Context;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., storage.backend)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., storage.backend)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, context: &Context) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, &context.config),
        ConfigCommands::Set { key, value } => run_set(&key, &value, &context.config_path),
        ConfigCommands::List => run_list(&context.config),
        ConfigCommands::Path => run_path(&context.config_path),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'desktop-cdn config list' to see available keys.",
            key
        ))
    })
}

/// Get a configuration value.
fn run_get(key: &str, config: &ConfigFile) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let value = config_key.get(config);

    if value.is_empty() {
        println!("(not set)");
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Set a configuration value.
fn run_set(key: &str, value: &str, path: &Path) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load_from(path)?;
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(path)?;

    println!("Set {} = {}", config_key.name(), value);

    Ok(())
}

/// List all configuration settings.
fn run_list(config: &ConfigFile) -> Result<(), CliError> {
    print!("{}", render_settings(config));
    Ok(())
}

/// Every setting in INI form, one block per section.
fn render_settings(config: &ConfigFile) -> String {
    ConfigKey::all()
        .chunk_by(|a, b| a.section() == b.section())
        .map(|keys| {
            let mut block = format!("[{}]\n", keys[0].section());
            for key in keys {
                let value = key.get(config);
                if value.is_empty() {
                    block.push_str(&format!("{} =\n", key.key_name()));
                } else {
                    block.push_str(&format!("{} = {}\n", key.key_name(), value));
                }
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show the configuration file path.
fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        run_set("resolver.channel", "beta", &path).unwrap();
        run_set("storage.timeout_secs", "10", &path).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.resolver.channel, "beta");
        assert_eq!(config.storage.timeout_secs, 10);
    }

    #[test]
    fn test_settings_render_as_ini() {
        let rendered = render_settings(&ConfigFile::default());

        assert!(rendered.starts_with("[storage]\nbackend = disk\n"));
        assert!(rendered.contains("base_url =\n"));
        assert!(rendered.contains("\n\n[resolver]\nchannel = latest\n"));
        assert!(rendered.contains("windows = nsis-web, nsis, msi, appx\n"));
        assert_eq!(rendered.matches('[').count(), 4);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        assert!(matches!(
            run_set("storage.bucket", "x", &path),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            run_set("storage.backend", "ftp", &path),
            Err(CliError::Config(_))
        ));
        assert!(!path.exists());
    }
}
