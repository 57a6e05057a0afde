//! desktop-cdn CLI - Command-line interface
//!
//! Resolves installer downloads and update feed paths against a configured
//! bucket, and manages the configuration file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use desktop_cdn::config::{config_file_path, ConfigFile};
use desktop_cdn::logging::init_logging;

use commands::config::ConfigCommands;
use commands::detect::DetectArgs;
use commands::manifest_name::ManifestNameArgs;
use commands::object::ObjectArgs;
use commands::resolve::ResolveArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "desktop-cdn", version, about = "Desktop installer and update feed resolver")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a download request to an artifact
    Resolve(ResolveArgs),

    /// Resolve a raw object path through redirections
    Object(ObjectArgs),

    /// Show what a user-agent is detected as
    Detect(DetectArgs),

    /// Print the manifest filename for a platform and build
    ManifestName(ManifestNameArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Resolved configuration shared by commands.
pub struct Context {
    pub config: ConfigFile,
    pub config_path: PathBuf,
}

impl Context {
    /// Load `path`, or the default config file. Only a missing file falls
    /// back to defaults.
    fn load(path: Option<PathBuf>) -> Result<Self, CliError> {
        let config_path = path.unwrap_or_else(config_file_path);
        Ok(Self {
            config: ConfigFile::load_from(&config_path)?,
            config_path,
        })
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", console::style("error:").red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let context = Context::load(cli.config)?;

    let mut logging = context.config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    let _guard = init_logging(&logging);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &context).await,
        Commands::Object(args) => commands::object::run(args, &context).await,
        Commands::Detect(args) => commands::detect::run(args),
        Commands::ManifestName(args) => commands::manifest_name::run(args),
        Commands::Config(command) => commands::config::run(command, &context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        let context = Context::load(Some(path.clone())).unwrap();
        assert_eq!(context.config, ConfigFile::default());
        assert_eq!(context.config_path, path);
    }

    #[test]
    fn test_context_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[storage]\nbackend = s3\n").unwrap();

        let err = Context::load(Some(path)).err().unwrap();
        assert!(matches!(err, CliError::ConfigFile(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
