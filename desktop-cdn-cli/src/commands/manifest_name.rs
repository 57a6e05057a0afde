//! `manifest-name` command: print the manifest filename for a request.

use clap::Args;
use desktop_cdn::path::{manifest_filename, ManifestName};
use desktop_cdn::platform::PlatformName;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ManifestNameArgs {
    /// Target platform: linux, mac or windows
    #[arg(long)]
    pub platform: String,

    /// App version
    #[arg(long)]
    pub app_version: Option<String>,

    /// Build ID
    #[arg(long)]
    pub build_id: Option<String>,

    /// Release channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Name the electron-builder feed (.yml) instead of the custom manifest
    #[arg(long)]
    pub electron_builder: bool,
}

/// Run the manifest-name command.
pub fn run(args: ManifestNameArgs) -> Result<(), CliError> {
    println!("{}", filename(&args)?);
    Ok(())
}

fn filename(args: &ManifestNameArgs) -> Result<String, CliError> {
    let platform: PlatformName = args.platform.parse().map_err(CliError::Config)?;

    let name = if args.electron_builder {
        ManifestName::electron_builder(platform)
    } else {
        ManifestName::custom(platform)
    };

    Ok(manifest_filename(
        &name
            .with_app_version(args.app_version.as_deref())
            .with_build_id(args.build_id.as_deref())
            .with_channel(args.channel.as_deref()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(platform: &str) -> ManifestNameArgs {
        ManifestNameArgs {
            platform: platform.to_string(),
            app_version: None,
            build_id: None,
            channel: None,
            electron_builder: false,
        }
    }

    #[test]
    fn test_custom_manifest_name() {
        assert_eq!(filename(&args("windows")).unwrap(), "td-latest.json");
    }

    #[test]
    fn test_electron_builder_name() {
        let args = ManifestNameArgs {
            build_id: Some("b1".into()),
            electron_builder: true,
            ..args("mac")
        };
        assert_eq!(filename(&args).unwrap(), "latest-mac-build-b1.yml");
    }

    #[test]
    fn test_unknown_platform() {
        let err = filename(&args("amiga")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported platform (amiga)");
    }
}
