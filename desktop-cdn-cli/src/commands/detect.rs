//! `detect` command: show how a user-agent is classified.

use clap::Args;
use console::style;
use desktop_cdn::platform::{detect_os, resolve_mac_arch, resolve_platform, PlatformName};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// User-agent string to classify
    pub user_agent: String,
}

/// Run the detect command.
pub fn run(args: DetectArgs) -> Result<(), CliError> {
    let ua = args.user_agent.as_str();

    match detect_os(ua) {
        Some(os) => println!("  detected: {}", style(os).green()),
        None => println!("  detected: {}", style("(none)").yellow()),
    }

    let platform = resolve_platform(None, ua);
    println!("  platform: {}", platform);

    if platform == PlatformName::Mac {
        let mac = resolve_mac_arch(ua);
        println!("  arch:     {}", mac.arch);
        println!(
            "  universal installer: {}",
            if mac.universal_installer_supported {
                "supported"
            } else {
                "not supported"
            }
        );
    }
    Ok(())
}
