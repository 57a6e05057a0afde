//! `object` command: resolve a raw object path the way auto-updaters
//! request it.

use clap::Args;
use console::style;
use desktop_cdn::path::make_download_filename;
use desktop_cdn::resolve::DownloadResolver;

use crate::error::CliError;
use crate::Context;

#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Object path (e.g., 210203cqcj00tw1/latest-mac.yml)
    pub path: String,

    /// Client IP for IP-gated redirection rules
    #[arg(long)]
    pub client_ip: Option<String>,
}

/// Run the object command.
pub async fn run(args: ObjectArgs, context: &Context) -> Result<(), CliError> {
    let store = context.config.storage.build_store()?;
    let resolver = DownloadResolver::new(store, context.config.resolver_options());

    let object = resolver
        .resolve_object_path(&args.path, args.client_ip.as_deref())
        .await?;

    println!("  key:      {}", style(&object.key).green());
    println!("  size:     {} bytes", object.size);
    println!(
        "  filename: {}",
        make_download_filename(&object.key, false, None)
    );
    Ok(())
}
