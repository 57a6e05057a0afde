//! `resolve` command: run the download flow for one request.

use clap::Args;
use console::style;
use desktop_cdn::resolve::{DownloadRequest, DownloadResolver, ResolvedArtifact};

use crate::error::CliError;
use crate::Context;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Pin to an app version (e.g., 2.0.0)
    #[arg(long)]
    pub app_version: Option<String>,

    /// Pin to a build ID
    #[arg(long)]
    pub build_id: Option<String>,

    /// Target platform: linux, mac or windows
    #[arg(long)]
    pub platform: Option<String>,

    /// Artifact kind (e.g., dmg, nsis-web, appImage)
    #[arg(long)]
    pub artifact_name: Option<String>,

    /// Architecture: ia32, x64, arm64 or universal
    #[arg(long)]
    pub arch: Option<String>,

    /// User-agent to detect platform and architecture from
    #[arg(long, default_value = "")]
    pub user_agent: String,

    /// Release channel (defaults to resolver.channel)
    #[arg(long)]
    pub channel: Option<String>,

    /// Client IP for IP-gated redirection rules
    #[arg(long)]
    pub client_ip: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    fn to_request(&self) -> DownloadRequest {
        DownloadRequest {
            app_version: self.app_version.clone(),
            build_id: self.build_id.clone(),
            platform: self.platform.clone(),
            arch: self.arch.clone(),
            artifact_name: self.artifact_name.clone(),
            user_agent: self.user_agent.clone(),
            channel: self.channel.clone(),
            client_ip: self.client_ip.clone(),
        }
    }
}

/// Run the resolve command.
pub async fn run(args: ResolveArgs, context: &Context) -> Result<(), CliError> {
    let store = context.config.storage.build_store()?;
    let resolver = DownloadResolver::new(store, context.config.resolver_options());

    let artifact = resolver.resolve(&args.to_request()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        print_artifact(&artifact);
    }
    Ok(())
}

fn print_artifact(artifact: &ResolvedArtifact) {
    println!("{}", style("Resolved artifact").bold());
    println!("  path:     {}", style(&artifact.path).green());
    println!("  url:      {}", artifact.url);
    println!("  platform: {}", artifact.platform);
    println!("  arch:     {}", artifact.arch);
    if let Some(version) = &artifact.version {
        println!("  version:  {}", version);
    }
    if let Some(created_at) = &artifact.created_at {
        println!("  created:  {}", created_at);
    }
    if let Some(size) = artifact.size {
        println!("  size:     {} bytes", size);
    }
    if let Some(sha256) = &artifact.sha256 {
        println!("  sha256:   {}", sha256);
    }
    if let Some(md5) = &artifact.md5 {
        println!("  md5:      {}", md5);
    }
}
