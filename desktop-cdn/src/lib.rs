//! desktop-cdn - Installer and update manifest resolution
//!
//! This library resolves "give me the right installer" requests for a
//! desktop application distribution service. Clients supply whatever they
//! know (a build ID, a version, a user-agent, an explicit platform or
//! architecture) and the resolver turns it into one manifest and one
//! artifact variant, applying the app's redirection rules along the way.
//!
//! # Architecture
//!
//! ```text
//! DownloadRequest
//!       │
//!       ▼
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ platform │──▶│ manifest │──▶│ artifact │──▶│ Resolved │
//! │ + arch   │   │  fetch   │   │ select   │   │ Artifact │
//! └──────────┘   └────┬─────┘   └──────────┘   └──────────┘
//!                     │
//!              ┌──────┴──────┐
//!              │  redirect   │◀── registry (desktop-releases.json,
//!              │  + path     │              desktop-builds.json)
//!              └──────┬──────┘
//!                     ▼
//!               ObjectStore (memory / disk / http)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use desktop_cdn::config::{config_file_path, ConfigFile};
//! use desktop_cdn::resolve::{DownloadRequest, DownloadResolver};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigFile::load_from(&config_file_path())?;
//! let store = config.storage.build_store()?;
//! let resolver = DownloadResolver::new(store, config.resolver_options());
//!
//! let request = DownloadRequest::new("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_1)");
//! let artifact = resolver.resolve(&request).await?;
//! println!("{} -> {}", artifact.path, artifact.url);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod path;
pub mod platform;
pub mod redirect;
pub mod registry;
pub mod resolve;
pub mod storage;

pub use error::{ResolveError, ResolveResult};
pub use resolve::{DownloadRequest, DownloadResolver, ResolvedArtifact, ResolverOptions};
