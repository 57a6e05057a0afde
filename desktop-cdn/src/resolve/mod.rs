//! Request orchestration.
//!
//! [`DownloadResolver`] runs the full download flow: validate the request,
//! fill in platform and architecture, fetch the redirected manifest, and
//! select one artifact from it. It also resolves raw object paths for
//! auto-updaters that fetch manifests and installers by key.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use desktop_cdn::resolve::{DownloadRequest, DownloadResolver, ResolverOptions};
//! use desktop_cdn::storage::MemoryStore;
//!
//! let store = MemoryStore::new().with_object(
//!     "td-latest.json",
//!     r#"{"version": "1.0.0", "artifacts": {"nsis": {"x64": {"url": "https://dl.example/s.exe", "path": "app/s.exe"}}}}"#,
//! );
//! let resolver = DownloadResolver::new(Arc::new(store), ResolverOptions::default());
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let artifact = runtime
//!     .block_on(resolver.resolve(&DownloadRequest::new("Windows NT 10.0")))
//!     .unwrap();
//! assert_eq!(artifact.path, "app/s.exe");
//! ```

mod request;
mod resolver;

pub use request::{is_key_safe, DownloadRequest, ResolvedArtifact, ResolvedObject};
pub use resolver::{DownloadResolver, ResolverOptions, DEFAULT_ARCH_FALLBACKS};
