//! Platform and architecture resolution for download requests.
//!
//! Fills in the identity fields a client did not supply: the operating
//! system family (from an explicit argument or the user-agent) and the CPU
//! architecture, including whether a Mac may receive the universal
//! installer.

mod arch;
mod detect;
mod types;

pub use arch::{detect_mac_arch_eligibility, parse_arch, resolve_mac_arch, MacArch};
pub use detect::{detect_os, resolve_platform};
pub use types::{Arch, PlatformName};
