//! Redirection engine.
//!
//! Turns the key a client asked for into the key that should be served,
//! pinning "latest" and versioned manifests to concrete builds.

mod engine;
mod rules;

pub use engine::{apply_redirections, Redirection, MAX_RECURSION_LEVEL};
pub use rules::{used_redirection, RuleContext};
