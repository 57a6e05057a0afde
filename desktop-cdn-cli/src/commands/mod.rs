//! CLI subcommands.

pub mod config;
pub mod detect;
pub mod manifest_name;
pub mod object;
pub mod resolve;
