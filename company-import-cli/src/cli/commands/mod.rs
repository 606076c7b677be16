//! Subcommand arguments and handlers

pub mod import;
pub mod migrate;
pub mod preview;
