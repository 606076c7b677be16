//! `migrate` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::{MigrationIncomplete, handle_migrate_command};

#[derive(Args, Debug)]
pub struct MigrateCommands {
    /// SQLite database holding the company table
    #[arg(long, env = "COMPANY_IMPORT_DATABASE", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Exit with an error if a column could not be added
    #[arg(long)]
    pub strict: bool,
}
