//! `import` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_import_command;

#[derive(Args, Debug)]
pub struct ImportCommands {
    /// Workbook to import (.xlsx, .xls, .xlsb, .ods)
    pub file: PathBuf,

    /// SQLite database holding the company table
    #[arg(long, env = "COMPANY_IMPORT_DATABASE", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Sheet to read instead of the first one
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Check every row against the database without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
