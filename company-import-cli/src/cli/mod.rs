//! Command-line interface definitions

pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use commands::import::ImportCommands;
use commands::migrate::MigrateCommands;
use commands::preview::PreviewCommands;

#[derive(Parser, Debug)]
#[command(
    name = "company-import",
    version,
    about = "Import company records from a spreadsheet into the procurement database"
)]
pub struct Cli {
    /// Settings file (default: <config dir>/company-import/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add the tax_office and tax_number columns if they are missing
    Migrate(MigrateCommands),
    /// Print the header row and the first data rows of a workbook
    Preview(PreviewCommands),
    /// Import the rows of a workbook into the company table
    Import(ImportCommands),
}
