//! `preview` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_preview_command;

#[derive(Args, Debug)]
pub struct PreviewCommands {
    /// Workbook to inspect
    pub file: PathBuf,

    /// Number of data rows to print
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Sheet to read instead of the first one
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,
}
