mod cli;
mod config;
mod import;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::commands::import::handle_import_command;
use cli::commands::migrate::{MigrationIncomplete, handle_migrate_command};
use cli::commands::preview::handle_preview_command;
use cli::{Cli, Commands};
use config::ImportConfig;
use import::ImportError;

/// Exit codes beyond 0 (success) and 1 (configuration or usage error)
mod exit {
    pub const SOURCE: u8 = 2;
    pub const STORE: u8 = 3;
    pub const MIGRATION_INCOMPLETE: u8 = 4;
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("Command failed: {:?}", err);
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ImportConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Migrate(args) => handle_migrate_command(args, &config).await,
        Commands::Preview(args) => handle_preview_command(args, &config),
        Commands::Import(args) => handle_import_command(args, &config).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// `--help` and `--version` succeed; every other parse failure is a usage error
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(import_err) = cause.downcast_ref::<ImportError>() {
            return if import_err.is_source_error() {
                exit::SOURCE
            } else {
                exit::STORE
            };
        }
        if cause.downcast_ref::<MigrationIncomplete>().is_some() {
            return exit::MIGRATION_INCOMPLETE;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let source: anyhow::Error = ImportError::SourceNotFound(PathBuf::from("data4.xlsx")).into();
        assert_eq!(exit_code(&source), exit::SOURCE);

        let store: anyhow::Error = ImportError::StoreWrite {
            row: 7,
            detail: "disk I/O error".to_string(),
        }
        .into();
        assert_eq!(exit_code(&store.context("Import aborted")), exit::STORE);

        let migration: anyhow::Error = MigrationIncomplete(1).into();
        assert_eq!(exit_code(&migration), exit::MIGRATION_INCOMPLETE);

        assert_eq!(exit_code(&anyhow::anyhow!("bad config")), 1);
    }

    #[test]
    fn test_usage_errors_exit_with_one() {
        let missing_file = Cli::try_parse_from(["company-import", "import"]).unwrap_err();
        assert_eq!(usage_exit_code(&missing_file), 1);

        let unknown = Cli::try_parse_from(["company-import", "export"]).unwrap_err();
        assert_eq!(usage_exit_code(&unknown), 1);

        let help = Cli::try_parse_from(["company-import", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }
}
