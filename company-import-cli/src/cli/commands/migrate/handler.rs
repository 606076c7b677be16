//! Migrate command handler

use anyhow::Result;
use colored::*;
use thiserror::Error;

use super::MigrateCommands;
use crate::config::ImportConfig;
use crate::config::repository::schema::{ColumnOutcome, add_missing_columns};
use crate::config::repository::{AccessMode, open_pool};

/// `--strict` was given and some columns could not be added
#[derive(Debug, Error)]
#[error("{0} column(s) could not be added")]
pub struct MigrationIncomplete(pub usize);

/// Handle the migrate command
pub async fn handle_migrate_command(args: MigrateCommands, config: &ImportConfig) -> Result<()> {
    let database = args.database.unwrap_or_else(|| config.database.clone());
    let pool = open_pool(&database, AccessMode::ReadWrite).await?;

    let outcomes = add_missing_columns(&pool, &config.table).await;
    pool.close().await;

    for (column, outcome) in &outcomes {
        let qualified = format!("{}.{}", config.table, column);
        match outcome {
            ColumnOutcome::Added => println!("{} {} added", "✓".green(), qualified.cyan()),
            ColumnOutcome::AlreadyPresent => {
                println!("{} {} already present", "•".dimmed(), qualified.cyan())
            }
            ColumnOutcome::Failed(detail) => {
                eprintln!("{} {} not added: {}", "✗".red(), qualified.cyan(), detail)
            }
        }
    }

    let failures = outcomes.iter().filter(|(_, o)| o.is_failure()).count();
    if args.strict && failures > 0 {
        return Err(MigrationIncomplete(failures).into());
    }
    Ok(())
}
