//! Import command handler

use anyhow::Result;
use colored::*;

use super::ImportCommands;
use crate::config::ImportConfig;
use crate::config::repository::companies::count_companies;
use crate::config::repository::{AccessMode, open_pool};
use crate::import::{ImportSummary, RowOutcome, run_import};

/// Handle the import command
pub async fn handle_import_command(args: ImportCommands, config: &ImportConfig) -> Result<()> {
    let mut config = config.clone();
    if args.sheet.is_some() {
        config.sheet = args.sheet;
    }
    let database = args.database.unwrap_or_else(|| config.database.clone());

    println!(
        "{} {} into {} ({}){}",
        "Importing".bold(),
        args.file.display().to_string().cyan(),
        database.display().to_string().cyan(),
        config.table,
        if args.dry_run { " [dry run]".yellow().to_string() } else { String::new() }
    );

    let mode = if args.dry_run {
        AccessMode::ReadOnly
    } else {
        AccessMode::ReadWrite
    };
    let pool = open_pool(&database, mode).await?;

    let result = run_import(&pool, &args.file, &config, args.dry_run, print_row_outcome).await;
    let total = match &result {
        Ok(_) => count_companies(&pool, &config.table).await.ok(),
        Err(_) => None,
    };
    pool.close().await;

    let summary = result?;
    print_summary(&summary);
    if let Some(total) = total {
        println!("{} now holds {} rows", config.table, total);
    }
    Ok(())
}

fn print_row_outcome(outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Skipped(skipped) => println!(
            "{} row {}: {} / {} ({})",
            "Skipped".yellow(),
            skipped.row,
            skipped.name.as_deref().unwrap_or("(no name)"),
            skipped.code.as_deref().unwrap_or("(no code)"),
            skipped.reason
        ),
        RowOutcome::Blank { row } => println!("{}", format!("Blank row {} ignored", row).dimmed()),
        RowOutcome::Inserted { row, name, code } => log::info!(
            "Row {}: {} / {}",
            row,
            name.as_deref().unwrap_or("(no name)"),
            code.as_deref().unwrap_or("(no code)")
        ),
    }
}

fn print_summary(summary: &ImportSummary) {
    let counts = format!(
        "{} skipped, {} blank, {} rows processed",
        summary.skipped.len(),
        summary.blank,
        summary.processed()
    );
    if summary.dry_run {
        println!(
            "{} {} would be inserted, {}",
            "Dry run complete:".green().bold(),
            summary.inserted,
            counts
        );
    } else {
        println!(
            "{} {} inserted, {}",
            "Import complete:".green().bold(),
            summary.inserted,
            counts
        );
    }
}
