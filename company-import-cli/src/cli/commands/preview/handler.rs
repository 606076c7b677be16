//! Preview command handler
//!
//! Read-only look at a workbook: header labels, how the configured header
//! map applies to them, and the first few data rows.

use anyhow::Result;
use colored::*;

use super::PreviewCommands;
use crate::config::ImportConfig;
use crate::import::{CellValue, Field, HeaderMap, load_sheet};

/// Handle the preview command
pub fn handle_preview_command(args: PreviewCommands, config: &ImportConfig) -> Result<()> {
    let sheet = args.sheet.or_else(|| config.sheet.clone());
    let source = load_sheet(&args.file, sheet.as_deref())?;

    println!(
        "{} {} (sheet '{}', {} data rows)",
        "Workbook:".bold(),
        args.file.display().to_string().cyan(),
        source.sheet_name,
        source.data_row_count()
    );

    println!("{}", "Headers:".bold());
    for (idx, (header, field)) in source
        .headers
        .iter()
        .zip(column_fields(&source.headers, &config.headers))
        .enumerate()
    {
        match field {
            Some(field) => println!("  {:>2}. {} -> {}", idx + 1, header, field.to_string().green()),
            None => println!("  {:>2}. {} {}", idx + 1, header, "(ignored)".dimmed()),
        }
    }

    let missing = missing_labels(&source.headers, &config.headers);
    if !missing.is_empty() {
        println!("{} {}", "Not in sheet:".yellow(), missing.join(", "));
    }

    for (idx, row) in source.rows().take(args.rows).enumerate() {
        let label = format!("Row {}:", source.sheet_row(idx));
        println!("{} {}", label.bold(), format_row(&row));
    }
    let remaining = source.data_row_count().saturating_sub(args.rows);
    if remaining > 0 {
        println!("{}", format!("... {} more rows", remaining).dimmed());
    }

    Ok(())
}

/// Field each sheet column feeds, following the first-occurrence rule of the import
fn column_fields(headers: &[String], header_map: &HeaderMap) -> Vec<Option<Field>> {
    let mut fields = vec![None; headers.len()];
    for (label, field) in header_map {
        if let Some(col) = headers.iter().position(|h| h == label.trim()) {
            fields[col] = Some(*field);
        }
    }
    fields
}

/// Configured labels that no sheet column carries
fn missing_labels<'a>(headers: &[String], header_map: &'a HeaderMap) -> Vec<&'a str> {
    header_map
        .keys()
        .map(String::as_str)
        .filter(|label| !headers.iter().any(|h| h == label.trim()))
        .collect()
}

fn format_row(row: &[CellValue]) -> String {
    row.iter()
        .map(|cell| match cell {
            CellValue::Null => "-".to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
