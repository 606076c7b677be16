//! Sheet to company table, one row at a time
//!
//! Each data row is mapped, defaulted and given a code, then checked against
//! the store and inserted unless a row with the same name or code exists.
//! Every insert commits on its own: an aborted run keeps what it inserted.
//!
//! The check and the insert are separate statements, so two concurrent runs
//! against one database can both insert the same name. Run one import at a
//! time, or put UNIQUE constraints on `name`/`code`; a constraint rejection
//! is reported as a skipped duplicate.

use std::collections::HashSet;
use std::path::Path;

use sqlx::SqlitePool;

use super::error::ImportError;
use super::reader::{SheetSource, load_sheet};
use super::record::{apply_defaults, assign_code, map_row};
use super::value::CellValue;
use crate::config::ImportConfig;
use crate::config::repository::companies::{InsertOutcome, exists_conflict, insert_company};

/// Timestamp format of `created_at`/`updated_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Why a row was not inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The store already holds a row with this name or code
    AlreadyExists,
    /// The store's uniqueness constraint refused the insert
    RejectedByStore(String),
    /// An earlier row of the same dry run would have inserted this name or code
    DuplicateInRun,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyExists => write!(f, "name or code already exists"),
            SkipReason::RejectedByStore(msg) => write!(f, "rejected by store: {}", msg),
            SkipReason::DuplicateInRun => write!(f, "duplicate of an earlier row"),
        }
    }
}

/// A row that was not inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based sheet row as the spreadsheet shows it
    pub row: usize,
    pub name: Option<String>,
    pub code: Option<String>,
    pub reason: SkipReason,
}

/// What happened to one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Written to the store, or would be in a dry run
    Inserted {
        row: usize,
        name: Option<String>,
        code: Option<String>,
    },
    Skipped(SkippedRow),
    /// Every cell empty; the row still used up its code ordinal
    Blank { row: usize },
}

/// Totals of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows inserted; in a dry run, rows that would have been inserted
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
    pub blank: usize,
    pub dry_run: bool,
}

impl ImportSummary {
    /// Data rows seen, blank ones included
    pub fn processed(&self) -> usize {
        self.inserted + self.skipped.len() + self.blank
    }
}

/// Load the workbook at `path` and import its rows
pub async fn run_import(
    pool: &SqlitePool,
    path: &Path,
    config: &ImportConfig,
    dry_run: bool,
    on_row: impl FnMut(&RowOutcome),
) -> Result<ImportSummary, ImportError> {
    let source = load_sheet(path, config.sheet.as_deref())?;
    import_rows(pool, &source, config, dry_run, on_row).await
}

/// Import every data row of an already loaded sheet, top to bottom
///
/// Stops at the first store error; rows inserted before it stay.
pub async fn import_rows(
    pool: &SqlitePool,
    source: &SheetSource,
    config: &ImportConfig,
    dry_run: bool,
    mut on_row: impl FnMut(&RowOutcome),
) -> Result<ImportSummary, ImportError> {
    let table = config.table.as_str();
    let mut summary = ImportSummary {
        dry_run,
        ..Default::default()
    };

    // Only used in dry runs, where nothing reaches the store
    let mut pending_names: HashSet<String> = HashSet::new();
    let mut pending_codes: HashSet<String> = HashSet::new();

    for (idx, cells) in source.rows().enumerate() {
        let ordinal = idx + 1;
        let row = source.sheet_row(idx);

        if cells.iter().all(CellValue::is_null) {
            log::debug!("Row {}: blank", row);
            summary.blank += 1;
            on_row(&RowOutcome::Blank { row });
            continue;
        }

        let record = map_row(&source.headers, &cells, &config.headers);
        log::trace!(
            "Row {}: mapped fields {:?}",
            row,
            record.present_fields().collect::<Vec<_>>()
        );
        let record = apply_defaults(record, &config.defaults);
        let record = assign_code(record, ordinal, &config.code);
        let name = record.name();
        let code = record.code();

        let exists = exists_conflict(pool, table, name.as_deref(), code.as_deref())
            .await
            .map_err(|e| ImportError::StoreRead {
                row,
                detail: format!("{:#}", e),
            })?;

        let reason = if exists {
            Some(SkipReason::AlreadyExists)
        } else if dry_run
            && (name.as_ref().is_some_and(|n| pending_names.contains(n))
                || code.as_ref().is_some_and(|c| pending_codes.contains(c)))
        {
            Some(SkipReason::DuplicateInRun)
        } else {
            None
        };

        if let Some(reason) = reason {
            skip(&mut summary, &mut on_row, SkippedRow { row, name, code, reason });
            continue;
        }

        if dry_run {
            pending_names.extend(name.clone());
            pending_codes.extend(code.clone());
        } else {
            let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            let outcome = insert_company(pool, table, &record, &now)
                .await
                .map_err(|e| ImportError::StoreWrite {
                    row,
                    detail: format!("{:#}", e),
                })?;

            if let InsertOutcome::RejectedDuplicate(msg) = outcome {
                let reason = SkipReason::RejectedByStore(msg);
                skip(&mut summary, &mut on_row, SkippedRow { row, name, code, reason });
                continue;
            }
        }

        log::debug!("Row {}: inserted {:?} / {:?}", row, name, code);
        summary.inserted += 1;
        on_row(&RowOutcome::Inserted { row, name, code });
    }

    log::info!(
        "Import into {} finished: {} inserted, {} skipped, {} blank{}",
        table,
        summary.inserted,
        summary.skipped.len(),
        summary.blank,
        if dry_run { " (dry run)" } else { "" }
    );

    Ok(summary)
}

fn skip(summary: &mut ImportSummary, on_row: &mut impl FnMut(&RowOutcome), skipped: SkippedRow) {
    log::debug!(
        "Row {}: skipped {:?} / {:?} ({})",
        skipped.row,
        skipped.name,
        skipped.code,
        skipped.reason
    );
    on_row(&RowOutcome::Skipped(skipped.clone()));
    summary.skipped.push(skipped);
}
