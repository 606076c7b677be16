//! Additive schema changes for the company table

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

/// Columns added by the tax-field migration
pub const TAX_COLUMNS: [&str; 2] = ["tax_office", "tax_number"];

const TAX_COLUMN_DEFINITION: &str = "VARCHAR(255)";

/// Outcome of adding one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOutcome {
    Added,
    AlreadyPresent,
    Failed(String),
}

impl ColumnOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ColumnOutcome::Failed(_))
    }
}

/// Column names of `table`; empty when the table does not exist
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let pragma_query = format!(r#"PRAGMA table_info("{}")"#, table);
    let rows = sqlx::query(&pragma_query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to inspect {} schema", table))?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        columns.push(row.try_get::<String, _>("name")?);
    }
    Ok(columns)
}

/// Add `column` to `table` unless it is already there
pub async fn add_column_if_missing(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> ColumnOutcome {
    match table_columns(pool, table).await {
        Ok(columns) if columns.iter().any(|c| c == column) => {
            return ColumnOutcome::AlreadyPresent;
        }
        Ok(_) => {}
        Err(e) => return ColumnOutcome::Failed(format!("{:#}", e)),
    }

    let sql = format!(r#"ALTER TABLE "{}" ADD COLUMN {} {}"#, table, column, definition);
    match sqlx::query(&sql).execute(pool).await {
        Ok(_) => ColumnOutcome::Added,
        // Another process may have added it between the check and the ALTER
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column name") => {
            ColumnOutcome::AlreadyPresent
        }
        Err(e) => ColumnOutcome::Failed(e.to_string()),
    }
}

/// Add the nullable tax columns, each attempted independently
pub async fn add_missing_columns(
    pool: &SqlitePool,
    table: &str,
) -> Vec<(&'static str, ColumnOutcome)> {
    let mut outcomes = Vec::with_capacity(TAX_COLUMNS.len());
    for column in TAX_COLUMNS {
        let outcome = add_column_if_missing(pool, table, column, TAX_COLUMN_DEFINITION).await;
        log::info!("Column {}.{}: {:?}", table, column, outcome);
        outcomes.push((column, outcome));
    }
    outcomes
}
