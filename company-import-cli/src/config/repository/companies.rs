//! Repository for company rows

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::import::{CompanyRecord, Field};

/// Result of an insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The store refused the row through a uniqueness constraint
    RejectedDuplicate(String),
}

/// Whether a row with the same name or the same code already exists
///
/// A null name or code never matches anything.
pub async fn exists_conflict(
    pool: &SqlitePool,
    table: &str,
    name: Option<&str>,
    code: Option<&str>,
) -> Result<bool> {
    let sql = format!(r#"SELECT COUNT(*) FROM "{}" WHERE name = ? OR code = ?"#, table);
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(name)
        .bind(code)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to check {} for existing name/code", table))?;

    Ok(count > 0)
}

/// Insert one company with both timestamps set to `now`
pub async fn insert_company(
    pool: &SqlitePool,
    table: &str,
    record: &CompanyRecord,
    now: &str,
) -> Result<InsertOutcome> {
    let columns: Vec<&str> = Field::ALL
        .iter()
        .map(|f| f.column())
        .chain(["created_at", "updated_at"])
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        r#"INSERT INTO "{}" ({}) VALUES ({})"#,
        table,
        columns.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for field in Field::ALL {
        query = query.bind(record.text(field));
    }
    query = query.bind(now).bind(now);

    match query.execute(pool).await {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Ok(InsertOutcome::RejectedDuplicate(db_err.message().to_string()))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to insert into {}", table)),
    }
}

/// Number of rows in the table
pub async fn count_companies(pool: &SqlitePool, table: &str) -> Result<i64> {
    let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, table);
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to count rows in {}", table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::CellValue;
    use crate::import::test_support::{create_companies_table, memory_pool};

    fn record(name: &str, code: &str) -> CompanyRecord {
        let mut record = CompanyRecord::default();
        record.set(Field::Name, CellValue::from(name));
        record.set(Field::Code, CellValue::from(code));
        record
    }

    #[tokio::test]
    async fn test_conflict_on_name_or_code() {
        let pool = memory_pool().await;
        create_companies_table(&pool, false).await;

        let outcome = insert_company(&pool, "companies", &record("Acme", "COMP001"), "2025-01-01 10:00:00")
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        assert!(exists_conflict(&pool, "companies", Some("Acme"), Some("COMP999")).await.unwrap());
        assert!(exists_conflict(&pool, "companies", Some("Other"), Some("COMP001")).await.unwrap());
        assert!(!exists_conflict(&pool, "companies", Some("Other"), Some("COMP002")).await.unwrap());
        assert!(!exists_conflict(&pool, "companies", None, Some("COMP002")).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_sets_both_timestamps() {
        let pool = memory_pool().await;
        create_companies_table(&pool, false).await;

        insert_company(&pool, "companies", &record("Acme", "COMP001"), "2025-03-04 05:06:07")
            .await
            .unwrap();

        let (created, updated): (String, String) =
            sqlx::query_as("SELECT created_at, updated_at FROM companies WHERE code = 'COMP001'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(created, "2025-03-04 05:06:07");
        assert_eq!(updated, created);
        assert_eq!(count_companies(&pool, "companies").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_violation_is_reported_as_duplicate() {
        let pool = memory_pool().await;
        create_companies_table(&pool, true).await;

        insert_company(&pool, "companies", &record("Acme", "COMP001"), "now").await.unwrap();
        let outcome = insert_company(&pool, "companies", &record("Acme", "COMP002"), "now")
            .await
            .unwrap();

        assert!(matches!(outcome, InsertOutcome::RejectedDuplicate(_)));
        assert_eq!(count_companies(&pool, "companies").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() {
        let pool = memory_pool().await;
        let result = insert_company(&pool, "companies", &record("Acme", "COMP001"), "now").await;
        assert!(result.is_err());
    }
}
