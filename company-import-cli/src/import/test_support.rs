//! Fixtures shared by the unit tests

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// In-memory store; one connection so every query sees the same database
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// The company table as the backend creates it, optionally with unique name/code
pub async fn create_companies_table(pool: &SqlitePool, unique: bool) {
    let uniqueness = if unique { "UNIQUE" } else { "" };
    let sql = format!(
        "CREATE TABLE companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(255) {uniqueness},
            code VARCHAR(255) {uniqueness},
            address TEXT,
            email VARCHAR(255),
            phone VARCHAR(255),
            tax_office VARCHAR(255),
            tax_number VARCHAR(255),
            business_type VARCHAR(255),
            status VARCHAR(255),
            currency VARCHAR(255),
            timezone VARCHAR(255),
            type VARCHAR(255),
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )"
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

/// Create a file-backed store holding an empty company table
pub async fn create_database_file(dir: &Path) -> PathBuf {
    let path = dir.join("database.sqlite");
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    create_companies_table(&pool, false).await;
    pool.close().await;
    path
}

/// Write `data.xlsx` with a header row and text rows; empty strings stay blank cells
pub fn write_workbook(dir: &Path, headers: &[&str], rows: &[Vec<&str>]) -> PathBuf {
    let path = dir.join("data.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet
                    .write_string((row_idx + 1) as u32, col as u16, *cell)
                    .unwrap();
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}
