//! Repository layer for database operations

pub mod companies;
pub mod schema;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::import::ImportError;

/// How the destination database is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadWrite,
    ReadOnly,
}

/// Open a single-connection pool on an existing SQLite file
///
/// The file is never created: a missing database is reported as an error
/// so a mistyped path cannot silently produce an empty store.
pub async fn open_pool(path: &Path, mode: AccessMode) -> Result<SqlitePool, ImportError> {
    if !path.exists() {
        return Err(ImportError::StoreOpen {
            path: path.to_path_buf(),
            detail: "database file does not exist".to_string(),
        });
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false)
        .read_only(mode == AccessMode::ReadOnly)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| ImportError::StoreOpen {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    log::debug!("Opened {} ({:?})", path.display(), mode);
    Ok(pool)
}
