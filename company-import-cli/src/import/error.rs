//! Failures that abort an import, preview or migration

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of the import pipeline
///
/// Duplicate rows are not errors; they surface as [`super::RowOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Cannot read {} as a spreadsheet: {reason}", .path.display())]
    SourceFormat { path: PathBuf, reason: String },

    #[error("Cannot open database {}: {detail}", .path.display())]
    StoreOpen { path: PathBuf, detail: String },

    #[error("Database query failed at sheet row {row}: {detail}")]
    StoreRead { row: usize, detail: String },

    #[error("Insert failed at sheet row {row}: {detail}")]
    StoreWrite { row: usize, detail: String },
}

impl ImportError {
    pub(crate) fn source_format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ImportError::SourceFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the workbook rather than the database
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ImportError::SourceNotFound(_) | ImportError::SourceFormat { .. }
        )
    }
}
