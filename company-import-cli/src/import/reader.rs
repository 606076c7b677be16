//! Open a workbook and expose its header row and data rows
//!
//! The sheet is the workbook's first sheet unless a name is given.
//! The first used row holds the header labels, every following row is data.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use super::error::ImportError;
use super::value::CellValue;

/// A loaded sheet: header labels plus the cell range holding the data rows
#[derive(Debug, Clone)]
pub struct SheetSource {
    /// Sheet the rows were read from
    pub sheet_name: String,
    /// Header labels from the first used row, trimmed; non-text headers use their display form
    pub headers: Vec<String>,
    /// 1-based sheet row holding the headers
    header_row: usize,
    range: Range<Data>,
}

impl SheetSource {
    /// Single forward pass over the data rows below the header
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        self.range
            .rows()
            .skip(1)
            .map(|row| row.iter().map(CellValue::from).collect())
    }

    /// Number of data rows below the header
    pub fn data_row_count(&self) -> usize {
        self.range.height().saturating_sub(1)
    }

    /// 1-based sheet row of the data row at `index` in [`rows`](Self::rows)
    pub fn sheet_row(&self, index: usize) -> usize {
        self.header_row + 1 + index
    }
}

/// Open `path` and read the header row of the selected sheet
pub fn load_sheet(path: &Path, sheet: Option<&str>) -> Result<SheetSource, ImportError> {
    if !path.exists() {
        return Err(ImportError::SourceNotFound(path.to_path_buf()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::source_format(path, e))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                ImportError::source_format(
                    path,
                    format!(
                        "no sheet named '{}' (available: {})",
                        name,
                        sheet_names.join(", ")
                    ),
                )
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::source_format(path, "workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::source_format(path, e))?;

    let headers: Vec<String> = range
        .rows()
        .next()
        .ok_or_else(|| {
            ImportError::source_format(path, format!("sheet '{}' has no header row", sheet_name))
        })?
        .iter()
        .map(header_label)
        .collect();

    // calamine ranges start at the first used cell, not at A1
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);

    log::info!(
        "Loaded sheet '{}' from {} ({} columns from row {}, {} data rows)",
        sheet_name,
        path.display(),
        headers.len(),
        header_row,
        range.height().saturating_sub(1)
    );

    Ok(SheetSource {
        sheet_name,
        headers,
        header_row,
        range,
    })
}

fn header_label(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => CellValue::from(other).to_string(),
    }
}
