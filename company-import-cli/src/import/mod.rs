//! Spreadsheet import of company records
//!
//! Reads the first row of a sheet as header labels, maps the configured
//! columns of every following row onto company fields and writes the rows
//! that do not collide with an existing name or code.

mod error;
mod pipeline;
mod reader;
pub(crate) mod record;
mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ImportError;
pub use pipeline::{ImportSummary, RowOutcome, run_import};
pub use reader::load_sheet;
pub use record::{CodeFormat, CompanyRecord, DefaultMap, Field, HeaderMap};
pub use value::CellValue;
