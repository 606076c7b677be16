//! Raw spreadsheet cell values as seen by the import pipeline

use calamine::{Data, DataType};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// A cell value read from a workbook, before any coercion to the store's text columns
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell, empty string or cell error
    #[default]
    Null,
    /// Text
    String(String),
    /// Whole number
    Int(i64),
    /// Fractional number
    Float(f64),
    /// TRUE/FALSE
    Bool(bool),
    /// Date and time (serial and ISO dates are converted on read)
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text written to the destination store; `None` for null
    pub fn to_db_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Null,
            Data::String(s) if s.is_empty() => CellValue::Null,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => float_value(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => float_value(dt.as_f64()),
            // Honours the workbook's 1900/1904 date system
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(CellValue::DateTime)
                .unwrap_or(CellValue::Float(dt.as_f64())),
            Data::DateTimeIso(s) => cell
                .as_datetime()
                .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::String(s.clone())),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(_) => CellValue::Null,
        }
    }
}

/// Whole floats become integers so numeric identifiers do not pick up a ".0"
fn float_value(f: f64) -> CellValue {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "(null)"),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}
