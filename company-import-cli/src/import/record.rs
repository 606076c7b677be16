//! Company records built from sheet rows
//!
//! A row goes through three pure steps before it reaches the store:
//! [`map_row`] copies the configured columns, [`apply_defaults`] fills the
//! fields that are still null, and [`assign_code`] sets the generated code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// Destination columns of a company row, excluding the timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Code,
    Address,
    Email,
    Phone,
    TaxOffice,
    TaxNumber,
    BusinessType,
    Status,
    Currency,
    Timezone,
    Type,
}

impl Field {
    /// Every field, in insert column order
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Code,
        Field::Address,
        Field::Email,
        Field::Phone,
        Field::TaxOffice,
        Field::TaxNumber,
        Field::BusinessType,
        Field::Status,
        Field::Currency,
        Field::Timezone,
        Field::Type,
    ];

    /// Column name in the destination table
    pub fn column(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Code => "code",
            Field::Address => "address",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::TaxOffice => "tax_office",
            Field::TaxNumber => "tax_number",
            Field::BusinessType => "business_type",
            Field::Status => "status",
            Field::Currency => "currency",
            Field::Timezone => "timezone",
            Field::Type => "type",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.column() == s)
            .ok_or_else(|| format!("unknown destination field '{}'", s))
    }
}

/// Source label -> destination field
pub type HeaderMap = BTreeMap<String, Field>;

/// Destination field -> default text
pub type DefaultMap = BTreeMap<Field, String>;

/// How the `code` field is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodePolicy {
    /// Always overwrite with the ordinal code, ignoring any mapped code column
    #[default]
    Ordinal,
    /// Keep a mapped, non-null code; generate one only when it is missing
    SourceFirst,
}

/// Code generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeFormat {
    pub prefix: String,
    /// Minimum number of digits, zero padded
    pub width: usize,
    #[serde(default)]
    pub policy: CodePolicy,
}

impl CodeFormat {
    /// Code for the given 1-based ordinal, e.g. `COMP007`
    pub fn code_for(&self, ordinal: usize) -> String {
        format!("{}{:0width$}", self.prefix, ordinal, width = self.width)
    }
}

/// A company row on its way to the store. Unset fields read as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    fields: BTreeMap<Field, CellValue>,
}

impl CompanyRecord {
    pub fn get(&self, field: Field) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.fields.get(&field).unwrap_or(NULL)
    }

    pub fn set(&mut self, field: Field, value: CellValue) {
        self.fields.insert(field, value);
    }

    /// Text of a field, `None` when null
    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field).to_db_text()
    }

    pub fn name(&self) -> Option<String> {
        self.text(Field::Name)
    }

    pub fn code(&self) -> Option<String> {
        self.text(Field::Code)
    }

    /// Fields holding a non-null value
    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(f, _)| *f)
    }
}

/// Copy the cells of mapped columns into a record
///
/// Labels missing from `headers` are skipped; they never cause an error.
/// A label that repeats in `headers` resolves to its first column.
pub fn map_row(headers: &[String], row: &[CellValue], header_map: &HeaderMap) -> CompanyRecord {
    let mut record = CompanyRecord::default();
    for (label, field) in header_map {
        let label = label.trim();
        if let Some(col) = headers.iter().position(|h| h == label) {
            let value = row.get(col).cloned().unwrap_or_default();
            record.set(*field, value);
        }
    }
    record
}

/// Fill every defaulted field that is unset or null; present values are kept
pub fn apply_defaults(mut record: CompanyRecord, defaults: &DefaultMap) -> CompanyRecord {
    for (field, default) in defaults {
        if record.get(*field).is_null() {
            record.set(*field, CellValue::String(default.clone()));
        }
    }
    record
}

/// Set the code from the row's 1-based ordinal according to the code policy
pub fn assign_code(mut record: CompanyRecord, ordinal: usize, format: &CodeFormat) -> CompanyRecord {
    let keep_source = format.policy == CodePolicy::SourceFirst && !record.get(Field::Code).is_null();
    if !keep_source {
        record.set(Field::Code, CellValue::String(format.code_for(ordinal)));
    }
    record
}
