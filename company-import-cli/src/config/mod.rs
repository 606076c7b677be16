//! Import settings
//!
//! Settings come from a TOML file merged over the built-in defaults in
//! `resources/default_config.toml`. Tables merge key by key, except
//! `[headers]`, which a user file replaces as a whole so that a sheet in
//! another language does not keep the built-in labels.

pub mod repository;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::import::{CodeFormat, DefaultMap, Field, HeaderMap};

const BUILTIN_CONFIG: &str = include_str!("../../resources/default_config.toml");

/// Tables a user file replaces instead of merging into
const REPLACED_TABLES: &[&str] = &["headers"];

/// Validated settings for the migrate, preview and import commands
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Destination table, a plain identifier
    pub table: String,
    /// Sheet to read; `None` reads the first sheet
    pub sheet: Option<String>,
    pub code: CodeFormat,
    pub headers: HeaderMap,
    pub defaults: DefaultMap,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: PathBuf,
    table: String,
    #[serde(default)]
    sheet: RawSheet,
    code: CodeFormat,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    defaults: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSheet {
    name: Option<String>,
}

impl ImportConfig {
    /// The built-in settings
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str("")
    }

    /// Settings from `overlay` merged over the built-in ones
    pub fn from_toml_str(overlay: &str) -> Result<Self> {
        let mut table: toml::Table =
            toml::from_str(BUILTIN_CONFIG).context("Built-in configuration is invalid")?;
        let overlay: toml::Table = toml::from_str(overlay).context("Failed to parse configuration")?;
        merge_tables(&mut table, overlay);

        let raw: RawConfig = toml::Value::Table(table)
            .try_into()
            .context("Invalid configuration")?;
        raw.validate()
    }

    /// Load settings from `explicit`, else the per-user file, else the built-ins
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Configuration file does not exist: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("In configuration file {}", path.display()))
            }
            None => {
                log::debug!("No configuration file, using built-in settings");
                Self::builtin()
            }
        }
    }
}

/// `<config dir>/company-import/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("company-import").join("config.toml"))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table))
                if !REPLACED_TABLES.contains(&key.as_str()) =>
            {
                merge_tables(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl RawConfig {
    fn validate(self) -> Result<ImportConfig> {
        if !is_identifier(&self.table) {
            bail!(
                "table '{}' is not a plain identifier (letters, digits, underscore)",
                self.table
            );
        }
        if self.code.prefix.is_empty() {
            bail!("code.prefix must not be empty");
        }
        if !(1..=12).contains(&self.code.width) {
            bail!("code.width must be between 1 and 12, got {}", self.code.width);
        }

        let mut headers = HeaderMap::new();
        for (label, field) in self.headers {
            let field: Field = field
                .parse()
                .map_err(|e| anyhow::anyhow!("headers.\"{}\": {}", label, e))?;
            headers.insert(label, field);
        }

        let mut defaults = DefaultMap::new();
        for (field, value) in self.defaults {
            let field: Field = field
                .parse()
                .map_err(|e| anyhow::anyhow!("defaults: {}", e))?;
            defaults.insert(field, value);
        }

        Ok(ImportConfig {
            database: self.database,
            table: self.table,
            sheet: self.sheet.name,
            code: self.code,
            headers,
            defaults,
        })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
