use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ArError, Result};
use crate::normalize::format_date;

/// Fixed column positions of the receivables export, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub doc_type: usize,
    pub doc_number: usize,
    pub customer: usize,
    pub date: usize,
    pub balance: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            doc_type: 0,
            doc_number: 1,
            customer: 2,
            date: 4,
            balance: 11,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub columns: ColumnLayout,
    #[serde(default = "default_customer_marker")]
    pub customer_marker: String,
    #[serde(default = "default_transaction_types")]
    pub transaction_types: BTreeMap<String, String>,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_customer_marker() -> String {
    "Customer Name".to_string()
}

fn default_transaction_types() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("INVOICE".to_string(), "INV".to_string()),
        ("CREDIT MEMO".to_string(), "CRD".to_string()),
    ])
}

fn default_header_rows() -> usize {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_output_file() -> String {
    "processed_transactions.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: ColumnLayout::default(),
            customer_marker: default_customer_marker(),
            transaction_types: default_transaction_types(),
            header_rows: default_header_rows(),
            date_format: default_date_format(),
            output_file: default_output_file(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.customer_marker.is_empty() {
            return Err(ArError::Settings("customer_marker must not be empty".into()));
        }
        if self.transaction_types.is_empty() {
            return Err(ArError::Settings("transaction_types must not be empty".into()));
        }
        if let Some((label, _)) = self
            .transaction_types
            .iter()
            .find(|(label, code)| label.trim().is_empty() || code.trim().is_empty())
        {
            return Err(ArError::Settings(format!(
                "transaction type mapping has an empty entry: {label:?}"
            )));
        }
        // The format must render from a bare date: no time-of-day or offset fields.
        let sample = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap_or_default();
        if self.date_format.is_empty() || format_date(sample, &self.date_format).is_none() {
            return Err(ArError::Settings(format!(
                "invalid date_format: {:?}",
                self.date_format
            )));
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("arledger")
}

/// Resolve the settings file, honoring an explicit `--config` path.
pub fn settings_path(override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(p) => p.to_path_buf(),
        None => config_dir().join("settings.json"),
    }
}

/// Load settings from `path`.
///
/// A missing file means defaults. A file that exists but cannot be read or
/// parsed is an error, as is a configuration that fails validation.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| ArError::Settings(format!("{}: {e}", path.display())))?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    settings.validate()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
