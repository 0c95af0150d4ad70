//! Single-pass scanner that turns an aged receivables export into transaction records.
//!
//! Customer names and their documents are interleaved in the sheet: a row whose
//! customer column contains the marker text announces that the *next* row holds
//! the customer's name, and every recognized document row after that belongs to
//! that customer until the next marker.

use std::collections::HashMap;

use crate::models::TransactionRecord;
use crate::normalize::{normalize_balance, normalize_date};
use crate::settings::{ColumnLayout, Settings};
use crate::sheet::Table;

/// How a single row is treated by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind<'a> {
    CustomerMarker,
    Transaction(&'a str),
    Other,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    columns: ColumnLayout,
    customer_marker: String,
    /// Upper-cased, trimmed document-type label -> short code.
    types: HashMap<String, String>,
    date_format: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Extractor {
    pub fn new(settings: &Settings) -> Self {
        let types = settings
            .transaction_types
            .iter()
            .map(|(label, code)| (label.trim().to_uppercase(), code.clone()))
            .collect();
        Self {
            columns: settings.columns,
            customer_marker: settings.customer_marker.clone(),
            types,
            date_format: settings.date_format.clone(),
        }
    }

    /// Classify row `idx` of `table`. Marker detection wins over type lookup.
    pub fn classify<'s>(&'s self, table: &Table, idx: usize) -> RowKind<'s> {
        let marker_cell = table.cell(idx, self.columns.customer).unwrap_or_default();
        if marker_cell.contains(self.customer_marker.as_str()) {
            return RowKind::CustomerMarker;
        }
        let label = table
            .cell(idx, self.columns.doc_type)
            .unwrap_or_default()
            .trim()
            .to_uppercase();
        match self.types.get(&label) {
            Some(code) => RowKind::Transaction(code.as_str()),
            None => RowKind::Other,
        }
    }

    /// The customer named on the row after a marker, if there is one.
    fn lookahead_customer(&self, table: &Table, marker_idx: usize) -> Option<String> {
        let next = marker_idx.checked_add(1)?;
        table
            .cell(next, self.columns.customer)
            .map(|name| name.trim().to_string())
    }

    fn build_record(&self, table: &Table, idx: usize, code: &str, customer: &str) -> TransactionRecord {
        let cols = &self.columns;
        TransactionRecord {
            debtor_reference: customer.to_string(),
            transaction_type: code.to_string(),
            document_number: table.cell(idx, cols.doc_number).unwrap_or_default().trim().to_string(),
            document_date: normalize_date(table.cell(idx, cols.date), &self.date_format),
            document_balance: normalize_balance(table.cell(idx, cols.balance)),
        }
    }

    /// Scan `table` top to bottom and collect its transaction records in row order.
    pub fn extract(&self, table: &Table) -> Vec<TransactionRecord> {
        let mut records = Vec::new();
        let mut customer: Option<String> = None;

        for idx in 0..table.len() {
            match self.classify(table, idx) {
                RowKind::CustomerMarker => {
                    if let Some(name) = self.lookahead_customer(table, idx) {
                        tracing::debug!(row = idx, customer = %name, "customer marker");
                        customer = Some(name);
                    } else {
                        tracing::debug!(row = idx, "customer marker without a name row");
                    }
                }
                RowKind::Transaction(code) => match customer.as_deref() {
                    Some(name) if !name.is_empty() => {
                        let rec = self.build_record(table, idx, code, name);
                        tracing::debug!(row = idx, kind = code, number = %rec.document_number, "transaction");
                        records.push(rec);
                    }
                    _ => tracing::debug!(row = idx, kind = code, "transaction before any customer, dropped"),
                },
                RowKind::Other => {}
            }
        }

        tracing::info!("extracted {} transactions from {} rows", records.len(), table.len());
        records
    }
}
