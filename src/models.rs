use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One extracted transaction, in export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Debtor Reference")]
    pub debtor_reference: String,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: String,
    #[serde(rename = "Document Number")]
    pub document_number: String,
    #[serde(rename = "Document Date")]
    pub document_date: String,
    #[serde(rename = "Document Balance")]
    pub document_balance: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTotal {
    pub count: usize,
    pub balance: f64,
}

/// Totals shown after an extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractSummary {
    pub records: usize,
    pub debtors: usize,
    pub by_type: BTreeMap<String, TypeTotal>,
}

impl ExtractSummary {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let mut debtors = BTreeSet::new();
        let mut by_type: BTreeMap<String, TypeTotal> = BTreeMap::new();
        for rec in records {
            debtors.insert(rec.debtor_reference.as_str());
            let entry = by_type.entry(rec.transaction_type.clone()).or_default();
            entry.count += 1;
            // Balances are already normalized, so this parse only fails on hand-built records.
            entry.balance += rec.document_balance.parse::<f64>().unwrap_or(0.0);
        }
        Self {
            records: records.len(),
            debtors: debtors.len(),
            by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(debtor: &str, kind: &str, balance: &str) -> TransactionRecord {
        TransactionRecord {
            debtor_reference: debtor.to_string(),
            transaction_type: kind.to_string(),
            document_number: "1".to_string(),
            document_date: String::new(),
            document_balance: balance.to_string(),
        }
    }

    #[test]
    fn test_summary_counts_debtors_and_types() {
        let records = vec![
            rec("ACME", "INV", "100.00"),
            rec("ACME", "CRD", "-20.50"),
            rec("Globex", "INV", "1234.50"),
        ];
        let summary = ExtractSummary::from_records(&records);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.debtors, 2);
        assert_eq!(summary.by_type["INV"].count, 2);
        assert!((summary.by_type["INV"].balance - 1334.5).abs() < 1e-9);
        assert_eq!(summary.by_type["CRD"].count, 1);
        assert!((summary.by_type["CRD"].balance + 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_empty() {
        let summary = ExtractSummary::from_records(&[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.debtors, 0);
        assert!(summary.by_type.is_empty());
    }
}
