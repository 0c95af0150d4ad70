use std::io::Write;
use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::amount;
use crate::models::{ExtractSummary, TransactionRecord};

pub const HEADERS: [&str; 5] = [
    "Debtor Reference",
    "Transaction Type",
    "Document Number",
    "Document Date",
    "Document Balance",
];

/// Write records as CSV with a header row and no index column.
pub fn write_records<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(HEADERS)?;
    }
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_records(std::io::BufWriter::new(file), records)?;
    tracing::info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn preview_table(records: &[TransactionRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(HEADERS.to_vec());
    for rec in records {
        table.add_row(vec![
            Cell::new(&rec.debtor_reference),
            Cell::new(&rec.transaction_type),
            Cell::new(&rec.document_number),
            Cell::new(&rec.document_date),
            Cell::new(&rec.document_balance),
        ]);
    }
    table
}

pub fn summary_table(summary: &ExtractSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Count", "Balance"]);
    for (kind, total) in &summary.by_type {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(total.count),
            Cell::new(amount(total.balance)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                debtor_reference: "ACME, Inc.".into(),
                transaction_type: "INV".into(),
                document_number: "0012".into(),
                document_date: "05/03/2024".into(),
                document_balance: "1234.50".into(),
            },
            TransactionRecord {
                debtor_reference: "Globex \"West\"".into(),
                transaction_type: "CRD".into(),
                document_number: "CM-1".into(),
                document_date: String::new(),
                document_balance: "0.00".into(),
            },
        ]
    }

    #[test]
    fn test_write_records_header_and_order() {
        let mut buf = Vec::new();
        write_records(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Debtor Reference,Transaction Type,Document Number,Document Date,Document Balance")
        );
        assert_eq!(lines.next(), Some("\"ACME, Inc.\",INV,0012,05/03/2024,1234.50"));
    }

    #[test]
    fn test_csv_roundtrip_preserves_fields() {
        let records = sample();
        let mut buf = Vec::new();
        write_records(&mut buf, &records).unwrap();
        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let back: Vec<TransactionRecord> = rdr.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_write_records_empty_still_has_header() {
        let mut buf = Vec::new();
        write_records(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Debtor Reference,Transaction Type,Document Number,Document Date,Document Balance\n"
        );
    }

    #[test]
    fn test_write_csv_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("processed.csv");
        write_csv(&path, &sample()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_preview_and_summary_tables() {
        let records = sample();
        let preview = preview_table(&records).to_string();
        assert!(preview.contains("Debtor Reference"));
        assert!(preview.contains("CM-1"));
        let summary = summary_table(&ExtractSummary::from_records(&records)).to_string();
        assert!(summary.contains("1,234.50"));
        assert!(summary.contains("CRD"));
    }
}
