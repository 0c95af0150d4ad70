use std::path::Path;

use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::Settings;

pub fn run(path: &Path, settings: &Settings) -> Result<()> {
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Settings:     {}{state}", path.display());
    println!("Marker:       {:?}", settings.customer_marker);
    println!("Header rows:  {}", settings.header_rows);
    println!("Date format:  {}", settings.date_format);
    println!("Output file:  {}", settings.output_file);

    let cols = &settings.columns;
    let mut columns = Table::new();
    columns.set_header(vec!["Field", "Column"]);
    for (field, col) in [
        ("Document type", cols.doc_type),
        ("Document number", cols.doc_number),
        ("Customer name", cols.customer),
        ("Document date", cols.date),
        ("Document balance", cols.balance),
    ] {
        columns.add_row(vec![Cell::new(field), Cell::new(col)]);
    }
    println!("Columns\n{columns}");

    let mut types = Table::new();
    types.set_header(vec!["Label", "Code"]);
    for (label, code) in &settings.transaction_types {
        types.add_row(vec![Cell::new(label), Cell::new(code)]);
    }
    println!("Transaction types\n{types}");
    Ok(())
}
