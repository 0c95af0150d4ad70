use std::path::Path;

use crate::error::{ArError, Result};

/// A rectangular grid of text cells. `None` marks an absent cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of the cell at (`row`, `col`); out-of-range positions read as absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Worksheet to read; the first sheet when unset.
    pub sheet: Option<String>,
    /// Leading rows consumed as a header and never handed to the extractor.
    pub header_rows: usize,
}

fn blank_to_none(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Load a spreadsheet or CSV export as a text table.
pub fn load_table(path: &Path, opts: &LoadOptions) -> Result<Table> {
    let ext = extension(path);
    let mut rows = match ext.as_str() {
        "csv" => read_csv_rows(path)?,
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_rows(path, opts.sheet.as_deref())?,
        _ => {
            return Err(ArError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            }))
        }
    };
    let skip = opts.header_rows.min(rows.len());
    rows.drain(..skip);
    tracing::info!(
        "loaded {} data rows from {} (skipped {skip} header rows)",
        rows.len(),
        path.display()
    );
    Ok(Table::new(rows))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<Option<String>>>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(blank_to_none).collect());
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Workbooks (feature-gated)
// ---------------------------------------------------------------------------

/// Render an Excel serial date-time the way a text export shows it.
#[cfg(any(feature = "xlsx", test))]
pub fn excel_serial_to_datetime(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let dt = base.checked_add_signed(chrono::Duration::milliseconds(millis))?;
    Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(any(feature = "xlsx", test))]
fn float_to_text(f: f64) -> String {
    // f64's Display is already the shortest form: 1234.0 -> "1234", 1234.5 -> "1234.5".
    format!("{f}")
}

#[cfg(feature = "xlsx")]
fn cell_to_text(cell: &calamine::Data) -> Option<String> {
    use calamine::Data;
    match cell {
        Data::Empty => None,
        Data::String(s) => blank_to_none(s),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(float_to_text(*f)),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => {
            excel_serial_to_datetime(dt.as_f64()).or_else(|| Some(float_to_text(dt.as_f64())))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => blank_to_none(s),
        Data::Error(e) => Some(e.to_string()),
    }
}

#[cfg(feature = "xlsx")]
fn read_workbook_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<Option<String>>>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| ArError::SheetNotFound(wanted.to_string()))?,
        None => names.first().cloned().ok_or(ArError::EmptyWorkbook)?,
    };
    let range = workbook.worksheet_range(&name)?;
    tracing::debug!("reading sheet {name:?} ({:?} used cells)", range.get_size());
    Ok(range_rows(&range))
}

/// Text rows of a worksheet range with fully blank rows removed, so the first
/// remaining row is the header. Columns stay absolute from column A.
#[cfg(feature = "xlsx")]
fn range_rows(range: &calamine::Range<calamine::Data>) -> Vec<Vec<Option<String>>> {
    let col_offset = range.start().map(|(_, c)| c as usize).unwrap_or(0);
    range
        .rows()
        .map(|row| row.iter().map(cell_to_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(Option::is_some))
        .map(|cells| {
            let mut padded: Vec<Option<String>> = vec![None; col_offset];
            padded.extend(cells);
            padded
        })
        .collect()
}
