//! Best-effort coercion of raw cell text into export-ready field values.
//!
//! Nothing here fails: unparseable input degrades to the documented default
//! (an empty date, a zero balance).

use std::fmt::Write;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

pub const ZERO_BALANCE: &str = "0.00";

// ---------------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------------

// Underscore digit separators ("1_000") are not numbers to f64's parser.
fn parse_balance(raw: &str) -> Option<f64> {
    let s = raw.replace([',', '$'], "");
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Normalize a balance cell to a two-decimal string, e.g. `"$1,234.5"` -> `"1234.50"`.
pub fn normalize_balance(raw: Option<&str>) -> String {
    raw.and_then(parse_balance)
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| ZERO_BALANCE.to_string())
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

fn numeric_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,4})[/\-.](\d{1,2})[/\-.](\d{1,4})(?:[ T].*)?$")
            .expect("numeric date pattern is valid")
    })
}

fn compact_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("compact date pattern is valid"))
}

const NAMED_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%y",
    "%d-%B-%Y",
    "%A, %B %d, %Y",
];

/// Two-digit years pivot the same way chrono's `%y` does: 69..=99 is 19xx.
fn expand_year(year: u32, digits: usize) -> Option<i32> {
    match digits {
        4 => i32::try_from(year).ok(),
        1 | 2 if year >= 69 => Some(1900 + year as i32),
        1 | 2 => Some(2000 + year as i32),
        _ => None,
    }
}

fn parse_numeric(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = compact_date_re().captures(s) {
        let y: i32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let d: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    let caps = numeric_date_re().captures(s)?;
    let (a, b, c) = (&caps[1], &caps[2], &caps[3]);
    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;
    let third: u32 = c.parse().ok()?;

    if a.len() == 4 {
        return NaiveDate::from_ymd_opt(first as i32, second, third);
    }
    let year = expand_year(third, c.len())?;
    // Month first, unless the leading field cannot be a month.
    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

fn parse_named(s: &str) -> Option<NaiveDate> {
    for fmt in NAMED_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // "March 2024" means the first of the month.
    if s.split_whitespace().count() == 2 {
        return NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y").ok();
    }
    None
}

/// Parse a date written in any of the common spreadsheet renderings.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    parse_numeric(s).or_else(|| parse_named(s))
}

/// Render `date` with a strftime `format`. `None` when the format asks for
/// fields a bare date does not have (time of day, offset) or is malformed.
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Reformat a raw date cell with `format`, or return an empty string.
pub fn normalize_date(raw: Option<&str>, format: &str) -> String {
    raw.and_then(parse_loose_date)
        .and_then(|d| format_date(d, format))
        .unwrap_or_default()
}
