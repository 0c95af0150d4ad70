/// Format a balance total for display with thousands separators: `-1,234.56`.
pub fn amount(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let grouped = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",");

    // Totals that round to zero print unsigned.
    let sign = if val < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{dec_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(amount(1234.56), "1,234.56");
        assert_eq!(amount(-500.0), "-500.00");
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(-0.001), "0.00");
        assert_eq!(amount(1000000.99), "1,000,000.99");
        assert_eq!(amount(42.1), "42.10");
        assert_eq!(amount(999.0), "999.00");
    }
}
