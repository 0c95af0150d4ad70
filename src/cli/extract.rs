use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::Result;
use crate::export::{preview_table, summary_table, write_csv, write_records};
use crate::extractor::Extractor;
use crate::models::ExtractSummary;
use crate::settings::Settings;
use crate::sheet::{load_table, LoadOptions};

pub struct ExtractArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub sheet: Option<String>,
    pub preview: bool,
    pub stdout: bool,
}

pub fn run(settings: &Settings, args: ExtractArgs) -> Result<()> {
    let opts = LoadOptions {
        sheet: args.sheet,
        header_rows: settings.header_rows,
    };
    let table = load_table(&args.file, &opts)?;
    let records = Extractor::new(settings).extract(&table);

    if args.stdout {
        // Keep stdout clean for piping; status goes to stderr.
        eprintln!("Processed {} transactions", records.len());
        if records.is_empty() {
            eprintln!("{}", "No transaction records found in the input file.".yellow());
            return Ok(());
        }
        let stdout = std::io::stdout();
        return write_records(stdout.lock(), &records);
    }

    println!("Processed {} transactions", records.len());
    if records.is_empty() {
        println!("{}", "No transaction records found in the input file.".yellow());
        return Ok(());
    }

    if args.preview {
        println!("{}", preview_table(&records));
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.file, &settings.output_file));
    write_csv(&output, &records)?;

    let summary = ExtractSummary::from_records(&records);
    println!(
        "{} {} records for {} debtors",
        "Summary:".bold(),
        summary.records,
        summary.debtors
    );
    println!("{}", summary_table(&summary));
    println!("Wrote {}", output.display().to_string().green());
    Ok(())
}

/// Default output lands next to the input file.
fn default_output(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_next_to_input() {
        assert_eq!(
            default_output(Path::new("/data/ar/aged.xlsx"), "processed_transactions.csv"),
            PathBuf::from("/data/ar/processed_transactions.csv")
        );
        assert_eq!(
            default_output(Path::new("aged.xlsx"), "out.csv"),
            PathBuf::from("out.csv")
        );
    }

    #[test]
    fn test_run_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("aged.csv");
        std::fs::write(
            &input,
            "h0,h1,h2\n,,Customer Name\n,,ACME\nINVOICE,1001,,,2024-03-05,,,,,,,\"$1,234.5\"\n",
        )
        .unwrap();
        let output = dir.path().join("out.csv");
        let args = ExtractArgs {
            file: input,
            output: Some(output.clone()),
            sheet: None,
            preview: true,
            stdout: false,
        };
        run(&Settings::default(), args).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("ACME,INV,1001,05/03/2024,1234.50"));
    }

    #[test]
    fn test_run_without_records_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("aged.csv");
        std::fs::write(&input, "h\nINVOICE,1\n").unwrap();
        let output = dir.path().join("out.csv");
        let args = ExtractArgs {
            file: input,
            output: Some(output.clone()),
            sheet: None,
            preview: false,
            stdout: false,
        };
        run(&Settings::default(), args).unwrap();
        assert!(!output.exists());
    }
}
