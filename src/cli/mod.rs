pub mod config;
pub mod extract;
pub mod init;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arledger",
    about = "Extract debtor transactions from aged receivables spreadsheet exports."
)]
pub struct Cli {
    /// Settings file (default: ~/.config/arledger/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract transaction records from an XLSX/CSV export and write them as CSV.
    Extract {
        /// Path to the spreadsheet or CSV export
        file: PathBuf,
        /// Output CSV path (default: settings `output_file`)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
        /// Print the extracted records as a table
        #[arg(long)]
        preview: bool,
        /// Write the CSV to standard output instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Write default settings to the settings file.
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Show the settings file location and effective settings.
    Config,
}
