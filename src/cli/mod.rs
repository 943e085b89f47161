pub mod banks;
pub mod config;
pub mod convert;
pub mod preview;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bankconv", about = "Convert bank statement exports into one spreadsheet-ready CSV layout.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a statement export.
    Convert {
        /// Path to the exported statement (CSV)
        file: String,
        /// Bank key: postbank, amex, revolut, ing, n26
        #[arg(long)]
        bank: String,
        /// Output path (default: <output_dir>/converted_<bank>_<date>.csv)
        #[arg(long)]
        output: Option<String>,
        /// Print the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Row policy for this run: strict or lenient
        #[arg(long)]
        policy: Option<String>,
    },
    /// List the supported banks.
    Banks,
    /// Show how a file tokenizes before converting it.
    Preview {
        /// Path to the exported statement (CSV)
        file: String,
        /// Number of rows to show
        #[arg(long, default_value = "10")]
        rows: usize,
        /// Column to survey for date shapes
        #[arg(long = "date-column", default_value = "0")]
        date_column: usize,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Set the default directory for converted files.
    SetOutputDir {
        /// Directory path (~ is expanded when used)
        dir: String,
    },
    /// Override the row policy of one bank.
    SetPolicy {
        /// Bank key
        bank: String,
        /// strict or lenient
        policy: String,
    },
}
