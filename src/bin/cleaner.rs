//! YP Bank Cleaner - CLI tool extracting a normalized ledger from a bank statement.

use chrono::NaiveDate;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use ypbank_ledger::{
    config::DEFAULT_MAX_HEADER_ROWS,
    csv_format::{self, CleanedCsv},
    ParseOptions, Result, StatementLoader,
};

#[derive(Parser)]
#[command(name = "ypbank_cleaner")]
#[command(about = "Extract a clean Date/Description/Amount/Type ledger from a bank statement (CSV, XLSX, XLS)", long_about = None)]
struct Cli {
    /// Input statement file
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path (defaults to <input>_cleaned.csv beside the input)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the cleaned ledger to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Number of leading rows searched for the header
    #[arg(long = "max-header-rows", default_value_t = DEFAULT_MAX_HEADER_ROWS)]
    max_header_rows: usize,

    /// Drop transactions dated before this day (YYYY-MM-DD)
    #[arg(long = "earliest-date")]
    earliest_date: Option<NaiveDate>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut options = ParseOptions::default().with_max_header_rows(cli.max_header_rows);
    if let Some(date) = cli.earliest_date {
        options = options.with_earliest_date(date);
    }

    let ledger = StatementLoader::new()
        .with_options(options)
        .load_path(&cli.input)?;

    if cli.stdout {
        let mut stdout = io::stdout();
        CleanedCsv::from(&ledger).write_to(&mut stdout)?;
        return Ok(());
    }

    let output = cli
        .output
        .unwrap_or_else(|| csv_format::cleaned_output_path(&cli.input));
    csv_format::save_ledger(&ledger, &output)?;
    println!("Saved cleaned file to: {}", output.display());

    Ok(())
}
