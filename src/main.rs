use std::path::PathBuf;

use clap::Parser;
use payroll_organizer::organize::{self, DEFAULT_OUTPUT_FILE, OrganizeOptions};
use payroll_organizer::{PayrollError, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli) {
        error!(%error, "run failed");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| PayrollError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let options = OrganizeOptions {
        input_dir: cli.input_dir,
        output: cli.output,
    };
    let report = organize::organize_directory(&options)?;
    info!(
        sheets = report.sheets_written,
        output = %options.output.display(),
        "workbook written"
    );

    if let Some(path) = &cli.report {
        organize::write_report(path, &report)?;
        info!(report = %path.display(), "run report written");
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sort fixed-width payroll files into one Excel sheet per company."
)]
struct Cli {
    /// Directory scanned for `.txt` payroll files.
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Workbook to write.
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Optional path for a JSON summary of the run.
    #[arg(long)]
    report: Option<PathBuf>,
}
