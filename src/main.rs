use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Flatten a batch of PLIP XML reports into one CSV feature table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text file listing one report path per line
    reports: PathBuf,

    /// Destination for the CSV table
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match plipcsv::run(&args.reports, &args.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
