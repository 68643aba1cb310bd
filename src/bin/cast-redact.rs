//! CLI tool to strip history-search overlays from a cast recording.
//!
//! Usage:
//!   cast-redact <input.cast> <output.cast>
//!   cast-redact -v <input.cast> <output.cast>

use cast_redact::{RedactError, redact_file};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::debug;

const USAGE: &str = "Usage: cast-redact input_file output_file";

/// Remove Atuin overlay segments from an asciinema cast v2 recording.
///
/// Overlay redraws are dropped and later timestamps are shifted back by the
/// time the overlay was open.
#[derive(Parser)]
#[command(name = "cast-redact", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Recording to read (asciicast v2)
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// Where to write the filtered recording
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,

    /// Log progress on stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let Ok(cli) = Cli::try_parse() else {
        println!("{USAGE}");
        process::exit(1);
    };

    init_logging(cli.verbose);
    debug!(input = %cli.input.display(), output = %cli.output.display(), "starting");

    match redact_file(&cli.input, &cli.output) {
        Ok(stats) => {
            println!(
                "Processed {} -> {}",
                cli.input.display(),
                cli.output.display()
            );
            if cli.verbose > 0 {
                eprintln!("Summary:  {stats}");
            }
        }
        Err(e @ RedactError::InputNotFound { .. }) => {
            println!("Error: {e}");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error processing '{}': {e}", cli.input.display());
            process::exit(1);
        }
    }
}
