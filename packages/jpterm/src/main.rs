use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use jpterm::logging::{self, LogConfig};
use jpterm::output::OutputMode;
use jpterm::{Config, Error};

/// JMESPath terminal - evaluate expressions against JSON as you type
#[derive(Parser, Debug)]
#[command(name = "jpterm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The input JSON file. Without it, piped input or a sample document is used.
    input_json: Option<PathBuf>,

    /// What is printed when jpterm exits. Cycle it at runtime with Ctrl-P.
    #[arg(short = 'm', long, value_enum, default_value_t = OutputMode::Result)]
    output_mode: OutputMode,

    /// Write the final output to this file instead of stdout.
    #[arg(short = 'o', long)]
    output_file: Option<PathBuf>,

    /// Append diagnostic logs to this file (filter with JPTERM_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            input: args.input_json,
            output_mode: args.output_mode,
            output_file: args.output_file,
            log_file: args.log_file,
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from(Args::parse());

    if let Some(file) = &config.log_file {
        let log_config = LogConfig {
            file: file.clone(),
            filter: config.log_filter(),
        };
        if let Err(e) = logging::init(&log_config) {
            eprintln!("Error: cannot start logging to {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    }

    match jpterm::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::Document(_)) => {
            eprintln!("{}\n", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
