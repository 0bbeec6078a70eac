use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use scrubconv::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging
    init_logging(args.verbose);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::handle_error(args.command.error_context(), &e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so converted output on stdout stays clean
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scrubconv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
