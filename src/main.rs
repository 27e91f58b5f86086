//! `dotlink` command-line entry point.
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;

use dotlink::cli::{Cli, Command};
use dotlink::commands;
use dotlink::logging::{Log as _, Logger, init_subscriber};

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.subcommand();
    let name = command.log_name();

    match command {
        Command::Completions { shell } => {
            commands::completions::run(shell, &mut std::io::stdout());
            Ok(())
        }
        Command::Version => {
            commands::version::run();
            Ok(())
        }
        Command::Install(opts) => {
            let log = start_logging(args.verbose, name)?;
            commands::install::run(&args.global, &opts, &log)
        }
        Command::Uninstall => {
            let log = start_logging(args.verbose, name)?;
            commands::uninstall::run(&args.global, &log)
        }
        Command::Status => {
            let log = start_logging(args.verbose, name)?;
            commands::status::run(&args.global, &log)
        }
    }
}

/// Install the tracing subscriber and the Ctrl-C handler for `command`.
fn start_logging(verbose: bool, command: &str) -> Result<Arc<Logger>> {
    init_subscriber(verbose, command);
    let log = Arc::new(Logger::new(command));

    let handler_log = Arc::clone(&log);
    ctrlc::set_handler(move || {
        handler_log.warn("interrupted");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("installing Ctrl-C handler")?;

    Ok(log)
}
