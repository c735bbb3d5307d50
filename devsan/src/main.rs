// devsan/src/main.rs
//! devsan entry point.
//!
//! Exit codes: 0 on success, 2 when any rule or pattern was rejected, 1 on a
//! fatal I/O or configuration error.

use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::io;
use std::process::ExitCode;

use devsan::cli::{Cli, Commands};
use devsan::commands::{check, rules, sanitize};
use devsan::logger;
use devsan::ui::output_format;

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.debug {
        Some(LevelFilter::Debug)
    } else if args.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level);
    log::info!("devsan started. Version: {}", env!("CARGO_PKG_VERSION"));

    let result = match &args.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, args.quiet),
        Commands::Check(cmd) => check::run_check(cmd),
        Commands::Rules(cmd) => rules::run_rules(cmd),
    };

    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            let supports_color = io::stderr().is_terminal();
            let _ = output_format::print_error_message(&mut io::stderr(), &format!("{:#}", e), supports_color);
            ExitCode::FAILURE
        }
    }
}
