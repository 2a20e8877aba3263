//! launchpack CLI - assemble installable launcher packages

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for documents, so logs go to stderr
    let level = match (cli.global.quiet, cli.global.verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("launchpack={}", level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Profile(args) => commands::profile::execute(&cli.global, args),
        Commands::Manifest(args) => commands::manifest::execute(&cli.global, args),
        Commands::Stage(args) => commands::stage::execute(&cli.global, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
