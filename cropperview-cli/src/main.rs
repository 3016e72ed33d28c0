// cropperview-cli/src/main.rs
//
// Entry point for the cropperview binary: parses arguments, initializes
// logging, dispatches to the subcommand, and maps errors to exit code 1.

use clap::Parser;
use console::style;
use std::process;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};

fn main() {
    logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Scan(args) => commands::scan::run(args),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}
