//! Editgate CLI entry point.

use clap::Parser;
use editgate::cli::{self, Cli, Commands, EXIT_FAILED};

fn main() {
    let cli = Cli::parse();
    colored::control::set_override(cli.color);
    cli::init_logging();

    let result = match &cli.command {
        Commands::Fast(args) => cli::run_fast(args),
        Commands::Full(args) => cli::run_full(args),
        Commands::Complete(args) => cli::run_complete(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILED
        }
    };

    std::process::exit(exit_code);
}
