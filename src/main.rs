use anyhow::Result;

use tournament_ratings::cli::Command;
use tournament_ratings::{handle_rate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rate {
            file,
            preset,
            no_bonuses,
        } => handle_rate(file, *preset, *no_bonuses),
    }
}
