use anyhow::Result;

use camp_scoring::cli::Command;
use camp_scoring::{handle_detail, handle_leaderboard, handle_normalize, handle_score, interpret};

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
        Command::Normalize { results } => handle_normalize(results),
        Command::Score {
            event,
            results,
            clubs,
            json,
        } => handle_score(event, results, clubs.as_deref(), *json),
        Command::Leaderboard {
            camp,
            events,
            results,
            clubs,
            json,
        } => handle_leaderboard(*camp, events, results, clubs.as_deref(), *json),
        Command::Detail { event, result } => handle_detail(event, result),
    }
}
