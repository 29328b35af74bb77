use anyhow::Result;

use tcg_tournament_calendar::cli::Command;
use tcg_tournament_calendar::{
    handle_add, handle_calendar, handle_completions, handle_day, handle_interest, handle_interests,
    handle_list, handle_remove, handle_serve, interpret,
};

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
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(port),
        Command::List { start, end, filter } => {
            handle_list(start.as_deref(), end.as_deref(), filter)
        }
        Command::Day { date, filter } => handle_day(&date, filter),
        Command::Calendar {
            view,
            anchor,
            offset,
            filter,
        } => handle_calendar(view, anchor.as_deref(), offset, filter),
        Command::Add(args) => handle_add(args),
        Command::Remove { id } => handle_remove(&id),
        Command::Interest { id } => handle_interest(&id),
        Command::Interests => handle_interests(),
        Command::Completions { shell } => handle_completions(shell),
    }
}
