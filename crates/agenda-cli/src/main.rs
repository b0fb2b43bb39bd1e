use agenda_core::error::CoreError;
use agenda_core::repository::JsonRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    let config = config::Config::new().unwrap_or_else(|_| config::Config::default());

    let mut repository = match JsonRepository::open(&config.data_file) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    // Make sure `add` works out of the box on an empty store
    if let Err(e) = repository.ensure_calendar(&config.default_calendar, &config.default_color) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_event(&mut repository, command, &config),
        cli::Commands::List(command) => commands::list::list_events(&repository, command),
        cli::Commands::Edit(command) => commands::edit::edit_event(&mut repository, command),
        cli::Commands::Delete(command) => commands::delete::delete_event(&mut repository, command),
        cli::Commands::Task(command) => commands::task::task_command(&mut repository, command),
        cli::Commands::Calendar(command) => {
            commands::calendar::calendar_command(&mut repository, command)
        }
        cli::Commands::Export(command) => commands::data::export_snapshot(&repository, command),
        cli::Commands::Import(command) => commands::data::import_snapshot(&mut repository, command),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(items) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, name) in items {
                    eprintln!("  {} ({})", id.yellow(), name);
                }
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
